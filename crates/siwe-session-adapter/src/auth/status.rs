/*
[INPUT]:  Session client, mount/unmount lifecycle, focus notifications
[OUTPUT]: Authentication status via `watch` channel
[POS]:    Auth layer - polls /me on mount and on every focus event
[UPDATE]: When changing poll triggers or failure handling
*/

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::http::SessionClient;
use crate::types::AuthenticationStatus;

#[derive(Debug)]
enum PollerCommand {
    Refresh,
    Shutdown,
}

#[derive(Debug)]
struct PollerShared {
    client: SessionClient,
    status_tx: watch::Sender<AuthenticationStatus>,
}

impl PollerShared {
    /// One `/me` round trip. A failed request leaves the status untouched.
    async fn poll(&self) -> AuthenticationStatus {
        match self.client.me().await {
            Ok(me) => {
                let status = if me.has_address() {
                    AuthenticationStatus::Authenticated
                } else {
                    AuthenticationStatus::Unauthenticated
                };
                info!(address = ?me.address, %status, "session status refreshed");
                self.status_tx.send_replace(status);
                status
            }
            Err(err) => {
                let status = *self.status_tx.borrow();
                warn!(error = %err, %status, "failed to fetch session status");
                status
            }
        }
    }
}

/// Sends focus notifications to a mounted [`StatusPoller`].
///
/// Once the poller is unmounted every handle issued for that mount goes dead.
#[derive(Debug, Clone)]
pub struct FocusHandle {
    cmd_tx: mpsc::UnboundedSender<PollerCommand>,
}

impl FocusHandle {
    /// Returns `false` when the poller is no longer mounted.
    pub fn notify(&self) -> bool {
        self.cmd_tx.send(PollerCommand::Refresh).is_ok()
    }
}

/// Tracks the session's authentication status.
#[derive(Debug)]
pub struct StatusPoller {
    shared: Arc<PollerShared>,
    cmd_tx: Option<mpsc::UnboundedSender<PollerCommand>>,
    worker_handle: Option<JoinHandle<()>>,
}

impl StatusPoller {
    pub fn new(client: SessionClient) -> Self {
        let (status_tx, _rx) = watch::channel(AuthenticationStatus::Loading);
        Self {
            shared: Arc::new(PollerShared { client, status_tx }),
            cmd_tx: None,
            worker_handle: None,
        }
    }

    pub fn status(&self) -> AuthenticationStatus {
        *self.shared.status_tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthenticationStatus> {
        self.shared.status_tx.subscribe()
    }

    pub fn is_mounted(&self) -> bool {
        self.cmd_tx.is_some()
    }

    /// Poll `/me` once on the caller's task.
    pub async fn refresh(&self) -> AuthenticationStatus {
        self.shared.poll().await
    }

    /// Start the worker. Issues the initial `/me` request right away.
    ///
    /// Mounting an already mounted poller only hands out another focus handle.
    pub fn mount(&mut self) -> FocusHandle {
        if let Some(cmd_tx) = &self.cmd_tx {
            return FocusHandle {
                cmd_tx: cmd_tx.clone(),
            };
        }

        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let shared = self.shared.clone();
        self.worker_handle = Some(tokio::spawn(run_worker(shared, cmd_rx)));
        self.cmd_tx = Some(cmd_tx.clone());
        debug!("status poller mounted");

        FocusHandle { cmd_tx }
    }

    /// Queue one refresh, as a focus event would. `false` when not mounted.
    pub fn notify_focus(&self) -> bool {
        self.cmd_tx
            .as_ref()
            .is_some_and(|tx| tx.send(PollerCommand::Refresh).is_ok())
    }

    /// Stop the worker after it has handled every focus event queued so far.
    pub async fn unmount(&mut self) {
        if let Some(cmd_tx) = self.cmd_tx.take() {
            let _ = cmd_tx.send(PollerCommand::Shutdown);
        }
        if let Some(handle) = self.worker_handle.take() {
            if let Err(err) = handle.await {
                warn!(error = %err, "status poller worker ended abnormally");
            }
        }
        debug!("status poller unmounted");
    }
}

impl Drop for StatusPoller {
    fn drop(&mut self) {
        if let Some(cmd_tx) = self.cmd_tx.take() {
            let _ = cmd_tx.send(PollerCommand::Shutdown);
        }
    }
}

async fn run_worker(shared: Arc<PollerShared>, mut cmd_rx: mpsc::UnboundedReceiver<PollerCommand>) {
    shared.poll().await;

    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            PollerCommand::Refresh => {
                shared.poll().await;
            }
            PollerCommand::Shutdown => break,
        }
    }
}
