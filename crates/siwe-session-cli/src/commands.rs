/*
[INPUT]:  Provider stack, subcommand arguments, stdin focus lines, shutdown token
[OUTPUT]: Human-readable results written to the given sink
[POS]:    CLI layer - subcommand implementations
[UPDATE]: When subcommand behavior or output format changes
*/

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use siwe_session_adapter::{
    AuthenticationAdapter, AuthenticationStatus, EvmWalletSigner, Providers, SessionConfig,
    SessionError,
};

/// Load configuration from `path`, or the defaults when no path is given
pub fn load_config(path: Option<&Path>) -> Result<SessionConfig> {
    match path {
        Some(path) => SessionConfig::from_file(path)
            .with_context(|| format!("load config from {}", path.display())),
        None => Ok(SessionConfig::default()),
    }
}

pub fn describe_config(config: &SessionConfig, out: &mut impl Write) -> Result<()> {
    let wallet = config.wallet_config();
    writeln!(out, "app: {} ({})", wallet.app_name(), config.app.url)?;
    writeln!(out, "project: {}", wallet.project_id())?;
    writeln!(out, "backend: {}", config.backend.base_url)?;
    let chains: Vec<String> = wallet
        .chains()
        .iter()
        .map(|chain| format!("{} ({})", chain.name(), chain.id()))
        .collect();
    writeln!(out, "chains: {}", chains.join(", "))?;
    Ok(())
}

/// Follow-up advice for a failed command, based on the backend error in its chain
pub fn error_hint(err: &anyhow::Error) -> Option<&'static str> {
    let session_err = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<SessionError>())?;
    if session_err.is_auth_error() {
        Some("backend rejected the session; sign in again")
    } else if session_err.is_retryable() {
        Some("backend unavailable or busy; try again later")
    } else {
        None
    }
}

pub async fn run_status(providers: &Providers, out: &mut impl Write) -> Result<AuthenticationStatus> {
    let status = providers.refresh_status().await;
    writeln!(out, "{status}")?;
    Ok(status)
}

pub async fn run_nonce(providers: &Providers, out: &mut impl Write) -> Result<String> {
    let nonce = providers
        .adapter()
        .get_nonce()
        .await
        .context("fetch nonce")?;
    writeln!(out, "{nonce}")?;
    Ok(nonce)
}

pub async fn run_sign_in(
    providers: &Providers,
    private_key: &str,
    chain_id: u64,
    out: &mut impl Write,
) -> Result<bool> {
    let wallet = EvmWalletSigner::new(private_key).context("load wallet key")?;
    let outcome = providers
        .sign_in(&wallet, chain_id)
        .await
        .context("sign in")?;

    writeln!(out, "{}", outcome.message)?;
    writeln!(out)?;
    writeln!(out, "signature: {}", outcome.signature)?;
    writeln!(out, "verified: {}", outcome.verified)?;
    writeln!(out, "status: {}", providers.status())?;
    Ok(outcome.verified)
}

pub async fn run_sign_out(providers: &Providers, out: &mut impl Write) -> Result<()> {
    providers.sign_out().await;
    writeln!(out, "signed out")?;
    Ok(())
}

/// Mount the providers and relay stdin lines as focus events until EOF or shutdown.
pub async fn run_watch<R>(
    providers: &mut Providers,
    input: R,
    shutdown: CancellationToken,
    out: &mut impl Write,
) -> Result<AuthenticationStatus>
where
    R: AsyncBufRead + Unpin,
{
    let mut status_rx = providers.subscribe();
    let focus = providers.mount();
    let mut lines = input.lines();
    info!("watching session status");

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                debug!("watch cancelled");
                break;
            }
            changed = status_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let status = *status_rx.borrow_and_update();
                writeln!(out, "status: {status}")?;
            }
            line = lines.next_line() => {
                match line.context("read stdin")? {
                    Some(_) => {
                        if !focus.notify() {
                            break;
                        }
                    }
                    None => break,
                }
            }
        }
    }

    providers.unmount().await;
    let status = providers.status();
    writeln!(out, "final status: {status}")?;
    Ok(status)
}
