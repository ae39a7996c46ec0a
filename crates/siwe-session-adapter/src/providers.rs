/*
[INPUT]:  Session configuration, wallet signer, focus notifications
[OUTPUT]: Mounted provider stack with status tracking and sign-in/sign-out
[POS]:    Composition root - wallet config -> session client -> status -> adapter
[UPDATE]: When provider order or sign-in orchestration changes
*/

use tokio::sync::watch;
use tracing::{info, warn};

use crate::auth::{
    AuthenticationAdapter, FocusHandle, SiweAuthAdapter, SiweMessage, StatusPoller, WalletSigner,
};
use crate::config::{SessionConfig, WalletConfig};
use crate::http::{Result, SessionClient, SessionError};
use crate::types::{AuthenticationStatus, PageLocation};

/// Result of one sign-in attempt
#[derive(Debug, Clone)]
pub struct SignInOutcome<M> {
    pub message: M,
    pub signature: String,
    pub verified: bool,
}

/// Runs nonce -> message -> wallet signature -> verify against any adapter.
pub async fn sign_in_with<A>(
    adapter: &A,
    wallet: &dyn WalletSigner,
    chain_id: u64,
) -> Result<SignInOutcome<A::Message>>
where
    A: AuthenticationAdapter,
{
    let address = wallet.address();

    let nonce = adapter.get_nonce().await?;
    let message = adapter.create_message(&nonce, address, chain_id)?;
    let body = adapter.get_message_body(&message);
    let signature = wallet.sign_message(&body).await?;
    let verified = adapter.verify(&message, &signature).await;

    Ok(SignInOutcome {
        message,
        signature,
        verified,
    })
}

/// The provider stack around an application.
#[derive(Debug)]
pub struct Providers {
    wallet_config: WalletConfig,
    client: SessionClient,
    poller: StatusPoller,
    adapter: SiweAuthAdapter,
}

impl Providers {
    pub fn new(config: &SessionConfig) -> Result<Self> {
        config.validate()?;
        let client = SessionClient::with_config_and_base_url(
            config.client_config(),
            &config.backend.base_url,
        )?;
        let location = PageLocation::parse(&config.app.url)?;
        Ok(Self::from_parts(config.wallet_config(), client, location))
    }

    pub fn from_parts(
        wallet_config: WalletConfig,
        client: SessionClient,
        location: PageLocation,
    ) -> Self {
        let poller = StatusPoller::new(client.clone());
        let adapter = SiweAuthAdapter::new(client.clone(), location);
        Self {
            wallet_config,
            client,
            poller,
            adapter,
        }
    }

    pub fn wallet_config(&self) -> &WalletConfig {
        &self.wallet_config
    }

    pub fn client(&self) -> &SessionClient {
        &self.client
    }

    pub fn adapter(&self) -> &SiweAuthAdapter {
        &self.adapter
    }

    pub fn status(&self) -> AuthenticationStatus {
        self.poller.status()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthenticationStatus> {
        self.poller.subscribe()
    }

    pub fn is_mounted(&self) -> bool {
        self.poller.is_mounted()
    }

    /// Start status tracking; polls `/me` immediately.
    pub fn mount(&mut self) -> FocusHandle {
        info!(
            app = self.wallet_config.app_name(),
            chains = self.wallet_config.chains().len(),
            "mounting providers"
        );
        self.poller.mount()
    }

    pub fn notify_focus(&self) -> bool {
        self.poller.notify_focus()
    }

    pub async fn unmount(&mut self) {
        self.poller.unmount().await;
        info!("providers unmounted");
    }

    pub async fn refresh_status(&self) -> AuthenticationStatus {
        self.poller.refresh().await
    }

    /// Sign in with `wallet` on `chain_id`, then re-read the session status
    /// if the backend accepted the signature.
    pub async fn sign_in(
        &self,
        wallet: &dyn WalletSigner,
        chain_id: u64,
    ) -> Result<SignInOutcome<SiweMessage>> {
        if !self.wallet_config.supports_chain(chain_id) {
            return Err(SessionError::UnsupportedChain { chain_id });
        }

        let outcome = sign_in_with(&self.adapter, wallet, chain_id).await?;
        if outcome.verified {
            let status = self.poller.refresh().await;
            info!(address = %wallet.address(), chain_id, %status, "signed in");
        } else {
            warn!(address = %wallet.address(), chain_id, "backend rejected sign-in");
        }

        Ok(outcome)
    }

    /// Fires `/logout`. The local status is left as it was.
    pub async fn sign_out(&self) {
        self.adapter.sign_out().await;
    }
}
