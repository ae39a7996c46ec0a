/*
[INPUT]:  Session client, page location, wallet address and chain id
[OUTPUT]: Nonces, SIWE messages, signable text, verification and sign-out
[POS]:    Auth layer - the callbacks a wallet UI drives during sign-in
[UPDATE]: When adapter callbacks or message defaults change
*/

use alloy_primitives::Address;
use async_trait::async_trait;
use tracing::{info, warn};

use crate::auth::{MessageParams, SiweMessage};
use crate::http::{Result, SessionClient};
use crate::types::PageLocation;

/// Statement placed in every message built by [`SiweAuthAdapter`]
pub const DEFAULT_STATEMENT: &str =
    "Sign in to prove that you own this wallet. This transaction does not cost any gas.";

/// Callbacks a wallet sign-in UI needs from its host application.
#[async_trait]
pub trait AuthenticationAdapter: Send + Sync {
    type Message: Send + Sync;

    /// Fetch a fresh nonce from the backend
    async fn get_nonce(&self) -> Result<String>;

    /// Build the message the wallet will sign
    fn create_message(
        &self,
        nonce: &str,
        address: Address,
        chain_id: u64,
    ) -> Result<Self::Message>;

    /// Text form of the message handed to the wallet
    fn get_message_body(&self, message: &Self::Message) -> String;

    /// Ask the backend to verify the signature. Failures of any kind are `false`.
    async fn verify(&self, message: &Self::Message, signature: &str) -> bool;

    /// Tell the backend to drop the session
    async fn sign_out(&self);
}

/// [`AuthenticationAdapter`] backed by the session HTTP endpoints
#[derive(Debug, Clone)]
pub struct SiweAuthAdapter {
    client: SessionClient,
    location: PageLocation,
    statement: String,
}

impl SiweAuthAdapter {
    pub fn new(client: SessionClient, location: PageLocation) -> Self {
        Self {
            client,
            location,
            statement: DEFAULT_STATEMENT.to_string(),
        }
    }

    pub fn with_statement(mut self, statement: impl Into<String>) -> Self {
        self.statement = statement.into();
        self
    }

    pub fn location(&self) -> &PageLocation {
        &self.location
    }
}

#[async_trait]
impl AuthenticationAdapter for SiweAuthAdapter {
    type Message = SiweMessage;

    async fn get_nonce(&self) -> Result<String> {
        self.client.nonce().await
    }

    fn create_message(&self, nonce: &str, address: Address, chain_id: u64) -> Result<SiweMessage> {
        let message = SiweMessage::new(MessageParams {
            domain: self.location.host(),
            address,
            statement: Some(self.statement.clone()),
            uri: self.location.origin(),
            chain_id,
            nonce: nonce.to_string(),
        })?;
        Ok(message)
    }

    fn get_message_body(&self, message: &SiweMessage) -> String {
        message.prepare_message()
    }

    async fn verify(&self, message: &SiweMessage, signature: &str) -> bool {
        match self.client.verify(message, signature).await {
            Ok(verified) => {
                info!(address = %message.address(), verified, "signature verification finished");
                verified
            }
            Err(err) => {
                warn!(error = %err, "signature verification request failed");
                false
            }
        }
    }

    async fn sign_out(&self) {
        info!("signing out");
        if let Err(err) = self.client.logout().await {
            warn!(error = %err, "logout request failed");
        }
    }
}
