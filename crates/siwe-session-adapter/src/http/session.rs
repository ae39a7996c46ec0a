/*
[INPUT]:  Session cookie, SIWE message and signature
[OUTPUT]: Session address, nonces, verification outcome
[POS]:    HTTP layer - session endpoints (/me, /nonce, /verify, /logout)
[UPDATE]: When backend session routes change
*/

use reqwest::Method;
use tracing::debug;

use crate::auth::SiweMessage;
use crate::http::{Result, SessionClient, SessionError};
use crate::types::{MeResponse, NonceResponse, VerifyRequest};

impl SessionClient {
    /// Address bound to the current session, if any
    ///
    /// The body is decoded whatever the status code, so a `401` carrying an
    /// error object reads as "no address".
    ///
    /// GET /me
    pub async fn me(&self) -> Result<MeResponse> {
        let builder = self.request(Method::GET, "/me")?;
        let response = self.send(builder).await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        let me: MeResponse = serde_json::from_slice(&bytes)?;
        if !status.is_success() {
            debug!(status = status.as_u16(), "decoded /me body from non-success response");
        }
        Ok(me)
    }

    /// Fetch a server-issued nonce
    ///
    /// GET /nonce
    pub async fn nonce(&self) -> Result<String> {
        let builder = self.request(Method::GET, "/nonce")?;
        let response: NonceResponse = self.send_json(builder).await?;
        if response.nonce.is_empty() {
            return Err(SessionError::InvalidResponse("empty nonce".to_string()));
        }
        Ok(response.nonce)
    }

    /// Submit a signed message. `Ok(true)` iff the backend answered 2xx.
    ///
    /// POST /verify
    pub async fn verify(&self, message: &SiweMessage, signature: &str) -> Result<bool> {
        let body = VerifyRequest { message, signature };
        let builder = self.request(Method::POST, "/verify")?.json(&body);
        let response = self.send(builder).await?;
        Ok(response.status().is_success())
    }

    /// End the session. The response is not inspected.
    ///
    /// GET /logout
    pub async fn logout(&self) -> Result<()> {
        let builder = self.request(Method::GET, "/logout")?;
        self.send(builder).await?;
        Ok(())
    }
}
