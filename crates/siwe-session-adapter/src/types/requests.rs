/*
[INPUT]:  Prepared SIWE message and wallet signature
[OUTPUT]: Request bodies for session endpoints
[POS]:    Data layer - request DTOs
[UPDATE]: When backend request shapes change
*/

use serde::Serialize;

use crate::auth::SiweMessage;

/// Body for `POST /verify`
///
/// `message` is sent as the structured message object, not its text form.
#[derive(Debug, Clone, Serialize)]
pub struct VerifyRequest<'a> {
    pub message: &'a SiweMessage,
    pub signature: &'a str,
}
