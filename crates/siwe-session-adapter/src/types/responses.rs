/*
[INPUT]:  JSON bodies returned by the session backend
[OUTPUT]: Typed response structs
[POS]:    Data layer - response DTOs
[UPDATE]: When backend response shapes change
*/

use serde::{Deserialize, Serialize};

/// Response from `GET /me`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeResponse {
    #[serde(default)]
    pub address: Option<String>,
}

impl MeResponse {
    /// True when the backend reports a non-empty session address.
    pub fn has_address(&self) -> bool {
        self.address
            .as_deref()
            .is_some_and(|address| !address.is_empty())
    }
}

/// Response from `GET /nonce`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonceResponse {
    pub nonce: String,
}
