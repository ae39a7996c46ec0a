/*
[INPUT]:  Session endpoint payloads and wallet configuration
[OUTPUT]: Typed Rust enums with serialization support
[POS]:    Data layer - status and chain definitions
[UPDATE]: When adding supported chains or status states
*/

use serde::{Deserialize, Serialize};

/// Authentication status reported to the application.
///
/// Starts as `Loading` and moves to one of the other two states once the
/// backend has answered a `/me` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthenticationStatus {
    #[default]
    Loading,
    Authenticated,
    Unauthenticated,
}

impl AuthenticationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthenticationStatus::Loading => "loading",
            AuthenticationStatus::Authenticated => "authenticated",
            AuthenticationStatus::Unauthenticated => "unauthenticated",
        }
    }
}

impl std::fmt::Display for AuthenticationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// EVM chains the wallet configuration knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    Mainnet,
    Polygon,
    Optimism,
    Arbitrum,
    Base,
}

impl Chain {
    pub const ALL: [Chain; 5] = [
        Chain::Mainnet,
        Chain::Polygon,
        Chain::Optimism,
        Chain::Arbitrum,
        Chain::Base,
    ];

    /// EIP-155 chain id
    pub fn id(&self) -> u64 {
        match self {
            Chain::Mainnet => 1,
            Chain::Polygon => 137,
            Chain::Optimism => 10,
            Chain::Arbitrum => 42161,
            Chain::Base => 8453,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Chain::Mainnet => "Ethereum",
            Chain::Polygon => "Polygon",
            Chain::Optimism => "OP Mainnet",
            Chain::Arbitrum => "Arbitrum One",
            Chain::Base => "Base",
        }
    }

    pub fn from_id(id: u64) -> Option<Self> {
        Self::ALL.into_iter().find(|chain| chain.id() == id)
    }
}
