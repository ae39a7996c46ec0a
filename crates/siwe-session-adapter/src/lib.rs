/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public SIWE session adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod config;
pub mod http;
pub mod providers;
pub mod types;

// Re-export commonly used types from auth
pub use auth::{
    AuthenticationAdapter,
    EvmWalletSigner,
    FocusHandle,
    MessageError,
    MessageParams,
    MockWalletSigner,
    SiweAuthAdapter,
    SiweMessage,
    StatusPoller,
    WalletSigner,
};

pub use config::{AppConfig, BackendConfig, SessionConfig, WalletConfig};

// Re-export commonly used types from http
pub use http::{ClientConfig, Result, SessionClient, SessionError};

pub use providers::{Providers, SignInOutcome, sign_in_with};

// Re-export all types
pub use types::*;

pub use alloy_primitives::Address;
