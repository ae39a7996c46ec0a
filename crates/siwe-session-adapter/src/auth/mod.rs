/*
[INPUT]:  Session client, page location and wallet signers
[OUTPUT]: SIWE messages, verification results and authentication status
[POS]:    Auth layer - Sign-In with Ethereum flow
[UPDATE]: When auth flow or signature methods change
*/

pub mod adapter;
pub mod evm_wallet;
pub mod message;
pub mod status;
pub mod wallet;

pub use adapter::{AuthenticationAdapter, DEFAULT_STATEMENT, SiweAuthAdapter};
pub use evm_wallet::EvmWalletSigner;
pub use message::{MessageError, MessageParams, SiweMessage};
pub use status::{FocusHandle, StatusPoller};
pub use wallet::{MockWalletSigner, WalletSigner};
