/*
[INPUT]:  HTTP client configuration and backend endpoints
[OUTPUT]: HTTP responses and typed session results
[POS]:    HTTP layer - REST communication with the session backend
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod client;
pub mod error;
pub mod session;

pub use error::{Result, SessionError};

pub use client::{ClientConfig, DEFAULT_BASE_URL, SessionClient};
