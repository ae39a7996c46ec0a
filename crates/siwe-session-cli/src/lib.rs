/*
[INPUT]:  Public API exports for the siwe-session CLI crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod cli;
pub mod commands;

pub use cli::{Cli, Command};
