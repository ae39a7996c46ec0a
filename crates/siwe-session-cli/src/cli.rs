/*
[INPUT]:  Command-line arguments
[OUTPUT]: Parsed CLI options and subcommand
[POS]:    CLI layer - argument definitions
[UPDATE]: When adding flags or subcommands
*/

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "siwe-session", version, about = "Sign-In with Ethereum session client")]
pub struct Cli {
    /// YAML configuration; built-in defaults when omitted
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info", global = true)]
    pub log_level: String,
    /// Validate configuration and exit
    #[arg(long = "dry-run", global = true)]
    pub dry_run: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Poll /me once and print the authentication status
    Status,
    /// Print a freshly issued nonce
    Nonce,
    /// Sign in with a local EVM private key
    SignIn {
        #[arg(long = "private-key", value_name = "HEX")]
        private_key: String,
        #[arg(long = "chain-id", default_value_t = 1)]
        chain_id: u64,
    },
    /// End the backend session
    SignOut,
    /// Track status; every line on stdin counts as a focus event
    Watch,
}
