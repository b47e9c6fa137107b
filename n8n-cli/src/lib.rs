//! n8n CLI - command-line client for the n8n workflow automation API.
//!
//! The binary is a thin wrapper: it parses [`Cli`], sets up logging, calls
//! [`run`] and renders the returned [`Output`].

pub mod cli;
pub mod commands;
pub mod config;
pub mod observability;
pub mod output;

pub use cli::{Cli, Commands, ConfigAction, CredentialsAction};
pub use config::Config;
pub use output::{Output, OutputFormat};

/// Execute a parsed command line.
pub async fn run(cli: Cli) -> anyhow::Result<Output> {
    commands::dispatch(cli).await
}
