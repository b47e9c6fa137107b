//! n8n CLI - command-line interface for n8n workflow automation.

use anyhow::Result;
use clap::Parser;
use n8n_cli::Cli;
use n8n_cli::observability::{TracingConfig, TracingGuard, init_tracing};
use std::process::ExitCode;

fn setup_logging(verbosity: u8) -> Result<TracingGuard> {
    init_tracing(TracingConfig::from_verbosity(verbosity))
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let format = cli.format;

    let _tracing_guard = match setup_logging(cli.verbose) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    match n8n_cli::run(cli).await {
        Ok(output) => {
            println!("{}", output.render(format));
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
