//! Version command - show version information.

use crate::output::Output;
use anyhow::Result;

/// Version information.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run the version command.
pub fn run() -> Result<Output> {
    Ok(Output::Message(format!(
        "n8n-cli {}\nPlatform: {} / {}",
        VERSION,
        std::env::consts::OS,
        std::env::consts::ARCH
    )))
}
