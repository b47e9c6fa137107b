//! Health command - check that the instance is reachable.

use crate::config::Config;
use crate::output::Output;
use anyhow::Result;

/// Run the health command.
pub async fn run(config: &Config) -> Result<Output> {
    let mut client = config.client()?;
    let session = client.connect()?;
    let url = session.base_url().to_string();

    tracing::info!(url = %url, "Checking instance health");
    if !session.health_check().await {
        anyhow::bail!("n8n instance at {} is not reachable", url);
    }

    Ok(Output::Message(format!("n8n instance at {} is healthy", url)))
}
