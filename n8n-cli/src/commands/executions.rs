//! Execution commands - list and show.

use crate::config::Config;
use crate::output::{EXECUTION_COLUMNS, EXECUTION_FIELDS, Output};
use anyhow::Result;
use n8n_client::{ExecutionFilter, ExecutionStatus};

/// List executions.
pub async fn list(
    config: &Config,
    workflow_id: Option<String>,
    status: Option<&str>,
    limit: u32,
) -> Result<Output> {
    let filter = ExecutionFilter {
        workflow_id,
        status: status.map(ExecutionStatus::parse),
        limit: Some(limit),
    };
    tracing::info!(?filter, "Listing executions");

    let mut client = config.client()?;
    let session = client.connect()?;
    let executions = session.list_executions(&filter).await?;

    Ok(Output::Table {
        rows: executions
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<_, _>>()?,
        columns: EXECUTION_COLUMNS,
    })
}

/// Show a single execution.
pub async fn show(config: &Config, id: &str) -> Result<Output> {
    let mut client = config.client()?;
    let session = client.connect()?;
    let execution = session.get_execution(id).await?;

    Ok(Output::Record {
        value: serde_json::to_value(&execution)?,
        fields: EXECUTION_FIELDS,
    })
}
