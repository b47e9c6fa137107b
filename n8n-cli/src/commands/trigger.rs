//! Trigger command - run a workflow and optionally wait for it.

use super::input::InputSource;
use crate::config::Config;
use crate::output::Output;
use anyhow::Result;
use n8n_client::{ClientError, JsonObject, TriggerOptions, TriggerOutcome};
use std::time::Duration;

/// Where the trigger input comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerInput {
    /// No input; an empty object is sent.
    None,
    /// Inline JSON from `--data`.
    Inline(String),
    /// JSON read from a file or stdin.
    Source(InputSource),
}

impl TriggerInput {
    fn read(&self) -> Result<Option<JsonObject>> {
        Ok(match self {
            Self::None => None,
            Self::Inline(text) => Some(JsonObject::parse(text, "input")?),
            Self::Source(source) => Some(source.read_object("input")?),
        })
    }
}

/// Run the trigger command.
pub async fn run(
    config: &Config,
    id: &str,
    input: TriggerInput,
    wait: bool,
    timeout_secs: u64,
) -> Result<Output> {
    let input = input.read()?;

    let mut options = TriggerOptions::default().with_timeout(Duration::from_secs(timeout_secs));
    if wait {
        options = options.wait();
    }

    tracing::info!(workflow_id = %id, wait, timeout_secs, "Triggering workflow");

    let mut client = config.client()?;
    let session = client.connect()?;
    let outcome = match session.trigger_workflow(id, input.as_ref(), options).await {
        Ok(outcome) => outcome,
        Err(ClientError::Validation(msg)) if mentions_activation(&msg) => {
            anyhow::bail!("Workflow is not active. Enable with: n8n-cli update {id} --activate")
        }
        Err(e) => return Err(e.into()),
    };

    if let TriggerOutcome::Finished { state, execution } = &outcome {
        tracing::info!(execution_id = %execution.id, %state, "Execution finished");
    }
    Ok(Output::Json(outcome.to_json().clone()))
}

fn mentions_activation(message: &str) -> bool {
    let message = message.to_lowercase();
    message.contains("active")
}
