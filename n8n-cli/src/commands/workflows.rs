//! Workflow commands - list, show, create, update, delete, enable, disable.

use super::input::InputSource;
use crate::config::Config;
use crate::output::{Output, WORKFLOW_COLUMNS, WORKFLOW_FIELDS};
use anyhow::Result;
use n8n_client::{Confirmation, WorkflowDefinition, WorkflowFilter, WorkflowUpdate};

/// List workflows.
pub async fn list(config: &Config, active: Option<bool>, tags: Vec<String>) -> Result<Output> {
    tracing::info!(?active, tags = ?tags, "Listing workflows");

    let filter = WorkflowFilter { active, tags };
    let mut client = config.client()?;
    let session = client.connect()?;
    let workflows = session.list_workflows(&filter).await?;

    Ok(Output::Table {
        rows: workflows
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<_, _>>()?,
        columns: WORKFLOW_COLUMNS,
    })
}

/// Show a single workflow.
pub async fn show(config: &Config, id: &str) -> Result<Output> {
    let mut client = config.client()?;
    let session = client.connect()?;
    let workflow = session.get_workflow(id).await?;

    Ok(Output::Record {
        value: serde_json::to_value(&workflow)?,
        fields: WORKFLOW_FIELDS,
    })
}

/// Create a workflow.
pub async fn create(
    config: &Config,
    source: InputSource,
    name: Option<&str>,
    activate: bool,
) -> Result<Output> {
    let object = source.read_object("workflow")?;
    let definition = WorkflowDefinition::for_create(object, name)?;

    let mut client = config.client()?;
    let session = client.connect()?;
    let workflow = session.create_workflow(definition, activate).await?;

    Ok(Output::Record {
        value: serde_json::to_value(&workflow)?,
        fields: WORKFLOW_FIELDS,
    })
}

/// Update a workflow.
pub async fn update(
    config: &Config,
    id: &str,
    source: Option<InputSource>,
    name: Option<String>,
    activate: bool,
    deactivate: bool,
) -> Result<Output> {
    let definition = match source {
        Some(source) => Some(WorkflowDefinition::for_update(
            source.read_object("workflow")?,
        )?),
        None => None,
    };
    let update = WorkflowUpdate {
        definition,
        name,
        activate,
        deactivate,
    };

    let mut client = config.client()?;
    let session = client.connect()?;
    let workflow = session.update_workflow(id, update).await?;

    Ok(Output::Record {
        value: serde_json::to_value(&workflow)?,
        fields: WORKFLOW_FIELDS,
    })
}

/// Delete a workflow.
pub async fn delete(config: &Config, id: &str, confirm: bool, force: bool) -> Result<Output> {
    let confirmation = Confirmation::from_flags(confirm, force);
    if confirmation == Confirmation::None {
        anyhow::bail!(
            "Deletion requires confirmation. Use --confirm flag or --force for scripting."
        );
    }

    let mut client = config.client()?;
    let session = client.connect()?;
    let workflow = session.delete_workflow(id, confirmation).await?;

    Ok(Output::Message(format!(
        "Deleted workflow '{}' (ID: {})",
        workflow.name, id
    )))
}

/// Activate or deactivate a workflow.
pub async fn set_active(config: &Config, id: &str, active: bool) -> Result<Output> {
    tracing::info!(workflow_id = %id, active, "Changing workflow state");

    let mut client = config.client()?;
    let session = client.connect()?;
    let workflow = if active {
        session.activate_workflow(id).await?
    } else {
        session.deactivate_workflow(id).await?
    };

    Ok(Output::Json(serde_json::to_value(&workflow)?))
}
