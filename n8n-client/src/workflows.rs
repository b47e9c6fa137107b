//! Workflow management operations.

use crate::client::{Client, encode_id};
use crate::error::{ClientError, Result};
use crate::payload::WorkflowDefinition;
use crate::types::{Confirmation, Document, ListEnvelope, Workflow};
use serde::de::Error as _;
use serde_json::{Map, Value, json};

/// Client-side filter applied to the workflow list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowFilter {
    /// Keep only workflows with this active flag.
    pub active: Option<bool>,
    /// Keep workflows carrying any of these tag names. Empty keeps all.
    pub tags: Vec<String>,
}

impl WorkflowFilter {
    /// Filter on the active flag.
    #[must_use]
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    /// Add a tag name to the filter.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Whether a workflow passes the filter.
    pub fn matches(&self, workflow: &Workflow) -> bool {
        if let Some(active) = self.active
            && workflow.active != active
        {
            return false;
        }
        self.tags.is_empty()
            || workflow
                .tag_names()
                .any(|name| self.tags.iter().any(|t| t == name))
    }
}

/// Changes applied by [`Client::update_workflow`].
///
/// Without a `definition` the current workflow is fetched and the remaining
/// fields are applied on top of it.
#[derive(Debug, Clone, Default)]
pub struct WorkflowUpdate {
    /// Replacement definition.
    pub definition: Option<WorkflowDefinition>,
    /// New name. An empty name is ignored.
    pub name: Option<String>,
    /// Mark the workflow active.
    pub activate: bool,
    /// Mark the workflow inactive.
    pub deactivate: bool,
}

impl WorkflowUpdate {
    /// The new name, if a non-empty one was given.
    fn new_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }

    fn validate(&self) -> Result<()> {
        if self.activate && self.deactivate {
            return Err(ClientError::Validation(
                "Cannot use both --activate and --deactivate".to_string(),
            ));
        }
        if self.definition.is_none() && self.new_name().is_none() && !self.activate && !self.deactivate
        {
            return Err(ClientError::Validation(
                "No update specified. Use --file, --stdin, --name, --activate, or --deactivate"
                    .to_string(),
            ));
        }
        Ok(())
    }

    fn apply(&self, body: &mut Map<String, Value>) {
        if let Some(name) = self.new_name() {
            body.insert("name".to_string(), Value::String(name.to_string()));
        }
        if self.activate {
            body.insert("active".to_string(), Value::Bool(true));
        } else if self.deactivate {
            body.insert("active".to_string(), Value::Bool(false));
        }
    }
}

impl Client {
    /// List workflows, optionally filtered by active flag and tags.
    ///
    /// Filtering happens on the client after the full list is fetched.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use n8n_client::{Client, WorkflowFilter};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let mut client = Client::new("http://localhost:5678")?;
    /// let session = client.connect()?;
    /// let filter = WorkflowFilter::default().with_active(true).with_tag("prod");
    /// for workflow in session.list_workflows(&filter).await? {
    ///     println!("{}: {}", workflow.id, workflow.name);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list_workflows(
        &self,
        filter: &WorkflowFilter,
    ) -> Result<Vec<Document<Workflow>>> {
        let body = self
            .get("workflows")
            .await
            .map_err(ClientError::for_collection)?;
        let envelope: ListEnvelope<Document<Workflow>> = serde_json::from_value(body)?;

        let workflows: Vec<_> = envelope
            .data
            .into_iter()
            .filter(|w| filter.matches(w))
            .collect();
        tracing::debug!(count = workflows.len(), "listed workflows");
        Ok(workflows)
    }

    /// Get a workflow by ID.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] if the workflow does not exist.
    pub async fn get_workflow(&self, workflow_id: &str) -> Result<Document<Workflow>> {
        let path = format!("workflows/{}", encode_id(workflow_id));
        let body = self
            .get(&path)
            .await
            .map_err(|e| e.for_resource("Workflow", workflow_id))?;
        Ok(Document::from_value(body)?)
    }

    /// Create a workflow, optionally activating it afterwards.
    ///
    /// When `activate` is set the returned workflow is the result of the
    /// activation call.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] if the server rejects the
    /// definition.
    pub async fn create_workflow(
        &self,
        definition: WorkflowDefinition,
        activate: bool,
    ) -> Result<Document<Workflow>> {
        let body = self
            .post("workflows", &definition)
            .await
            .map_err(ClientError::for_collection)?;
        let created: Document<Workflow> = Document::from_value(body)?;
        tracing::info!(workflow_id = %created.id, name = %created.name, "workflow created");

        if activate {
            return self.activate_workflow(&created.id).await;
        }
        Ok(created)
    }

    /// Update a workflow.
    ///
    /// With a replacement definition the flags are applied to it and the
    /// result is submitted. Otherwise the current workflow is fetched first
    /// and the flags are merged into it; if the fetch fails nothing is
    /// written.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] before any request when both
    /// activation flags are set or no change is requested.
    pub async fn update_workflow(
        &self,
        workflow_id: &str,
        mut update: WorkflowUpdate,
    ) -> Result<Document<Workflow>> {
        update.validate()?;

        let mut body = match update.definition.take() {
            Some(definition) => definition.into_map(),
            None => match self.get_workflow(workflow_id).await?.into_json() {
                Value::Object(map) => map,
                _ => {
                    return Err(ClientError::Deserialize(serde_json::Error::custom(format!(
                        "workflow '{workflow_id}' is not a JSON object"
                    ))));
                }
            },
        };
        update.apply(&mut body);

        let path = format!("workflows/{}", encode_id(workflow_id));
        let response = self
            .patch(&path, &body)
            .await
            .map_err(|e| e.for_resource("Workflow", workflow_id))?;
        tracing::info!(workflow_id = %workflow_id, "workflow updated");
        Ok(Document::from_value(response)?)
    }

    /// Delete a workflow.
    ///
    /// The workflow is fetched first; an active workflow is only deleted
    /// with [`Confirmation::Forced`]. Returns the workflow as it was before
    /// deletion.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] without contacting the server
    /// when `confirmation` is [`Confirmation::None`].
    pub async fn delete_workflow(
        &self,
        workflow_id: &str,
        confirmation: Confirmation,
    ) -> Result<Document<Workflow>> {
        confirmation.require()?;

        let workflow = self.get_workflow(workflow_id).await?;
        if workflow.active && confirmation != Confirmation::Forced {
            return Err(ClientError::Validation(format!(
                "Workflow '{}' is currently active. Use --force to delete active workflows.",
                workflow.name
            )));
        }

        let path = format!("workflows/{}", encode_id(workflow_id));
        self.delete(&path)
            .await
            .map_err(|e| e.for_resource("Workflow", workflow_id))?;
        tracing::info!(workflow_id = %workflow_id, "workflow deleted");
        Ok(workflow)
    }

    /// Activate a workflow. Activating an active workflow is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] if the workflow does not exist.
    pub async fn activate_workflow(&self, workflow_id: &str) -> Result<Document<Workflow>> {
        self.set_active(workflow_id, "activate").await
    }

    /// Deactivate a workflow. Deactivating an inactive workflow is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] if the workflow does not exist.
    pub async fn deactivate_workflow(&self, workflow_id: &str) -> Result<Document<Workflow>> {
        self.set_active(workflow_id, "deactivate").await
    }

    async fn set_active(&self, workflow_id: &str, action: &str) -> Result<Document<Workflow>> {
        let path = format!("workflows/{}/{}", encode_id(workflow_id), action);
        let body = self
            .post(&path, &json!({}))
            .await
            .map_err(|e| e.for_resource("Workflow", workflow_id))?;
        tracing::debug!(workflow_id = %workflow_id, action, "workflow state changed");
        Ok(Document::from_value(body)?)
    }
}
