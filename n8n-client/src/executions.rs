//! Execution inspection operations.

use crate::client::{Client, encode_id};
use crate::error::{ClientError, Result};
use crate::types::{Document, Execution, ExecutionStatus, ListEnvelope};

/// Default page size for execution listings.
pub const DEFAULT_EXECUTION_LIMIT: u32 = 20;

/// Server-side filter for [`Client::list_executions`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionFilter {
    /// Restrict to one workflow.
    pub workflow_id: Option<String>,
    /// Restrict to one status.
    pub status: Option<ExecutionStatus>,
    /// Maximum number of executions returned.
    pub limit: Option<u32>,
}

impl ExecutionFilter {
    /// Build the query string, including the leading `?` when non-empty.
    fn query(&self) -> String {
        let mut params = Vec::new();
        if let Some(ref workflow_id) = self.workflow_id {
            params.push(format!("workflowId={}", urlencoding::encode(workflow_id)));
        }
        if let Some(ref status) = self.status {
            params.push(format!("status={}", urlencoding::encode(status.as_str())));
        }
        if let Some(limit) = self.limit {
            params.push(format!("limit={}", limit));
        }

        if params.is_empty() {
            String::new()
        } else {
            format!("?{}", params.join("&"))
        }
    }
}

impl Client {
    /// Get an execution by ID.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] if the execution does not exist.
    pub async fn get_execution(&self, execution_id: &str) -> Result<Document<Execution>> {
        let path = format!("executions/{}", encode_id(execution_id));
        let body = self
            .get(&path)
            .await
            .map_err(|e| e.for_resource("Execution", execution_id))?;
        Ok(Document::from_value(body)?)
    }

    /// List executions, newest first as ordered by the server.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use n8n_client::{Client, ExecutionFilter, ExecutionStatus};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let mut client = Client::new("http://localhost:5678")?;
    /// let session = client.connect()?;
    /// let filter = ExecutionFilter {
    ///     status: Some(ExecutionStatus::Error),
    ///     limit: Some(5),
    ///     ..Default::default()
    /// };
    /// for execution in session.list_executions(&filter).await? {
    ///     println!("{} {}", execution.id, execution.status);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list_executions(
        &self,
        filter: &ExecutionFilter,
    ) -> Result<Vec<Document<Execution>>> {
        let path = format!("executions{}", filter.query());
        let body = self
            .get(&path)
            .await
            .map_err(ClientError::for_collection)?;
        let envelope: ListEnvelope<Document<Execution>> = serde_json::from_value(body)?;
        Ok(envelope.data)
    }
}
