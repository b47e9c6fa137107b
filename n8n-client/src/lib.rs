//! Type-safe Rust client for the n8n workflow automation REST API.
//!
//! # Features
//!
//! - Builder-style client with API key authentication
//! - Connection scopes that release the HTTP transport on drop
//! - Workflow management (list, get, create, update, delete, activate)
//! - Trigger-and-poll execution with a hard deadline
//! - Credential management with masking of sensitive fields
//! - Execution inspection
//!
//! # Example
//!
//! ```no_run
//! use n8n_client::{Client, TriggerOptions, TriggerOutcome, WorkflowFilter};
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut client = Client::new("http://localhost:5678")?
//!     .with_api_key("my-secret-key");
//! let session = client.connect()?;
//!
//! // Active workflows only
//! let filter = WorkflowFilter::default().with_active(true);
//! for workflow in session.list_workflows(&filter).await? {
//!     println!("{}: {}", workflow.id, workflow.name);
//! }
//!
//! // Run a workflow and wait for it
//! let options = TriggerOptions::default()
//!     .wait()
//!     .with_timeout(Duration::from_secs(120));
//! if let TriggerOutcome::Finished { state, execution } =
//!     session.trigger_workflow("123", None, options).await?
//! {
//!     println!("Execution {} {}", execution.id, state);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! All operations return `Result<T, ClientError>`:
//!
//! ```no_run
//! # use n8n_client::{Client, ClientError};
//! # async fn example() -> Result<(), ClientError> {
//! # let mut client = Client::new("http://localhost:5678")?;
//! # let session = client.connect()?;
//! match session.get_workflow("42").await {
//!     Ok(workflow) => println!("Found: {}", workflow.name),
//!     Err(ClientError::NotFound { .. }) => println!("Workflow not found"),
//!     Err(e) => println!("Error: {}", e),
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod credentials;
mod error;
mod executions;
mod mask;
mod payload;
mod trigger;
mod types;
mod workflows;

// Re-export the main types
pub use client::{API_KEY_HEADER, Client, DEFAULT_TIMEOUT, Session, normalize_base_url};
pub use error::{ClientError, Result};
pub use executions::{DEFAULT_EXECUTION_LIMIT, ExecutionFilter};
pub use mask::{MASK, Masker, SENSITIVE_PATTERNS};
pub use payload::{JsonObject, WorkflowDefinition};
pub use trigger::{
    DEFAULT_POLL_INTERVAL, DEFAULT_TRIGGER_TIMEOUT, TerminalState, TriggerOptions, TriggerOutcome,
};
pub use types::{
    Confirmation, Credential, CredentialSchema, Document, Execution, ExecutionStatus, SchemaField,
    Tag, TriggerResponse, Workflow,
};
pub use workflows::{WorkflowFilter, WorkflowUpdate};
