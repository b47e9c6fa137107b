//! Trigger-and-poll workflow execution.
//!
//! A trigger submits an execution request and, when asked to wait, polls
//! the execution until it reaches a terminal status or the deadline passes:
//!
//! ```text
//! Submitted ──(no wait / no execution id)──> done
//!     │
//!     v
//! Polling ──(terminal status)──> Succeeded | Failed | Cancelled
//!     │
//!     └──(deadline)──> TimedOut
//! ```

use crate::client::{Client, encode_id};
use crate::error::{ClientError, Result};
use crate::payload::JsonObject;
use crate::types::{Document, Execution, ExecutionStatus, TriggerResponse};
use std::fmt;
use std::time::Duration;
use tokio::time::{Instant, sleep};

/// Default delay between two polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Default deadline for waiting on an execution.
pub const DEFAULT_TRIGGER_TIMEOUT: Duration = Duration::from_secs(300);

/// How a trigger behaves after submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerOptions {
    /// Poll until the execution finishes.
    pub wait: bool,
    /// Deadline measured from submission.
    pub timeout: Duration,
    /// Delay between polls.
    pub poll_interval: Duration,
}

impl Default for TriggerOptions {
    fn default() -> Self {
        Self {
            wait: false,
            timeout: DEFAULT_TRIGGER_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl TriggerOptions {
    /// Wait for completion.
    #[must_use]
    pub fn wait(mut self) -> Self {
        self.wait = true;
        self
    }

    /// Set the deadline.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the poll interval.
    #[must_use]
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}

/// Terminal state of a polled execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalState {
    /// Status `success`.
    Succeeded,
    /// Status `error` or `crashed`.
    Failed,
    /// Status `canceled`.
    Cancelled,
}

impl TerminalState {
    /// Map a status to a terminal state; `None` while still in progress.
    pub fn from_status(status: &ExecutionStatus) -> Option<Self> {
        match status {
            ExecutionStatus::Success => Some(Self::Succeeded),
            ExecutionStatus::Error | ExecutionStatus::Crashed => Some(Self::Failed),
            ExecutionStatus::Canceled => Some(Self::Cancelled),
            _ => None,
        }
    }
}

impl fmt::Display for TerminalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Succeeded => write!(f, "succeeded"),
            Self::Failed => write!(f, "failed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Result of [`Client::trigger_workflow`].
#[derive(Debug, Clone, PartialEq)]
pub enum TriggerOutcome {
    /// The submission response, returned when not waiting or when the
    /// server did not report an execution ID.
    Submitted(Document<TriggerResponse>),
    /// The execution reached a terminal status.
    Finished {
        /// Which terminal state was reached.
        state: TerminalState,
        /// The execution as last polled.
        execution: Document<Execution>,
    },
}

impl TriggerOutcome {
    /// JSON form: the submission response or the final execution, as the
    /// server sent it.
    pub fn to_json(&self) -> &serde_json::Value {
        match self {
            Self::Submitted(response) => response.json(),
            Self::Finished { execution, .. } => execution.json(),
        }
    }
}

impl Client {
    /// Trigger a workflow execution.
    ///
    /// `input` is sent as the request body (`{}` when absent). With
    /// [`TriggerOptions::wait`] the execution is polled immediately and then
    /// every poll interval until it reaches a terminal status. A missing or
    /// empty execution ID ends the trigger with the submission response.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Timeout`] if no terminal status is seen before
    /// the deadline. Any failing poll aborts the loop with its error.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use n8n_client::{Client, TriggerOptions, TriggerOutcome};
    /// # use std::time::Duration;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let mut client = Client::new("http://localhost:5678")?;
    /// let session = client.connect()?;
    /// let options = TriggerOptions::default()
    ///     .wait()
    ///     .with_timeout(Duration::from_secs(60));
    ///
    /// match session.trigger_workflow("123", None, options).await? {
    ///     TriggerOutcome::Finished { state, execution } => {
    ///         println!("Execution {} {}", execution.id, state);
    ///     }
    ///     TriggerOutcome::Submitted(response) => println!("{:?}", response),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn trigger_workflow(
        &self,
        workflow_id: &str,
        input: Option<&JsonObject>,
        options: TriggerOptions,
    ) -> Result<TriggerOutcome> {
        let started = Instant::now();
        let empty = JsonObject::default();
        let body = input.unwrap_or(&empty);

        let path = format!("workflows/{}/execute", encode_id(workflow_id));
        let response = self
            .post(&path, body)
            .await
            .map_err(|e| e.for_resource("Workflow", workflow_id))?;
        let response: Document<TriggerResponse> = Document::from_value(response)?;
        tracing::info!(
            workflow_id = %workflow_id,
            execution_id = ?response.execution_id,
            "execution submitted"
        );

        let execution_id = match response.execution_id {
            Some(ref id) if options.wait && !id.is_empty() => id.clone(),
            _ => return Ok(TriggerOutcome::Submitted(response)),
        };

        self.poll_execution(&execution_id, started, options).await
    }

    async fn poll_execution(
        &self,
        execution_id: &str,
        started: Instant,
        options: TriggerOptions,
    ) -> Result<TriggerOutcome> {
        let deadline = started + options.timeout;
        let mut attempts: u32 = 0;

        loop {
            let now = Instant::now();
            if now >= deadline {
                tracing::warn!(
                    execution_id = %execution_id,
                    attempts,
                    timeout_secs = options.timeout.as_secs(),
                    "execution timed out"
                );
                return Err(ClientError::Timeout {
                    timeout: options.timeout,
                });
            }

            attempts += 1;
            let execution = self.get_execution(execution_id).await?;
            tracing::debug!(
                execution_id = %execution_id,
                status = %execution.status,
                attempt = attempts,
                "polled execution"
            );

            if let Some(state) = TerminalState::from_status(&execution.status) {
                tracing::info!(execution_id = %execution_id, %state, "execution finished");
                return Ok(TriggerOutcome::Finished { state, execution });
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            sleep(options.poll_interval.min(remaining)).await;
        }
    }
}
