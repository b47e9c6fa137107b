//! Error types for the n8n client.

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when using the n8n client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Local setup is missing or incomplete.
    #[error("{0}")]
    Configuration(String),

    /// Caller-supplied input was rejected, or the server answered 400.
    #[error("{0}")]
    Validation(String),

    /// The server answered 404 for a specific resource.
    #[error("{resource} '{id}' not found")]
    NotFound {
        /// Resource kind (e.g. "Workflow").
        resource: &'static str,
        /// Identifier that was requested.
        id: String,
    },

    /// Server returned any other non-success response.
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from server.
        message: String,
    },

    /// Raw non-success response from the transport layer.
    ///
    /// Resource operations translate this into [`ClientError::NotFound`],
    /// [`ClientError::Validation`] or [`ClientError::Api`].
    #[error("HTTP status {status}: {body}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// Network-level failure (timeout, refused connection, DNS).
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Polling did not observe a terminal status before the deadline.
    #[error("Execution timed out after {} seconds", .timeout.as_secs())]
    Timeout {
        /// The configured deadline.
        timeout: Duration,
    },

    /// A request was attempted outside of a connection scope.
    #[error("Client must be connected before issuing requests")]
    NotInitialized,

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A header value (such as the API key) could not be encoded.
    #[error("Invalid header value: {0}")]
    InvalidHeader(String),

    /// Failed to deserialize response.
    #[error("Failed to deserialize response: {0}")]
    Deserialize(#[from] serde_json::Error),
}

impl ClientError {
    /// Translate a raw transport status error into a resource-level error.
    ///
    /// Other variants pass through untouched.
    pub(crate) fn for_resource(self, resource: &'static str, id: &str) -> Self {
        match self {
            ClientError::HttpStatus { status: 404, .. } => ClientError::NotFound {
                resource,
                id: id.to_string(),
            },
            other => other.for_collection(),
        }
    }

    /// Same as [`ClientError::for_resource`] for requests that do not name a
    /// single resource; a 404 stays an API error.
    pub(crate) fn for_collection(self) -> Self {
        match self {
            ClientError::HttpStatus { status: 400, body } => {
                ClientError::Validation(server_message(&body).unwrap_or(body))
            }
            ClientError::HttpStatus { status, body } => ClientError::Api {
                status,
                message: server_message(&body).unwrap_or(body),
            },
            other => other,
        }
    }
}

/// Extract the `message` field of a JSON error body, if present.
fn server_message(body: &str) -> Option<String> {
    let json: serde_json::Value = serde_json::from_str(body).ok()?;
    json.get("message")?.as_str().map(str::to_string)
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
