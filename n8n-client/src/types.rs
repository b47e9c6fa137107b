//! Type definitions for the n8n client.
//!
//! Responses are read into a [`Document`]: a typed view of the fields the
//! client works with, plus the JSON exactly as the server sent it. Output
//! is always produced from the JSON, so unmodelled fields, numeric ids and
//! explicit nulls survive untouched.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::ops::Deref;

/// A server object: a typed view over the original JSON.
///
/// Field access goes through [`Deref`] to the view. Serializing writes the
/// original JSON back out unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Document<T> {
    view: T,
    json: Value,
}

impl<T: DeserializeOwned> Document<T> {
    /// Read the typed view out of `json`, keeping `json` as is.
    ///
    /// # Errors
    ///
    /// Fails if `json` does not have the shape of `T`.
    pub fn from_value(json: Value) -> serde_json::Result<Self> {
        let view = T::deserialize(&json)?;
        Ok(Self { view, json })
    }
}

impl<T> Document<T> {
    /// The typed view.
    pub fn view(&self) -> &T {
        &self.view
    }

    /// The JSON as received.
    pub fn json(&self) -> &Value {
        &self.json
    }

    /// Consume the document, returning the JSON as received.
    pub fn into_json(self) -> Value {
        self.json
    }
}

impl<T> Deref for Document<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.view
    }
}

impl<T> Serialize for Document<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.json.serialize(serializer)
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Document<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let json = Value::deserialize(deserializer)?;
        Self::from_value(json).map_err(D::Error::custom)
    }
}

/// A workflow as returned by the server.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    /// Workflow identifier.
    #[serde(with = "opaque_id")]
    pub id: String,
    /// Workflow name.
    #[serde(default)]
    pub name: String,
    /// Whether the workflow is active.
    #[serde(default)]
    pub active: bool,
    /// Node definitions.
    #[serde(default)]
    pub nodes: Option<Vec<Value>>,
    /// Connection graph between nodes.
    #[serde(default)]
    pub connections: Option<Value>,
    /// Tags attached to the workflow.
    #[serde(default)]
    pub tags: Option<Vec<Tag>>,
    /// ISO 8601 creation timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
    /// ISO 8601 last-update timestamp.
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Workflow {
    /// Names of the workflow's tags. Tags without a name are skipped.
    pub fn tag_names(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().flatten().filter_map(|t| t.name.as_deref())
    }
}

/// A workflow tag.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Tag {
    /// Tag identifier.
    #[serde(default, with = "opaque_id::option")]
    pub id: Option<String>,
    /// Tag name.
    #[serde(default)]
    pub name: Option<String>,
}

/// A credential as returned by the server.
///
/// `data` is masked by every operation that returns a credential.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    /// Credential identifier.
    #[serde(with = "opaque_id")]
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Credential type (e.g. "httpBasicAuth").
    #[serde(rename = "type", default)]
    pub credential_type: String,
    /// Credential fields.
    #[serde(default)]
    pub data: Option<Map<String, Value>>,
    /// ISO 8601 creation timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
    /// ISO 8601 last-update timestamp.
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Field schema for a credential type.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CredentialSchema {
    /// Field name to field description.
    #[serde(default)]
    pub properties: Map<String, Value>,
    /// Names of required fields.
    #[serde(default)]
    pub required: Vec<String>,
}

/// One field of a [`CredentialSchema`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaField {
    /// Field name.
    pub name: String,
    /// Declared JSON type, if any.
    #[serde(rename = "type")]
    pub field_type: String,
    /// Whether the field is required.
    pub required: bool,
}

impl CredentialSchema {
    /// Flatten the schema into a field list, in declaration order.
    pub fn fields(&self) -> Vec<SchemaField> {
        self.properties
            .iter()
            .map(|(name, property)| SchemaField {
                name: name.clone(),
                field_type: property
                    .get("type")
                    .and_then(Value::as_str)
                    .unwrap_or("any")
                    .to_string(),
                required: self.required.iter().any(|r| r == name),
            })
            .collect()
    }
}

/// An execution as returned by the server.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Execution {
    /// Execution identifier.
    #[serde(with = "opaque_id")]
    pub id: String,
    /// Workflow that was executed.
    #[serde(default, with = "opaque_id::option")]
    pub workflow_id: Option<String>,
    /// Execution status.
    #[serde(default)]
    pub status: ExecutionStatus,
    /// Whether the execution has finished.
    #[serde(default)]
    pub finished: Option<bool>,
    /// Execution mode (e.g. "manual", "trigger").
    #[serde(default)]
    pub mode: Option<String>,
    /// ISO 8601 start timestamp.
    #[serde(default)]
    pub started_at: Option<String>,
    /// ISO 8601 stop timestamp.
    #[serde(default)]
    pub stopped_at: Option<String>,
    /// Node outputs.
    #[serde(default)]
    pub data: Option<Value>,
}

/// Execution status.
///
/// The server owns the set of statuses; values the client does not know
/// are kept verbatim in [`ExecutionStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ExecutionStatus {
    /// Finished successfully.
    Success,
    /// Finished with an error.
    Error,
    /// Currently running.
    Running,
    /// Waiting on an external event.
    Waiting,
    /// Canceled by a user.
    Canceled,
    /// The worker crashed.
    Crashed,
    /// Queued, not started yet.
    New,
    /// Any other server-defined status.
    Other(String),
}

impl ExecutionStatus {
    /// Statuses accepted as list filters.
    pub const FILTERABLE: [&'static str; 5] = ["success", "error", "running", "waiting", "canceled"];

    /// Parse a status, ignoring case.
    pub fn parse(status: &str) -> Self {
        match status.to_lowercase().as_str() {
            "success" => Self::Success,
            "error" => Self::Error,
            "running" => Self::Running,
            "waiting" => Self::Waiting,
            "canceled" => Self::Canceled,
            "crashed" => Self::Crashed,
            "new" => Self::New,
            _ => Self::Other(status.to_string()),
        }
    }

    /// Wire representation.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Running => "running",
            Self::Waiting => "waiting",
            Self::Canceled => "canceled",
            Self::Crashed => "crashed",
            Self::New => "new",
            Self::Other(s) => s,
        }
    }

    /// Whether no further transition can happen.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Success | Self::Error | Self::Crashed | Self::Canceled
        )
    }
}

impl Default for ExecutionStatus {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for ExecutionStatus {
    fn from(status: String) -> Self {
        Self::parse(&status)
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response from the execute endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TriggerResponse {
    /// Identifier of the started execution, if the server returned one.
    #[serde(rename = "executionId", default, with = "opaque_id::option")]
    pub execution_id: Option<String>,
}

/// Confirmation given for a destructive operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Confirmation {
    /// Nothing was confirmed; the operation is refused.
    #[default]
    None,
    /// The caller confirmed the operation.
    Confirmed,
    /// The caller confirmed and asked to skip safety checks.
    Forced,
}

impl Confirmation {
    /// Build from the `--confirm` and `--force` flags.
    pub fn from_flags(confirm: bool, force: bool) -> Self {
        match (confirm, force) {
            (_, true) => Self::Forced,
            (true, false) => Self::Confirmed,
            (false, false) => Self::None,
        }
    }

    pub(crate) fn require(self) -> crate::Result<()> {
        match self {
            Self::None => Err(crate::ClientError::Validation(
                "Deletion requires confirmation. Use --confirm flag or --force for scripting."
                    .to_string(),
            )),
            _ => Ok(()),
        }
    }
}

/// Server list responses wrap their items in `data`.
#[derive(Debug, Deserialize)]
pub(crate) struct ListEnvelope<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

/// Identifiers arrive as strings or numbers; the client treats them as
/// opaque strings.
pub(crate) mod opaque_id {
    use serde::de::{self, Visitor};
    use serde::Deserializer;
    use std::fmt;

    struct IdVisitor;

    impl Visitor<'_> for IdVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or integer identifier")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<String, E> {
            Ok(value.to_string())
        }

        fn visit_string<E: de::Error>(self, value: String) -> Result<String, E> {
            Ok(value)
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<String, E> {
            Ok(value.to_string())
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<String, E> {
            Ok(value.to_string())
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        deserializer.deserialize_any(IdVisitor)
    }

    pub mod option {
        use serde::{Deserialize, Deserializer};
        use serde_json::Value;

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<String>, D::Error> {
            Ok(match Option::<Value>::deserialize(deserializer)? {
                Some(Value::String(s)) => Some(s),
                Some(Value::Number(n)) => Some(n.to_string()),
                _ => None,
            })
        }
    }
}
