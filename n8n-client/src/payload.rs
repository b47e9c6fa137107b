//! Validation of caller-supplied JSON payloads.
//!
//! Everything here runs before a request is built, so a rejected payload
//! never reaches the network.

use crate::error::{ClientError, Result};
use serde::Serialize;
use serde_json::{Map, Value};

/// A JSON document whose root is known to be an object.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct JsonObject(Map<String, Value>);

impl JsonObject {
    /// Parse text into an object.
    ///
    /// `what` names the document in error messages (e.g. "workflow").
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] for empty input, malformed JSON
    /// (with line and column) or a root that is not an object.
    pub fn parse(text: &str, what: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Err(ClientError::Validation(format!(
                "No input provided - {what} JSON is empty"
            )));
        }

        let value: Value = serde_json::from_str(text).map_err(|e| {
            ClientError::Validation(format!(
                "Invalid JSON - {} at line {}, column {}",
                syntax_message(&e),
                e.line(),
                e.column()
            ))
        })?;

        Self::from_value(value, what)
    }

    /// Accept an already-parsed value if it is an object.
    pub fn from_value(value: Value, what: &str) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            _ => Err(ClientError::Validation(format!(
                "Invalid JSON - {what} must be an object, not a list or primitive"
            ))),
        }
    }

    /// Borrow the underlying map.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Take the underlying map.
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for JsonObject {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// serde_json appends " at line X column Y" to its messages; drop it so the
/// position is reported once.
fn syntax_message(err: &serde_json::Error) -> String {
    let message = err.to_string();
    match message.rfind(" at line ") {
        Some(idx) => message[..idx].to_string(),
        None => message,
    }
}

/// A workflow definition that passed structural validation.
///
/// Always contains `nodes`. Definitions built for creation also carry a
/// `name`; definitions built for a full update never carry an `id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct WorkflowDefinition(Map<String, Value>);

impl WorkflowDefinition {
    /// Validate a definition for creation.
    ///
    /// A non-empty `name_override` replaces the definition's name;
    /// otherwise the definition must name itself.
    pub fn for_create(object: JsonObject, name_override: Option<&str>) -> Result<Self> {
        let mut map = require_nodes(object)?;

        match name_override.filter(|n| !n.is_empty()) {
            Some(name) => {
                map.insert("name".to_string(), Value::String(name.to_string()));
            }
            None if !map.contains_key("name") => {
                return Err(ClientError::Validation(
                    "Workflow definition missing 'name'. Use --name to specify.".to_string(),
                ));
            }
            None => {}
        }

        Ok(Self(map))
    }

    /// Validate a definition for a full-body update.
    ///
    /// Any `id` field is dropped; the path parameter is authoritative.
    pub fn for_update(object: JsonObject) -> Result<Self> {
        let mut map = require_nodes(object)?;
        map.remove("id");
        Ok(Self(map))
    }

    /// Workflow name, if the definition has one.
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    /// Borrow the underlying map.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub(crate) fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

fn require_nodes(object: JsonObject) -> Result<Map<String, Value>> {
    let map = object.into_map();
    if !map.contains_key("nodes") {
        return Err(ClientError::Validation(
            "Workflow definition missing required field 'nodes'".to_string(),
        ));
    }
    Ok(map)
}
