//! Masking of sensitive credential fields.

use serde_json::{Map, Value};

/// Placeholder that replaces sensitive values.
pub const MASK: &str = "***";

/// Lowercase substrings that mark a field name as sensitive.
pub const SENSITIVE_PATTERNS: &[&str] = &[
    "password",
    "secret",
    "token",
    "key",
    "apikey",
    "apisecret",
    "accesstoken",
    "refreshtoken",
    "privatekey",
    "clientsecret",
];

/// Replaces sensitive values in credential data before display.
///
/// A field is sensitive when its lowercased name contains any pattern.
/// Substring matching over-masks (a field named `keyword` is hidden) and
/// cannot catch secret-like names outside the list; extra patterns can be
/// added with [`Masker::with_extra_patterns`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Masker {
    patterns: Vec<String>,
}

impl Default for Masker {
    fn default() -> Self {
        Self {
            patterns: SENSITIVE_PATTERNS.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl Masker {
    /// Add patterns on top of the built-in list.
    ///
    /// Patterns are lowercased; blank ones are skipped.
    #[must_use]
    pub fn with_extra_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for pattern in patterns {
            let pattern = pattern.as_ref().trim().to_lowercase();
            if !pattern.is_empty() && !self.patterns.contains(&pattern) {
                self.patterns.push(pattern);
            }
        }
        self
    }

    /// Active patterns.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Whether a field name is sensitive.
    pub fn is_sensitive(&self, field: &str) -> bool {
        let field = field.to_lowercase();
        self.patterns.iter().any(|p| field.contains(p.as_str()))
    }

    /// Mask a credential data mapping.
    ///
    /// Nested mappings (including mappings inside arrays) are masked
    /// recursively, and everything stored under a sensitive key is masked
    /// whatever its depth. Empty strings and nulls are left as they are.
    pub fn mask_map(&self, data: &Map<String, Value>) -> Map<String, Value> {
        self.mask_entries(data, false)
    }

    /// Mask an arbitrary JSON value.
    ///
    /// Only values reached through a mapping key can be sensitive, so a
    /// bare scalar is returned unchanged.
    pub fn mask_value(&self, value: &Value) -> Value {
        match value {
            Value::Object(map) => Value::Object(self.mask_map(map)),
            Value::Array(items) => Value::Array(items.iter().map(|v| self.mask_value(v)).collect()),
            other => other.clone(),
        }
    }

    fn mask_entries(&self, map: &Map<String, Value>, inherited: bool) -> Map<String, Value> {
        map.iter()
            .map(|(k, v)| (k.clone(), self.mask_field(k, v, inherited)))
            .collect()
    }

    /// Mask the value stored under `key`.
    ///
    /// Array elements inherit the key they are stored under; `inherited`
    /// is set below a sensitive key.
    fn mask_field(&self, key: &str, value: &Value, inherited: bool) -> Value {
        let sensitive = inherited || self.is_sensitive(key);
        match value {
            Value::Object(map) => Value::Object(self.mask_entries(map, sensitive)),
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|v| self.mask_field(key, v, sensitive))
                    .collect(),
            ),
            Value::Null => Value::Null,
            Value::String(s) if s.is_empty() => value.clone(),
            _ if sensitive => Value::String(MASK.to_string()),
            _ => value.clone(),
        }
    }
}
