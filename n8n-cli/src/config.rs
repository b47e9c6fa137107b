//! Local configuration: YAML file plus environment overrides.

use anyhow::{Context, Result};
use n8n_client::{Client, ClientError, MASK, Masker};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding the instance URL.
pub const API_URL_ENV: &str = "N8N_API_URL";

/// Environment variable overriding the API key.
pub const API_KEY_ENV: &str = "N8N_API_KEY";

/// Environment variable pointing at an alternative config file.
pub const CONFIG_PATH_ENV: &str = "N8N_CLI_CONFIG";

/// Contents of `config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the n8n instance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// API key sent in the `X-N8N-API-KEY` header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Per-request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Extra field-name substrings treated as sensitive.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sensitive_fields: Vec<String>,
}

impl Config {
    /// Default location: `<config dir>/n8n-cli/config.yaml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("n8n-cli").join("config.yaml"))
    }

    /// The explicit path if given, else the default location.
    pub fn resolve_path(explicit: Option<&Path>) -> Option<PathBuf> {
        explicit.map(Path::to_path_buf).or_else(Self::default_path)
    }

    /// Read a config file. A missing file yields an empty configuration.
    pub fn load_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load the effective configuration: file contents with environment
    /// overrides applied.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match Self::resolve_path(explicit) {
            Some(path) => Self::load_file(&path)?,
            None => Self::default(),
        };
        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Apply `N8N_API_URL` and `N8N_API_KEY`; empty values are ignored.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_empty(API_URL_ENV) {
            self.api_url = Some(url);
        }
        if let Some(key) = non_empty(API_KEY_ENV) {
            self.api_key = Some(key);
        }
    }

    /// Write the configuration, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        tracing::info!(path = %path.display(), "configuration saved");
        Ok(())
    }

    /// The instance URL, or a configuration error if none is set.
    pub fn require(&self) -> n8n_client::Result<&str> {
        match self.api_url.as_deref() {
            Some(url) if !url.trim().is_empty() => Ok(url),
            _ => Err(ClientError::Configuration(format!(
                "API URL not configured. Set {API_URL_ENV} or run: n8n-cli config set --url <URL>"
            ))),
        }
    }

    /// Build a client from the configuration.
    ///
    /// A missing API key is allowed; requests are then sent unauthenticated.
    pub fn client(&self) -> Result<Client> {
        let url = self.require()?;

        let mut client = Client::new(url)?
            .with_masker(Masker::default().with_extra_patterns(&self.sensitive_fields));
        match self.api_key.as_deref() {
            Some(key) if !key.is_empty() => client = client.with_api_key(key),
            _ => tracing::warn!(
                "no API key configured; set {} or run: n8n-cli config set --api-key <KEY>",
                API_KEY_ENV
            ),
        }
        if let Some(secs) = self.timeout_secs {
            client = client.with_timeout(Duration::from_secs(secs));
        }
        Ok(client)
    }

    /// Copy with the API key replaced by the mask, for display.
    pub fn masked(&self) -> Self {
        Self {
            api_key: self.api_key.as_ref().map(|_| MASK.to_string()),
            ..self.clone()
        }
    }
}
