//! Config commands - show and set local configuration.

use crate::config::Config;
use crate::output::{CONFIG_FIELDS, Output};
use anyhow::{Context, Result};
use serde_json::json;
use std::path::Path;

/// Show the effective configuration with the API key masked.
pub fn show(explicit: Option<&Path>) -> Result<Output> {
    let config = Config::load(explicit)?.masked();
    let path = Config::resolve_path(explicit);

    let mut value = serde_json::to_value(&config)?;
    if let Some(map) = value.as_object_mut() {
        map.insert(
            "path".to_string(),
            json!(path.map(|p| p.display().to_string())),
        );
    }

    Ok(Output::Record {
        value,
        fields: CONFIG_FIELDS,
    })
}

/// Update values in the configuration file.
///
/// Only the file is read and written; environment overrides are not
/// persisted.
pub fn set(
    explicit: Option<&Path>,
    url: Option<String>,
    api_key: Option<String>,
    timeout: Option<u64>,
) -> Result<Output> {
    if url.is_none() && api_key.is_none() && timeout.is_none() {
        anyhow::bail!("Nothing to set. Use --url, --api-key or --timeout");
    }

    let path = Config::resolve_path(explicit)
        .context("Could not determine the configuration directory; use --config")?;
    let mut config = Config::load_file(&path)?;

    if let Some(url) = url {
        n8n_client::Client::new(url.as_str())?;
        config.api_url = Some(n8n_client::normalize_base_url(&url));
    }
    if let Some(key) = api_key {
        config.api_key = Some(key);
    }
    if let Some(secs) = timeout {
        config.timeout_secs = Some(secs);
    }
    config.save(&path)?;

    Ok(Output::Message(format!(
        "Configuration saved to {}",
        path.display()
    )))
}
