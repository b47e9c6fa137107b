//! Reading JSON documents from files or stdin.

use anyhow::{Context, Result};
use n8n_client::JsonObject;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Where a JSON document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// A file on disk.
    File(PathBuf),
    /// Standard input.
    Stdin,
}

impl InputSource {
    /// Pick the source from a `--file`/`--stdin` pair; `None` if neither.
    pub fn from_flags(file: Option<PathBuf>, stdin: bool) -> Option<Self> {
        match (file, stdin) {
            (Some(path), _) => Some(Self::File(path)),
            (None, true) => Some(Self::Stdin),
            (None, false) => None,
        }
    }

    /// Read the raw text.
    pub fn read_text(&self) -> Result<String> {
        match self {
            Self::File(path) => read_file(path),
            Self::Stdin => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .context("Failed to read input from stdin")?;
                Ok(text)
            }
        }
    }

    /// Read and parse a JSON object. `what` names the document in errors.
    pub fn read_object(&self, what: &str) -> Result<JsonObject> {
        let text = self.read_text()?;
        Ok(JsonObject::parse(&text, what)?)
    }
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))
}
