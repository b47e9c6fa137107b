//! Credential commands - list, show, create, delete, schema.
//!
//! Credential data is masked by the client before it reaches these
//! commands.

use super::input::InputSource;
use crate::config::Config;
use crate::output::{CREDENTIAL_COLUMNS, CREDENTIAL_FIELDS, Output, SCHEMA_COLUMNS};
use anyhow::Result;
use n8n_client::Confirmation;

/// List credentials.
pub async fn list(config: &Config, credential_type: Option<&str>) -> Result<Output> {
    let mut client = config.client()?;
    let session = client.connect()?;
    let credentials = session.list_credentials(credential_type).await?;

    Ok(Output::Table {
        rows: credentials
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<_, _>>()?,
        columns: CREDENTIAL_COLUMNS,
    })
}

/// Show a credential.
pub async fn show(config: &Config, id: &str) -> Result<Output> {
    let mut client = config.client()?;
    let session = client.connect()?;
    let credential = session.get_credential(id).await?;

    Ok(Output::Record {
        value: serde_json::to_value(&credential)?,
        fields: CREDENTIAL_FIELDS,
    })
}

/// Create a credential.
pub async fn create(
    config: &Config,
    credential_type: &str,
    name: &str,
    source: InputSource,
) -> Result<Output> {
    let data = source.read_object("credential data")?;

    let mut client = config.client()?;
    let session = client.connect()?;
    let credential = session.create_credential(name, credential_type, &data).await?;

    Ok(Output::Record {
        value: serde_json::to_value(&credential)?,
        fields: CREDENTIAL_FIELDS,
    })
}

/// Delete a credential.
pub async fn delete(config: &Config, id: &str, confirm: bool, force: bool) -> Result<Output> {
    let confirmation = Confirmation::from_flags(confirm, force);
    if confirmation == Confirmation::None {
        anyhow::bail!(
            "Deletion requires confirmation. Use --confirm flag or --force for scripting."
        );
    }

    let mut client = config.client()?;
    let session = client.connect()?;
    session.delete_credential(id, confirmation).await?;

    Ok(Output::Message(format!(
        "Credential {} deleted successfully.",
        id
    )))
}

/// Show the schema of a credential type.
///
/// JSON output is the schema as returned; table output lists its fields.
pub async fn schema(config: &Config, credential_type: &str) -> Result<Output> {
    let mut client = config.client()?;
    let session = client.connect()?;
    let schema = session.credential_schema(credential_type).await?;

    Ok(Output::Projection {
        json: serde_json::to_value(&schema)?,
        rows: schema
            .fields()
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<_, _>>()?,
        columns: SCHEMA_COLUMNS,
    })
}
