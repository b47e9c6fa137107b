//! Credential management operations.
//!
//! Every credential returned from here has its `data` passed through the
//! client's [`Masker`](crate::Masker).

use crate::client::{Client, encode_id};
use crate::error::{ClientError, Result};
use crate::payload::JsonObject;
use crate::types::{Confirmation, Credential, CredentialSchema, Document, ListEnvelope};
use serde::Serialize;
use serde_json::Value;

/// Body of a credential creation request.
#[derive(Debug, Serialize)]
struct CreateRequest<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    credential_type: &'a str,
    data: &'a JsonObject,
}

impl Client {
    /// List credentials, optionally restricted to one type.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list_credentials(
        &self,
        credential_type: Option<&str>,
    ) -> Result<Vec<Document<Credential>>> {
        let path = match credential_type {
            Some(t) => format!("credentials?type={}", urlencoding::encode(t)),
            None => "credentials".to_string(),
        };
        let body = self
            .get(&path)
            .await
            .map_err(ClientError::for_collection)?;
        let envelope: ListEnvelope<Value> = serde_json::from_value(body)?;

        envelope
            .data
            .into_iter()
            .map(|c| self.mask_credential(c))
            .collect()
    }

    /// Get a credential by ID.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] if the credential does not exist.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use n8n_client::Client;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let mut client = Client::new("http://localhost:5678")?;
    /// let session = client.connect()?;
    /// let credential = session.get_credential("1").await?;
    /// // Sensitive values are already replaced with "***".
    /// println!("{:?}", credential.data);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_credential(&self, credential_id: &str) -> Result<Document<Credential>> {
        let path = format!("credentials/{}", encode_id(credential_id));
        let body = self
            .get(&path)
            .await
            .map_err(|e| e.for_resource("Credential", credential_id))?;
        self.mask_credential(body)
    }

    /// Create a credential.
    ///
    /// The data is not checked against the type's schema; the server does
    /// that.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] if the server rejects the data.
    pub async fn create_credential(
        &self,
        name: &str,
        credential_type: &str,
        data: &JsonObject,
    ) -> Result<Document<Credential>> {
        let request = CreateRequest {
            name,
            credential_type,
            data,
        };
        let body = self
            .post("credentials", &request)
            .await
            .map_err(ClientError::for_collection)?;
        let credential = self.mask_credential(body)?;
        tracing::info!(credential_id = %credential.id, credential_type, "credential created");
        Ok(credential)
    }

    /// Delete a credential.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] without contacting the server
    /// when `confirmation` is [`Confirmation::None`].
    pub async fn delete_credential(
        &self,
        credential_id: &str,
        confirmation: Confirmation,
    ) -> Result<()> {
        confirmation.require()?;

        let path = format!("credentials/{}", encode_id(credential_id));
        self.delete(&path)
            .await
            .map_err(|e| e.for_resource("Credential", credential_id))?;
        tracing::info!(credential_id = %credential_id, "credential deleted");
        Ok(())
    }

    /// Get the field schema for a credential type.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] for an unknown type.
    pub async fn credential_schema(
        &self,
        credential_type: &str,
    ) -> Result<Document<CredentialSchema>> {
        let path = format!("credentials/schema/{}", encode_id(credential_type));
        let body = self
            .get(&path)
            .await
            .map_err(|e| e.for_resource("Credential type", credential_type))?;
        Ok(Document::from_value(body)?)
    }

    /// Mask the `data` of a credential as received, then read it.
    fn mask_credential(&self, mut credential: Value) -> Result<Document<Credential>> {
        if let Some(data) = credential.get_mut("data") {
            *data = self.masker().mask_value(data);
        }
        Ok(Document::from_value(credential)?)
    }
}
