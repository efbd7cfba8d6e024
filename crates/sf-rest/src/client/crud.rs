use base64::Engine;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::{Error, ErrorKind, Result};
use crate::sobject::{AttachmentBody, CreateResult, Record};
use crate::user_password::{SetPasswordRequest, SetPasswordResponse};

impl super::SalesforceRestClient {
    /// Create a new record.
    ///
    /// A rejection is reported as [`ErrorKind::RecordCreation`] with the
    /// structured errors Salesforce returned.
    #[instrument(skip(self, fields))]
    pub async fn create_record<T: Serialize + ?Sized>(
        &self,
        sobject: &str,
        fields: &T,
    ) -> Result<CreateResult> {
        super::check_sobject(sobject)?;
        let url = self.client.rest_url(&format!("sobjects/{sobject}/"));

        let result: CreateResult = self.client.post_json(&url, fields).await.map_err(|e| {
            let errors = e.api_errors().to_vec();
            Error::from_client(e, |message| ErrorKind::RecordCreation {
                sobject: sobject.to_string(),
                message,
                errors,
            })
        })?;

        if !result.success {
            let message = result
                .errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(Error::new(ErrorKind::RecordCreation {
                sobject: sobject.to_string(),
                message,
                errors: result.errors,
            }));
        }

        debug!(id = %result.id, "Created record");
        Ok(result)
    }

    /// Get a record by ID.
    #[instrument(skip(self))]
    pub async fn get_record(&self, sobject: &str, id: &str) -> Result<Record> {
        super::check_sobject(sobject)?;
        super::check_id(id)?;
        let url = self.client.rest_url(&format!("sobjects/{sobject}/{id}"));

        self.client.get_json(&url).await.map_err(|e| {
            Error::from_client(e, |message| ErrorKind::RecordFetch {
                sobject: sobject.to_string(),
                id: id.to_string(),
                message,
            })
        })
    }

    /// Update fields of an existing record.
    #[instrument(skip(self, fields))]
    pub async fn edit_record<T: Serialize + ?Sized>(
        &self,
        sobject: &str,
        id: &str,
        fields: &T,
    ) -> Result<()> {
        super::check_sobject(sobject)?;
        super::check_id(id)?;
        let url = self.client.rest_url(&format!("sobjects/{sobject}/{id}"));

        self.client.patch_json(&url, fields).await.map_err(|e| {
            Error::from_client(e, |message| ErrorKind::RecordUpdate {
                sobject: sobject.to_string(),
                id: id.to_string(),
                message,
            })
        })
    }

    /// Delete a record.
    #[instrument(skip(self))]
    pub async fn delete_record(&self, sobject: &str, id: &str) -> Result<()> {
        super::check_sobject(sobject)?;
        super::check_id(id)?;
        let url = self.client.rest_url(&format!("sobjects/{sobject}/{id}"));

        self.client.delete_request(&url).await.map_err(|e| {
            Error::from_client(e, |message| ErrorKind::RecordDeletion {
                sobject: sobject.to_string(),
                id: id.to_string(),
                message,
            })
        })?;
        debug!("Deleted record");
        Ok(())
    }

    /// Attach a file to a record as a classic `Attachment`.
    #[instrument(skip(self, content), fields(bytes = content.len()))]
    pub async fn add_attachment(
        &self,
        parent_id: &str,
        name: &str,
        content: &[u8],
    ) -> Result<CreateResult> {
        super::check_id(parent_id)?;
        let body = AttachmentBody {
            name,
            body: base64::engine::general_purpose::STANDARD.encode(content),
            parent_id,
        };
        self.create_record("Attachment", &body).await
    }

    /// Set a user's password.
    #[instrument(skip(self, new_password))]
    pub async fn update_user_password(
        &self,
        user_id: &str,
        new_password: &str,
    ) -> Result<SetPasswordResponse> {
        super::check_id(user_id)?;
        let url = self
            .client
            .rest_url(&format!("sobjects/User/{user_id}/password"));
        let request = SetPasswordRequest { new_password };

        let response: Option<SetPasswordResponse> = self
            .client
            .post_json_optional(&url, &request)
            .await
            .map_err(|e| {
                Error::from_client(e, |message| ErrorKind::PasswordUpdate {
                    user_id: user_id.to_string(),
                    message,
                })
            })?;
        Ok(response.unwrap_or_default())
    }
}
