//! Salesforce REST API client.
//!
//! This client wraps `SalesforceClient` from `sfauto-client` and provides
//! typed methods for record CRUD, SOQL queries, composite tree and graph
//! inserts, collection updates and a few standard actions.

use sfauto_client::security::{soql, url as url_security};
use sfauto_client::{AccessKeyPair, ClientConfig, SalesforceClient};

use crate::error::{Error, Result};

mod apex_rest;
mod collections;
mod composite;
mod crud;
mod invocable_actions;
mod picklist;
mod query;

pub use query::ID_BATCH_SIZE;

/// Salesforce REST API client.
///
/// # Example
///
/// ```rust,ignore
/// use sfauto_rest::{RecordFields, SalesforceRestClient};
///
/// let client = SalesforceRestClient::new(keys)?;
///
/// // Query, following every page
/// let cases: Vec<serde_json::Value> = client
///     .query_all("SELECT Id, Subject FROM Case WHERE Status = 'New'")
///     .await?;
///
/// // Create
/// let created = client
///     .create_record("Account", &RecordFields::new().set("Name", "Acme"))
///     .await?;
///
/// // Update
/// client
///     .edit_record("Account", &created.id, &RecordFields::new().set("Name", "Acme Ltd"))
///     .await?;
///
/// // Delete
/// client.delete_record("Account", &created.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct SalesforceRestClient {
    client: SalesforceClient,
}

impl SalesforceRestClient {
    /// Create a new REST client for an authenticated key pair.
    pub fn new(keys: AccessKeyPair) -> Result<Self> {
        let client = SalesforceClient::new(keys)?;
        Ok(Self { client })
    }

    /// Create a new REST client with custom HTTP configuration.
    pub fn with_config(keys: AccessKeyPair, config: ClientConfig) -> Result<Self> {
        let client = SalesforceClient::with_config(keys, config)?;
        Ok(Self { client })
    }

    /// Create a REST client from an existing SalesforceClient.
    pub fn from_client(client: SalesforceClient) -> Self {
        Self { client }
    }

    /// Get the underlying SalesforceClient.
    pub fn inner(&self) -> &SalesforceClient {
        &self.client
    }

    pub fn instance_url(&self) -> &str {
        self.client.instance_url()
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }
}

fn check_sobject(sobject: &str) -> Result<()> {
    if soql::is_safe_sobject_name(sobject) {
        Ok(())
    } else {
        Err(Error::invalid_input(format!(
            "invalid SObject name: {sobject:?}"
        )))
    }
}

fn check_id(id: &str) -> Result<()> {
    if url_security::is_valid_salesforce_id(id) {
        Ok(())
    } else {
        Err(Error::invalid_input(format!("invalid record id: {id:?}")))
    }
}

fn check_field(field: &str) -> Result<()> {
    if soql::is_safe_field_name(field) {
        Ok(())
    } else {
        Err(Error::invalid_input(format!("invalid field name: {field:?}")))
    }
}
