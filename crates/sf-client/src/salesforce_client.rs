//! High-level Salesforce client with typed HTTP methods.
//!
//! `SalesforceClient` binds an [`AccessKeyPair`] to an [`SfHttpClient`] and
//! provides typed JSON methods for API interactions.
//!
//! ## Security
//!
//! - Access tokens are redacted in Debug output
//! - Request bodies are skipped in tracing spans

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::instrument;

use crate::client::SfHttpClient;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::keys::AccessKeyPair;
use crate::request::RequestBuilder;
use crate::response::Response;

/// Authenticated Salesforce API client.
///
/// Designed to be wrapped by the API-specific crates (sfauto-rest,
/// sfauto-tooling). Cloning is cheap and shares the connection pool.
///
/// # Example
///
/// ```rust,ignore
/// let client = SalesforceClient::new(keys)?;
/// let account: serde_json::Value = client
///     .get_json(&client.rest_url("sobjects/Account/001000000000001AAA"))
///     .await?;
/// ```
#[derive(Clone)]
pub struct SalesforceClient {
    http: SfHttpClient,
    keys: AccessKeyPair,
}

impl std::fmt::Debug for SalesforceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SalesforceClient")
            .field("keys", &self.keys)
            .finish_non_exhaustive()
    }
}

impl SalesforceClient {
    /// Create a new client for the given key pair.
    pub fn new(keys: AccessKeyPair) -> Result<Self> {
        Self::with_config(keys, ClientConfig::default())
    }

    /// Create a new client with custom HTTP configuration.
    pub fn with_config(keys: AccessKeyPair, config: ClientConfig) -> Result<Self> {
        let http = SfHttpClient::new(config)?;
        Ok(Self { http, keys })
    }

    /// The key pair this client authenticates with.
    pub fn keys(&self) -> &AccessKeyPair {
        &self.keys
    }

    pub fn instance_url(&self) -> &str {
        self.keys.instance_url()
    }

    pub fn base_url(&self) -> &str {
        self.keys.base_url()
    }

    /// Build the full URL for a path.
    ///
    /// Paths starting with `/` are resolved against the instance URL (this
    /// is the shape of `nextRecordsUrl`); absolute URLs pass through.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.keys.instance_url(), path)
        } else {
            format!("{}/{}", self.keys.instance_url(), path)
        }
    }

    /// Build a URL under the versioned REST base.
    ///
    /// Example: `rest_url("sobjects/Account")` -> `<base_url>/sobjects/Account`
    pub fn rest_url(&self, path: &str) -> String {
        format!("{}/{}", self.keys.base_url(), path.trim_start_matches('/'))
    }

    // =========================================================================
    // Base HTTP Methods (with authentication)
    // =========================================================================

    /// Create a GET request builder with authentication.
    pub fn get(&self, url: &str) -> RequestBuilder {
        self.http.get(url).authorization(self.keys.authorization_header())
    }

    /// Create a POST request builder with authentication.
    pub fn post(&self, url: &str) -> RequestBuilder {
        self.http.post(url).authorization(self.keys.authorization_header())
    }

    /// Create a PATCH request builder with authentication.
    pub fn patch(&self, url: &str) -> RequestBuilder {
        self.http.patch(url).authorization(self.keys.authorization_header())
    }

    /// Create a DELETE request builder with authentication.
    pub fn delete(&self, url: &str) -> RequestBuilder {
        self.http.delete(url).authorization(self.keys.authorization_header())
    }

    /// Execute a request and return the raw response.
    pub async fn execute(&self, request: RequestBuilder) -> Result<Response> {
        self.http.execute(request).await
    }

    // =========================================================================
    // Typed JSON Methods
    // =========================================================================

    /// GET request with JSON response deserialization.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let request = self.get(&self.url(url));
        self.http.send_json(request).await
    }

    /// POST request with JSON body and response.
    #[instrument(skip(self, body), fields(url = %url))]
    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T> {
        let request = self.post(&self.url(url)).json(body)?;
        self.http.send_json(request).await
    }

    /// POST request whose response body may be empty.
    #[instrument(skip(self, body), fields(url = %url))]
    pub async fn post_json_optional<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<Option<T>> {
        let request = self.post(&self.url(url)).json(body)?;
        self.http.execute(request).await?.json_or_none().await
    }

    /// PATCH request with JSON body; success is any 2xx (usually 204).
    #[instrument(skip(self, body), fields(url = %url))]
    pub async fn patch_json<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<()> {
        let request = self.patch(&self.url(url)).json(body)?;
        self.http.execute(request).await?;
        Ok(())
    }

    /// PATCH request with JSON body and JSON response.
    #[instrument(skip(self, body), fields(url = %url))]
    pub async fn patch_json_response<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T> {
        let request = self.patch(&self.url(url)).json(body)?;
        self.http.send_json(request).await
    }

    /// DELETE request; success is any 2xx (usually 204).
    #[instrument(skip(self), fields(url = %url))]
    pub async fn delete_request(&self, url: &str) -> Result<()> {
        let request = self.delete(&self.url(url));
        self.http.execute(request).await?;
        Ok(())
    }

    // =========================================================================
    // Query Helpers
    // =========================================================================

    /// Fetch the first page of a SOQL query.
    pub async fn query<T: DeserializeOwned>(&self, soql: &str) -> Result<QueryResult<T>> {
        let request = self.get(&self.rest_url("query")).query("q", soql);
        self.http.send_json(request).await
    }

    /// Fetch a follow-up page from a `nextRecordsUrl` (instance-relative).
    pub async fn query_more<T: DeserializeOwned>(
        &self,
        next_records_url: &str,
    ) -> Result<QueryResult<T>> {
        self.get_json(next_records_url).await
    }
}

/// One page of a SOQL query result.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueryResult<T = serde_json::Value> {
    /// Total number of records matching the query.
    #[serde(rename = "totalSize", default)]
    pub total_size: u64,

    /// Whether this is the last page.
    pub done: bool,

    /// Instance-relative URL of the next page.
    #[serde(rename = "nextRecordsUrl", default)]
    pub next_records_url: Option<String>,

    /// The records.
    #[serde(default = "Vec::new")]
    pub records: Vec<T>,
}
