//! Salesforce Tooling API client.
//!
//! This client wraps `SalesforceRestClient` from `sfauto-rest` and adds
//! anonymous Apex execution plus bounded waiting for the async jobs it
//! starts.

use sfauto_client::{AccessKeyPair, ClientConfig, PollConfig, SalesforceClient};
use sfauto_rest::SalesforceRestClient;

use crate::error::Result;

mod execute;
mod jobs;

/// Salesforce Tooling API client.
///
/// # Example
///
/// ```rust,ignore
/// use sfauto_tooling::ToolingClient;
///
/// let client = ToolingClient::new(keys)?;
///
/// // Start a batch class and wait for it (up to ~7 minutes by default)
/// if !client.submit_batch_job("NightlyCleanupBatch").await? {
///     eprintln!("batch did not complete in time");
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ToolingClient {
    rest: SalesforceRestClient,
    poll: PollConfig,
}

impl ToolingClient {
    /// Create a new Tooling API client for an authenticated key pair.
    pub fn new(keys: AccessKeyPair) -> Result<Self> {
        let rest = SalesforceRestClient::new(keys)?;
        Ok(Self::from_rest(rest))
    }

    /// Create a new Tooling API client with custom HTTP configuration.
    pub fn with_config(keys: AccessKeyPair, config: ClientConfig) -> Result<Self> {
        let rest = SalesforceRestClient::with_config(keys, config)?;
        Ok(Self::from_rest(rest))
    }

    /// Create a Tooling client sharing an existing REST client's connection pool.
    pub fn from_rest(rest: SalesforceRestClient) -> Self {
        Self {
            rest,
            poll: PollConfig::default(),
        }
    }

    /// Replace the job polling schedule.
    pub fn with_poll_config(mut self, poll: PollConfig) -> Self {
        self.poll = poll;
        self
    }

    pub fn poll_config(&self) -> &PollConfig {
        &self.poll
    }

    pub fn rest(&self) -> &SalesforceRestClient {
        &self.rest
    }

    /// Get the underlying SalesforceClient.
    pub fn inner(&self) -> &SalesforceClient {
        self.rest.inner()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::time::Duration;

    use super::ToolingClient;
    use sfauto_client::{AccessKeyPair, PollConfig};

    pub const BASE: &str = "/services/data/v62.0";

    /// Client polling with millisecond delays.
    pub fn client(instance_url: &str, max_attempts: u32) -> ToolingClient {
        let keys = AccessKeyPair::new(
            instance_url,
            "Bearer",
            "00Dtest!token",
            "/services/data",
            "62.0",
        )
        .unwrap();
        ToolingClient::new(keys).unwrap().with_poll_config(
            PollConfig::default()
                .with_max_attempts(max_attempts)
                .with_initial_delay(Duration::from_millis(1)),
        )
    }
}
