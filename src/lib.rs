//! # sfauto
//!
//! A Salesforce REST automation client for test-data setup and job
//! orchestration.
//!
//! ## Security
//!
//! - Passwords, secrets and tokens are redacted in Debug output
//! - Tracing spans skip credential parameters
//! - Error messages are sanitised of tokens and session ids
//! - SObject names, field names, record ids and Apex class names are
//!   validated before they reach a URL, a SOQL string or an Apex snippet
//!
//! ## Crates
//!
//! - **sfauto-client** - HTTP core: authenticated requests, error parsing, bounded polling
//! - **sfauto-auth** - OAuth 2.0 password grant and eager configuration loading
//! - **sfauto-rest** - Records, SOQL, composite tree/graph inserts, collection updates, email
//! - **sfauto-tooling** - Anonymous Apex and async job polling
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sfauto::{authenticate, ApiSettings, Credential, SalesforceRestClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = ApiSettings::from_env()?;
//!     let credential = Credential::from_env("DATA_SETUP_SF_ORG")?;
//!     let keys = authenticate(&settings, &credential).await?;
//!
//!     let client = SalesforceRestClient::new(keys)?;
//!     let accounts: Vec<serde_json::Value> = client
//!         .query_all("SELECT Id, Name FROM Account LIMIT 10")
//!         .await?;
//!
//!     for account in accounts {
//!         println!("{}", account["Name"]);
//!     }
//!
//!     Ok(())
//! }
//! ```

#[cfg(feature = "auth")]
pub use sfauto_auth as auth;
#[cfg(feature = "client")]
pub use sfauto_client as client;
#[cfg(feature = "rest")]
pub use sfauto_rest as rest;
#[cfg(feature = "tooling")]
pub use sfauto_tooling as tooling;

#[cfg(feature = "auth")]
pub use sfauto_auth::{authenticate, ApiSettings, Credential, OAuthClient};
#[cfg(feature = "client")]
pub use sfauto_client::{AccessKeyPair, ClientConfig, PollConfig, SalesforceClient};
#[cfg(feature = "rest")]
pub use sfauto_rest::SalesforceRestClient;
#[cfg(feature = "tooling")]
pub use sfauto_tooling::ToolingClient;
