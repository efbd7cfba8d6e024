//! # sfauto-auth
//!
//! Authentication for the sfauto Salesforce automation client.
//!
//! ## Security
//!
//! - Passwords, client secrets and tokens are redacted in Debug output
//! - Tracing spans skip credential parameters
//! - Transport errors are stripped of the token URL, which carries the credentials
//!
//! ## Configuration
//!
//! Two explicit objects are built once at process start and passed down:
//!
//! - [`ApiSettings`]: API root, API version and grant-service path
//!   (`REST_ENDPOINT`, `API_VERSION`, `GRANT_SERVICE`)
//! - [`Credential`]: username, password, login URL and connected-app keys
//!   (`<PREFIX>_USERNAME`, `<PREFIX>_PASSWORD`, ...)
//!
//! ## Example
//!
//! ```rust,ignore
//! use sfauto_auth::{ApiSettings, Credential, OAuthClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), sfauto_auth::Error> {
//!     let settings = ApiSettings::from_env()?;
//!     let credential = Credential::from_env("DATA_SETUP_SF_ORG")?;
//!
//!     let keys = OAuthClient::new(settings).authenticate(&credential).await?;
//!     println!("{}", keys.base_url());
//!     Ok(())
//! }
//! ```

mod config;
mod credentials;
mod error;
mod oauth;

pub use config::ApiSettings;
pub use credentials::{Credential, CREDENTIAL_VARS};
pub use error::{Error, ErrorKind, Result};
pub use oauth::{authenticate, OAuthClient, TokenResponse};

/// Default Salesforce login URL for production.
pub const PRODUCTION_LOGIN_URL: &str = "https://login.salesforce.com";

/// Default Salesforce login URL for sandbox.
pub const SANDBOX_LOGIN_URL: &str = "https://test.salesforce.com";

/// Token path with the password grant type.
pub const DEFAULT_GRANT_SERVICE: &str = "/services/oauth2/token?grant_type=password";
