//! # sfauto-client
//!
//! Core HTTP infrastructure for the sfauto Salesforce automation client.
//!
//! This crate provides:
//! - [`AccessKeyPair`], the immutable result of authenticating against an org
//! - [`SfHttpClient`], a thin reqwest wrapper with compression and tracing
//! - [`SalesforceClient`], typed JSON methods bound to an [`AccessKeyPair`]
//! - [`poll_until`], bounded polling with linear/exponential backoff
//! - SOQL escaping helpers in [`security`]
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Application Layer                        │
//! │              (sfauto-rest, sfauto-tooling)                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   SalesforceClient                          │
//! │  - Holds the AccessKeyPair + HTTP client                    │
//! │  - Typed JSON methods (get_json, post_json, patch_json)     │
//! │  - Single-page SOQL query primitives                        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    SfHttpClient                             │
//! │  - Raw HTTP with compression and timeouts                   │
//! │  - Salesforce error body parsing                            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Requests are never retried here. The only repetition in the stack is
//! the explicit, bounded polling in [`poll`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use sfauto_client::{AccessKeyPair, SalesforceClient};
//!
//! let keys = AccessKeyPair::new(
//!     "https://na1.salesforce.com",
//!     "Bearer",
//!     token,
//!     "/services/data",
//!     "62.0",
//! )?;
//! let client = SalesforceClient::new(keys)?;
//! let page: QueryResult<serde_json::Value> =
//!     client.query("SELECT Id FROM Account").await?;
//! ```

mod client;
mod config;
mod error;
mod keys;
pub mod poll;
mod request;
mod response;
mod salesforce_client;
pub mod security;

pub use client::SfHttpClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{ApiError, Error, ErrorKind, Result};
pub use keys::AccessKeyPair;
pub use poll::{poll_until, BackoffStrategy, PollConfig, PollOutcome, Probe};
pub use request::{RequestBuilder, RequestMethod};
pub use response::Response;
pub use salesforce_client::{QueryResult, SalesforceClient};

/// Default Salesforce API version
pub const DEFAULT_API_VERSION: &str = "62.0";

/// Default REST API root path on an instance.
pub const DEFAULT_API_ROOT: &str = "/services/data";

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("sfauto/", env!("CARGO_PKG_VERSION"));
