//! # sfauto-rest
//!
//! Salesforce REST API operations used by test automation.
//!
//! ## Features
//!
//! - **SObject CRUD** - Create, read, update and delete individual records
//! - **SOQL Query** - Single pages, automatic pagination and id-batched queries
//! - **Composite Tree** - Insert record hierarchies (up to 200 root records)
//! - **Composite Graph** - Insert dependent records as all-or-nothing graphs
//! - **SObject Collections** - Partial-success updates of up to 200 records
//! - **Actions** - Best-effort email through `emailSimple`
//!
//! ## Example
//!
//! ```rust,ignore
//! use sfauto_rest::{RecordFields, SalesforceRestClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), sfauto_rest::Error> {
//!     let client = SalesforceRestClient::new(keys)?;
//!
//!     let created = client
//!         .create_record("Account", &RecordFields::new().set("Name", "Acme"))
//!         .await?;
//!
//!     let contacts: Vec<serde_json::Value> = client
//!         .query_all("SELECT Id, Name FROM Contact")
//!         .await?;
//!
//!     client.delete_record("Account", &created.id).await?;
//!     Ok(())
//! }
//! ```

mod client;
mod collections;
mod composite;
mod error;
mod invocable_actions;
mod picklist;
mod sobject;
mod user_password;

pub use client::{SalesforceRestClient, ID_BATCH_SIZE};

pub use collections::{
    BatchOutcome, CollectionRequest, CollectionResult, RecordUpdate, MAX_RECORDS_PER_REQUEST,
};

pub use composite::{
    CompositeGraphRequest, CompositeGraphResponse, CompositeSubrequest, CompositeSubresponse,
    CompositeTreeAttributes, CompositeTreeRecord, CompositeTreeRequest, CompositeTreeResponse,
    CompositeTreeResult, GraphRequest, GraphResponse, GraphResponseBody,
};

pub use error::{Error, ErrorKind, Result};

pub use invocable_actions::{EmailSimpleInput, InvocableActionRequest, InvocableActionResult};

pub use picklist::{PicklistValue, PicklistValues, MASTER_RECORD_TYPE_ID};

pub use sobject::{CreateResult, Record, RecordFields};

pub use user_password::{SetPasswordRequest, SetPasswordResponse};

// Re-export the client types callers need to construct a SalesforceRestClient
pub use sfauto_client::{AccessKeyPair, ApiError, ClientConfig, QueryResult};
