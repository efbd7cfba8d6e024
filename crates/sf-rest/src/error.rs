//! Error types for sfauto-rest.
//!
//! Every operation reports failures as an [`ErrorKind`] naming the record
//! type and id it was working on. The underlying [`sfauto_client::Error`]
//! stays reachable through [`Error::client_error`].

use sfauto_client::ApiError;

use crate::composite::{CompositeGraphResponse, CompositeTreeResult};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    pub kind: ErrorKind,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// Wrap a client failure, handing its best message to `kind`.
    pub(crate) fn from_client(
        err: sfauto_client::Error,
        kind: impl FnOnce(String) -> ErrorKind,
    ) -> Self {
        let message = err.message();
        Self::with_source(kind(message), err)
    }

    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput(message.into()))
    }

    /// The HTTP-level error underneath, if this failure came from a request.
    pub fn client_error(&self) -> Option<&sfauto_client::Error> {
        self.source
            .as_deref()
            .and_then(|source| source.downcast_ref::<sfauto_client::Error>())
    }

    /// HTTP status of the failed request, if any.
    pub fn status(&self) -> Option<u16> {
        self.client_error().and_then(sfauto_client::Error::status)
    }

    /// Structured errors reported by Salesforce for the failed request.
    pub fn api_errors(&self) -> &[ApiError] {
        match &self.kind {
            ErrorKind::RecordCreation { errors, .. } => errors,
            _ => self
                .client_error()
                .map(sfauto_client::Error::api_errors)
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    #[error("Failed to create {sobject} record: {message}")]
    RecordCreation {
        sobject: String,
        message: String,
        errors: Vec<ApiError>,
    },

    #[error("Failed to fetch {sobject} record {id}: {message}")]
    RecordFetch {
        sobject: String,
        id: String,
        message: String,
    },

    #[error("Failed to update {sobject} record {id}: {message}")]
    RecordUpdate {
        sobject: String,
        id: String,
        message: String,
    },

    #[error("Failed to delete {sobject} record {id}: {message}")]
    RecordDeletion {
        sobject: String,
        id: String,
        message: String,
    },

    /// A composite tree insert was rejected. `results` holds the per-record
    /// outcome exactly as the server reported it.
    #[error("Failed to insert {sobject} records: {message}")]
    BatchInsert {
        sobject: String,
        message: String,
        results: Vec<CompositeTreeResult>,
    },

    /// A composite graph request failed, or at least one graph rolled back.
    #[error("Composite graph insert failed for [{}]: {message}", failed_graphs.join(", "))]
    GraphInsert {
        failed_graphs: Vec<String>,
        message: String,
        response: Option<Box<CompositeGraphResponse>>,
    },

    #[error("Bulk update failed: {0}")]
    BulkUpdate(String),

    #[error("Query failed at {url}: {message}")]
    Query { url: String, message: String },

    #[error("No {sobject} record matches {criteria}")]
    RecordNotFound { sobject: String, criteria: String },

    #[error("Failed to fetch picklist {sobject}.{picklist}: {message}")]
    PicklistFetch {
        sobject: String,
        picklist: String,
        message: String,
    },

    #[error("Failed to set password for user {user_id}: {message}")]
    PasswordUpdate { user_id: String, message: String },

    #[error("Apex REST call to {resource} failed: {message}")]
    ApexRest { resource: String, message: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Client error: {0}")]
    Client(String),
}

impl From<sfauto_client::Error> for Error {
    fn from(err: sfauto_client::Error) -> Self {
        Error::with_source(ErrorKind::Client(err.to_string()), err)
    }
}
