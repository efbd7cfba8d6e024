//! SObject Collections payloads for multi-record updates.

use serde::{Deserialize, Serialize};

use sfauto_client::ApiError;

use crate::sobject::RecordFields;

/// Maximum records accepted by one collections or tree request.
pub const MAX_RECORDS_PER_REQUEST: usize = 200;

/// One record of a multi-record update: which record, and the fields to set.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordUpdate {
    pub sobject: String,
    pub id: String,
    pub fields: RecordFields,
}

impl RecordUpdate {
    pub fn new(sobject: impl Into<String>, id: impl Into<String>, fields: RecordFields) -> Self {
        Self {
            sobject: sobject.into(),
            id: id.into(),
            fields,
        }
    }
}

#[derive(Serialize)]
struct UpdateAttributes<'a> {
    #[serde(rename = "type")]
    sobject_type: &'a str,
}

#[derive(Serialize)]
struct UpdatePayload<'a> {
    attributes: UpdateAttributes<'a>,
    #[serde(rename = "Id")]
    id: &'a str,
    #[serde(flatten)]
    fields: &'a RecordFields,
}

impl Serialize for RecordUpdate {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        UpdatePayload {
            attributes: UpdateAttributes {
                sobject_type: &self.sobject,
            },
            id: &self.id,
            fields: &self.fields,
        }
        .serialize(serializer)
    }
}

/// Request for SObject Collections operations.
#[derive(Debug, Clone, Serialize)]
pub struct CollectionRequest<'a> {
    #[serde(rename = "allOrNone")]
    pub all_or_none: bool,
    pub records: &'a [RecordUpdate],
}

/// Result of a collection operation, one per submitted record, in order.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CollectionResult {
    #[serde(default)]
    pub id: Option<String>,
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<ApiError>,
    #[serde(default)]
    pub created: Option<bool>,
}

/// Per-record outcome of a partial-success update.
///
/// Index `i` of [`BatchOutcome::results`] belongs to the `i`-th submitted
/// record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct BatchOutcome {
    pub results: Vec<CollectionResult>,
}

impl BatchOutcome {
    pub fn succeeded(&self) -> impl Iterator<Item = &CollectionResult> {
        self.results.iter().filter(|r| r.success)
    }

    pub fn failed(&self) -> impl Iterator<Item = &CollectionResult> {
        self.results.iter().filter(|r| !r.success)
    }

    pub fn is_complete_success(&self) -> bool {
        self.results.iter().all(|r| r.success)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
