//! SObject record payloads.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use sfauto_client::ApiError;

/// A record as returned by the REST API: field name to JSON value,
/// including the `attributes` block.
pub type Record = Map<String, Value>;

/// Result of a create operation.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CreateResult {
    pub id: String,
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<ApiError>,
}

/// Field values for a create or update, in insertion order of the map.
///
/// ```rust
/// use sfauto_rest::RecordFields;
///
/// let fields = RecordFields::new()
///     .set("Name", "Acme")
///     .set("NumberOfEmployees", 120);
/// assert_eq!(fields.get("Name"), Some(&serde_json::json!("Acme")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordFields(Map<String, Value>);

impl RecordFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any earlier value.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for RecordFields {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for RecordFields {
    type Error = Value;

    /// Accepts only JSON objects; anything else is handed back.
    fn try_from(value: Value) -> std::result::Result<Self, Value> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(other),
        }
    }
}

/// Body of an `Attachment` insert.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct AttachmentBody<'a> {
    #[serde(rename = "Name")]
    pub name: &'a str,
    /// Base64 content.
    #[serde(rename = "Body")]
    pub body: String,
    #[serde(rename = "ParentId")]
    pub parent_id: &'a str,
}
