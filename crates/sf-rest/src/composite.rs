//! Composite tree and composite graph payloads.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use sfauto_client::ApiError;

use crate::sobject::RecordFields;

// =============================================================================
// Composite Tree
// =============================================================================

/// Body of `POST composite/tree/<sobject>/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositeTreeRequest {
    pub records: Vec<CompositeTreeRecord>,
}

/// One record in a composite tree, optionally carrying nested child records.
///
/// ```rust
/// use sfauto_rest::{CompositeTreeRecord, RecordFields};
///
/// let account = CompositeTreeRecord::new("Account", "acct1")
///     .with_fields(RecordFields::new().set("Name", "Acme"))
///     .with_children(
///         "Contacts",
///         vec![CompositeTreeRecord::new("Contact", "c1").field("LastName", "Ng")],
///     );
/// let json = serde_json::to_value(&account).unwrap();
/// assert_eq!(json["Contacts"]["records"][0]["attributes"]["referenceId"], "c1");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeTreeRecord {
    pub attributes: CompositeTreeAttributes,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeTreeAttributes {
    #[serde(rename = "type")]
    pub sobject_type: String,
    #[serde(rename = "referenceId")]
    pub reference_id: String,
}

impl CompositeTreeRecord {
    pub fn new(sobject_type: impl Into<String>, reference_id: impl Into<String>) -> Self {
        Self {
            attributes: CompositeTreeAttributes {
                sobject_type: sobject_type.into(),
                reference_id: reference_id.into(),
            },
            fields: Map::new(),
        }
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn with_fields(mut self, fields: RecordFields) -> Self {
        self.fields.extend(fields.into_inner());
        self
    }

    /// Nest child records under a relationship name, e.g. `Contacts`.
    pub fn with_children(
        mut self,
        relationship: impl Into<String>,
        children: impl IntoIterator<Item = CompositeTreeRecord>,
    ) -> Self {
        let records: Vec<Value> = children
            .into_iter()
            .map(CompositeTreeRecord::into_value)
            .collect();
        let mut nested = Map::new();
        nested.insert("records".to_string(), Value::Array(records));
        self.fields.insert(relationship.into(), Value::Object(nested));
        self
    }

    pub fn reference_id(&self) -> &str {
        &self.attributes.reference_id
    }

    fn into_value(self) -> Value {
        let mut attributes = Map::new();
        attributes.insert(
            "type".to_string(),
            Value::String(self.attributes.sobject_type),
        );
        attributes.insert(
            "referenceId".to_string(),
            Value::String(self.attributes.reference_id),
        );

        let mut map = Map::new();
        map.insert("attributes".to_string(), Value::Object(attributes));
        map.extend(self.fields);
        Value::Object(map)
    }
}

/// Response of a composite tree insert, success or failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompositeTreeResponse {
    #[serde(rename = "hasErrors", default)]
    pub has_errors: bool,
    #[serde(default)]
    pub results: Vec<CompositeTreeResult>,
}

impl CompositeTreeResponse {
    /// Id assigned to the record with the given reference id.
    pub fn id_for(&self, reference_id: &str) -> Option<&str> {
        self.results
            .iter()
            .find(|r| r.reference_id == reference_id)
            .and_then(|r| r.id.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeTreeResult {
    #[serde(rename = "referenceId")]
    pub reference_id: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub errors: Vec<ApiError>,
}

// =============================================================================
// Composite Graph
// =============================================================================

/// Body of `POST composite/graph`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompositeGraphRequest {
    pub graphs: Vec<GraphRequest>,
}

impl CompositeGraphRequest {
    pub fn new(graphs: Vec<GraphRequest>) -> Self {
        Self { graphs }
    }

    pub fn graph_ids(&self) -> Vec<String> {
        self.graphs.iter().map(|g| g.graph_id.clone()).collect()
    }
}

/// One graph: a set of dependent subrequests committed or rolled back together.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphRequest {
    pub graph_id: String,
    pub composite_request: Vec<CompositeSubrequest>,
}

impl GraphRequest {
    pub fn new(graph_id: impl Into<String>) -> Self {
        Self {
            graph_id: graph_id.into(),
            composite_request: Vec::new(),
        }
    }

    /// Append a subrequest. Later nodes may reference earlier ones as
    /// `@{referenceId.id}`.
    pub fn node(mut self, subrequest: CompositeSubrequest) -> Self {
        self.composite_request.push(subrequest);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositeSubrequest {
    pub method: String,
    pub url: String,
    #[serde(rename = "referenceId")]
    pub reference_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl CompositeSubrequest {
    /// A `POST` subrequest, typically to `/services/data/vXX.X/sobjects/<Type>/`.
    pub fn post(url: impl Into<String>, reference_id: impl Into<String>, body: Value) -> Self {
        Self {
            method: "POST".to_string(),
            url: url.into(),
            reference_id: reference_id.into(),
            body: Some(body),
        }
    }

    pub fn patch(url: impl Into<String>, reference_id: impl Into<String>, body: Value) -> Self {
        Self {
            method: "PATCH".to_string(),
            url: url.into(),
            reference_id: reference_id.into(),
            body: Some(body),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompositeGraphResponse {
    #[serde(default)]
    pub graphs: Vec<GraphResponse>,
}

impl CompositeGraphResponse {
    pub fn is_successful(&self) -> bool {
        self.graphs.iter().all(|g| g.is_successful)
    }

    pub fn failed_graph_ids(&self) -> Vec<String> {
        self.graphs
            .iter()
            .filter(|g| !g.is_successful)
            .map(|g| g.graph_id.clone())
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphResponse {
    pub graph_id: String,
    pub graph_response: GraphResponseBody,
    pub is_successful: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphResponseBody {
    #[serde(rename = "compositeResponse", default)]
    pub responses: Vec<CompositeSubresponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositeSubresponse {
    #[serde(default)]
    pub body: Value,
    #[serde(rename = "httpHeaders", default)]
    pub http_headers: Value,
    #[serde(rename = "httpStatusCode")]
    pub http_status_code: u16,
    #[serde(rename = "referenceId")]
    pub reference_id: String,
}
