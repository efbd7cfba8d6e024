//! UI API picklist payloads.

use serde::{Deserialize, Serialize};

/// Record type id Salesforce uses for "master", i.e. no specific record type.
pub const MASTER_RECORD_TYPE_ID: &str = "012000000000000AAA";

/// Response of `ui-api/object-info/<sobject>/picklist-values/<recordTypeId>/<field>`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PicklistValues {
    #[serde(rename = "defaultValue", default)]
    pub default_value: Option<PicklistValue>,
    #[serde(default)]
    pub values: Vec<PicklistValue>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PicklistValue {
    pub label: String,
    pub value: String,
    #[serde(rename = "validFor", default)]
    pub valid_for: Vec<u32>,
}
