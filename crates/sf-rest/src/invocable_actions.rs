//! Invocable action payloads (`actions/standard/*`).

use serde::{Deserialize, Deserializer, Serialize};

use sfauto_client::ApiError;

/// Deserialize `null` as the default value for the type (e.g., empty Vec).
/// Salesforce APIs often return `"errors": null` instead of `"errors": []`.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    T: Default + Deserialize<'de>,
    D: Deserializer<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}

/// Request to invoke an action.
#[derive(Debug, Clone, Serialize)]
pub struct InvocableActionRequest<T> {
    pub inputs: Vec<T>,
}

/// Inputs of the `emailSimple` standard action.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailSimpleInput {
    pub email_body: String,
    /// Comma-separated recipient list.
    pub email_addresses: String,
    pub email_subject: String,
}

impl EmailSimpleInput {
    pub fn new<I, S>(addresses: I, subject: impl Into<String>, body: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let addresses: Vec<String> = addresses
            .into_iter()
            .map(|a| a.as_ref().trim().to_string())
            .filter(|a| !a.is_empty())
            .collect();
        Self {
            email_body: body.into(),
            email_addresses: addresses.join(","),
            email_subject: subject.into(),
        }
    }
}

/// Result of invoking an action, one per input.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InvocableActionResult {
    #[serde(rename = "actionName", default)]
    pub action_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub errors: Vec<ApiError>,
    #[serde(rename = "isSuccess")]
    pub is_success: bool,
    #[serde(rename = "outputValues", default)]
    pub output_values: Option<serde_json::Value>,
}
