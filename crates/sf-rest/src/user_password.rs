//! User password payloads.
//!
//! See: https://developer.salesforce.com/docs/atlas.en-us.api_rest.meta/api_rest/resources_sobject_user_password.htm

use serde::{Deserialize, Serialize};

/// Request to set a user password.
#[derive(Clone, Serialize)]
pub struct SetPasswordRequest<'a> {
    #[serde(rename = "NewPassword")]
    pub new_password: &'a str,
}

impl std::fmt::Debug for SetPasswordRequest<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SetPasswordRequest")
            .field("new_password", &"[REDACTED]")
            .finish()
    }
}

/// Response from setting a user password.
///
/// Only populated when Salesforce generated the password itself.
#[derive(Clone, Default, Deserialize, Serialize)]
pub struct SetPasswordResponse {
    #[serde(rename = "NewPassword", default, skip_serializing_if = "Option::is_none")]
    pub new_password: Option<String>,
}

impl std::fmt::Debug for SetPasswordResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SetPasswordResponse")
            .field("new_password", &self.new_password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
