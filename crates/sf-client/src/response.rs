//! HTTP response handling and Salesforce error parsing.

use std::sync::LazyLock;

use regex_lite::Regex;
use serde::de::DeserializeOwned;

use crate::error::{ApiError, Error, ErrorKind, Result};

/// Wrapper around an HTTP response.
#[derive(Debug)]
pub struct Response {
    inner: reqwest::Response,
}

impl Response {
    pub(crate) fn new(inner: reqwest::Response) -> Self {
        Self { inner }
    }

    /// Get the HTTP status code.
    pub fn status(&self) -> u16 {
        self.inner.status().as_u16()
    }

    /// Returns true if the response status is successful (2xx).
    pub fn is_success(&self) -> bool {
        self.inner.status().is_success()
    }

    /// Get a header value.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.inner.headers().get(name)?.to_str().ok()
    }

    /// Get the response body as text.
    pub async fn text(self) -> Result<String> {
        self.inner.text().await.map_err(Into::into)
    }

    /// Deserialize the response body as JSON.
    pub async fn json<T: DeserializeOwned>(self) -> Result<T> {
        self.inner.json().await.map_err(Into::into)
    }

    /// Deserialize the body as JSON, or `None` when the body is empty (204).
    pub async fn json_or_none<T: DeserializeOwned>(self) -> Result<Option<T>> {
        let text = self.text().await?;
        if text.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&text)?))
    }

    /// Turn a non-2xx response into an [`Error`] built from its body.
    pub async fn check_salesforce_error(self) -> Result<Response> {
        if self.is_success() {
            return Ok(self);
        }

        let status = self.status();
        let body = self.text().await.unwrap_or_default();
        Err(parse_error_response(status, &body))
    }
}

/// Map an error status and body to an [`Error`].
///
/// The parsed body (when it is JSON) is kept on the error so composite
/// callers can recover per-record results from it.
pub(crate) fn parse_error_response(status: u16, body: &str) -> Error {
    let json = serde_json::from_str::<serde_json::Value>(body).ok();
    let errors: Vec<ApiError> = json
        .as_ref()
        .map(api_errors_from)
        .unwrap_or_default()
        .into_iter()
        .map(|mut e| {
            e.message = sanitize_error_message(&e.message);
            e
        })
        .collect();

    let message = match errors.first() {
        Some(first) => first.to_string(),
        None => sanitize_error_message(body),
    };

    let kind = match status {
        401 => ErrorKind::Authentication(message),
        403 => ErrorKind::Authorization(message),
        404 => ErrorKind::NotFound(message),
        _ if !errors.is_empty() => ErrorKind::SalesforceApi { status, errors },
        _ => ErrorKind::Http { status, message },
    };

    let err = Error::new(kind);
    match json {
        Some(value) => err.with_body(value),
        None => err,
    }
}

/// Salesforce sends either an array of errors or a single error object.
fn api_errors_from(value: &serde_json::Value) -> Vec<ApiError> {
    if let Ok(errors) = serde_json::from_value::<Vec<ApiError>>(value.clone()) {
        return errors;
    }
    serde_json::from_value::<ApiError>(value.clone())
        .map(|e| vec![e])
        .unwrap_or_default()
}

// Salesforce tokens start with the 15-char org id followed by "!".
static TOKEN_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"00[A-Za-z0-9]{13,}[!][A-Za-z0-9_.]+").ok());
static SESSION_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"sid=[A-Za-z0-9]{20,}").ok());

/// Sanitize an error message to prevent exposing sensitive data.
///
/// This function:
/// - Removes anything that looks like an access token
/// - Removes session IDs
/// - Truncates messages longer than 500 characters
pub(crate) fn sanitize_error_message(message: &str) -> String {
    const MAX_LENGTH: usize = 500;

    let mut sanitized = message.to_string();

    if let Some(re) = TOKEN_PATTERN.as_ref() {
        sanitized = re.replace_all(&sanitized, "[REDACTED_TOKEN]").to_string();
    }
    if let Some(re) = SESSION_PATTERN.as_ref() {
        sanitized = re.replace_all(&sanitized, "sid=[REDACTED]").to_string();
    }

    if sanitized.len() > MAX_LENGTH {
        let mut cut = MAX_LENGTH;
        while !sanitized.is_char_boundary(cut) {
            cut -= 1;
        }
        sanitized.truncate(cut);
        sanitized.push_str("...[truncated]");
    }

    sanitized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_redacts_access_tokens() {
        let msg = "Session expired: 00Dxx0000001gEF!AQcAQH3k9s7LKbp_example_token_value.here";
        let sanitized = sanitize_error_message(msg);
        assert!(sanitized.contains("[REDACTED_TOKEN]"), "{sanitized}");
        assert!(!sanitized.contains("AQcAQH3k9s7LKbp"), "{sanitized}");
    }

    #[test]
    fn test_sanitize_redacts_session_ids() {
        let msg = "Invalid session: sid=abc123def456ghi789jkl012";
        let sanitized = sanitize_error_message(msg);
        assert!(sanitized.contains("sid=[REDACTED]"), "{sanitized}");
        assert!(!sanitized.contains("abc123def456"), "{sanitized}");
    }

    #[test]
    fn test_sanitize_truncates_long_messages() {
        let sanitized = sanitize_error_message(&"é".repeat(400));
        assert!(sanitized.ends_with("...[truncated]"));

        let msg = "No such column 'foo' on entity 'Account'";
        assert_eq!(sanitize_error_message(msg), msg);
    }

    #[test]
    fn test_parse_array_error_body() {
        let body = r#"[{"errorCode":"REQUIRED_FIELD_MISSING","message":"Required fields are missing: [Name]","fields":["Name"]}]"#;
        let err = parse_error_response(400, body);

        match &err.kind {
            ErrorKind::SalesforceApi { status, errors } => {
                assert_eq!(*status, 400);
                assert_eq!(errors[0].error_code, "REQUIRED_FIELD_MISSING");
                assert_eq!(errors[0].fields, Some(vec!["Name".to_string()]));
            }
            other => panic!("unexpected kind: {other:?}"),
        }
        assert!(err.body.is_some());
    }

    #[test]
    fn test_parse_single_object_error_body() {
        let body = r#"{"errorCode":"MALFORMED_QUERY","message":"unexpected token: FORM"}"#;
        let err = parse_error_response(400, body);
        assert_eq!(err.api_errors()[0].error_code, "MALFORMED_QUERY");
        assert_eq!(err.message(), "unexpected token: FORM");
    }

    #[test]
    fn test_parse_status_specific_kinds() {
        let body = r#"[{"errorCode":"INVALID_SESSION_ID","message":"Session expired or invalid"}]"#;
        let err = parse_error_response(401, body);
        assert!(err.is_auth_error());
        assert!(err.to_string().contains("INVALID_SESSION_ID"));

        let err = parse_error_response(404, r#"[{"errorCode":"NOT_FOUND","message":"gone"}]"#);
        assert!(err.is_not_found());
    }

    #[test]
    fn test_parse_unstructured_body_keeps_json() {
        let body = r#"{"hasErrors":true,"results":[]}"#;
        let err = parse_error_response(400, body);
        assert!(matches!(err.kind, ErrorKind::Http { status: 400, .. }));
        assert_eq!(err.body.unwrap()["hasErrors"], true);

        let err = parse_error_response(502, "<html>Bad gateway</html>");
        assert!(matches!(err.kind, ErrorKind::Http { status: 502, .. }));
        assert!(err.body.is_none());
    }
}
