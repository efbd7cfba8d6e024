//! Error types for sfauto-client.

use serde::{Deserialize, Serialize};

/// Result type alias for sfauto-client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for sfauto-client operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Raw JSON body of the failed response, when the server sent one.
    pub body: Option<serde_json::Value>,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            body: None,
            source: None,
        }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            body: None,
            source: Some(Box::new(source)),
        }
    }

    /// Attach the raw response body.
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// HTTP status of the failed response, if the error came from one.
    pub fn status(&self) -> Option<u16> {
        match &self.kind {
            ErrorKind::Http { status, .. } | ErrorKind::SalesforceApi { status, .. } => {
                Some(*status)
            }
            ErrorKind::Authentication(_) => Some(401),
            ErrorKind::Authorization(_) => Some(403),
            ErrorKind::NotFound(_) => Some(404),
            _ => None,
        }
    }

    /// Structured errors reported by Salesforce, empty for transport failures.
    pub fn api_errors(&self) -> &[ApiError] {
        match &self.kind {
            ErrorKind::SalesforceApi { errors, .. } => errors,
            _ => &[],
        }
    }

    /// Best human-readable message: the first Salesforce error message if
    /// there is one, otherwise the error's display form.
    pub fn message(&self) -> String {
        self.api_errors()
            .first()
            .map(|e| e.message.clone())
            .unwrap_or_else(|| self.kind.to_string())
    }

    /// Returns true if this is an authentication error (expired or invalid token).
    pub fn is_auth_error(&self) -> bool {
        matches!(self.kind, ErrorKind::Authentication(_))
    }

    /// Returns true if the server answered 404.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// HTTP request failed.
    #[error("HTTP error: {status} {message}")]
    Http { status: u16, message: String },

    /// Salesforce rejected the request with a structured error body.
    #[error("Salesforce API error ({status}): {}", summarize(errors))]
    SalesforceApi { status: u16, errors: Vec<ApiError> },

    /// Authentication error (HTTP 401).
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Authorization error (HTTP 403).
    #[error("Authorization error: {0}")]
    Authorization(String),

    /// Resource not found (HTTP 404).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request timeout.
    #[error("Request timeout")]
    Timeout,

    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Other error.
    #[error("{0}")]
    Other(String),
}

fn summarize(errors: &[ApiError]) -> String {
    match errors {
        [] => "no error details".to_string(),
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{first} (+{} more)", rest.len()),
    }
}

/// One entry of a Salesforce error body.
///
/// Top-level REST errors use `errorCode`; errors nested in composite and
/// collection results use `statusCode`. Both deserialize into `error_code`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(rename = "errorCode", alias = "statusCode")]
    pub error_code: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code, self.message)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            ErrorKind::Timeout
        } else if err.is_connect() {
            ErrorKind::Connection(err.to_string())
        } else if let Some(status) = err.status() {
            ErrorKind::Http {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else if err.is_decode() {
            ErrorKind::Json(err.to_string())
        } else {
            ErrorKind::Other(err.to_string())
        };

        Error::with_source(kind, err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(ErrorKind::InvalidUrl(err.to_string()), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(code: &str, message: &str) -> ApiError {
        ApiError {
            error_code: code.to_string(),
            message: message.to_string(),
            fields: None,
        }
    }

    #[test]
    fn test_status_by_kind() {
        let err = Error::new(ErrorKind::SalesforceApi {
            status: 400,
            errors: vec![api_error("INVALID_FIELD", "No such column")],
        });
        assert_eq!(err.status(), Some(400));

        assert_eq!(
            Error::new(ErrorKind::Authentication("expired".into())).status(),
            Some(401)
        );
        assert_eq!(
            Error::new(ErrorKind::NotFound("gone".into())).status(),
            Some(404)
        );
        assert_eq!(Error::new(ErrorKind::Timeout).status(), None);
    }

    #[test]
    fn test_message_prefers_api_error() {
        let err = Error::new(ErrorKind::SalesforceApi {
            status: 400,
            errors: vec![
                api_error("REQUIRED_FIELD_MISSING", "Required fields are missing: [Name]"),
                api_error("FIELD_CUSTOM_VALIDATION_EXCEPTION", "Must be positive"),
            ],
        });
        assert_eq!(err.message(), "Required fields are missing: [Name]");
        assert_eq!(err.api_errors().len(), 2);
        assert!(err.to_string().contains("(+1 more)"));

        let err = Error::new(ErrorKind::Connection("refused".into()));
        assert_eq!(err.message(), "Connection error: refused");
        assert!(err.api_errors().is_empty());
    }

    #[test]
    fn test_is_auth_error() {
        let err = Error::new(ErrorKind::Authentication("expired".to_string()));
        assert!(err.is_auth_error());

        let err = Error::new(ErrorKind::Authorization("forbidden".to_string()));
        assert!(!err.is_auth_error());
    }

    #[test]
    fn test_api_error_accepts_status_code_alias() {
        let nested: ApiError =
            serde_json::from_str(r#"{"statusCode":"DUPLICATE_VALUE","message":"dup","fields":[]}"#)
                .unwrap();
        assert_eq!(nested.error_code, "DUPLICATE_VALUE");
        assert_eq!(nested.fields, Some(vec![]));

        let top: ApiError =
            serde_json::from_str(r#"{"errorCode":"NOT_FOUND","message":"gone"}"#).unwrap();
        assert_eq!(top.error_code, "NOT_FOUND");
        assert!(top.fields.is_none());
    }

    #[test]
    fn test_error_kind_display_messages() {
        let cases: Vec<(ErrorKind, &str)> = vec![
            (
                ErrorKind::Http {
                    status: 500,
                    message: "Internal Server Error".into(),
                },
                "HTTP error: 500 Internal Server Error",
            ),
            (
                ErrorKind::SalesforceApi {
                    status: 400,
                    errors: vec![],
                },
                "no error details",
            ),
            (ErrorKind::Timeout, "Request timeout"),
            (
                ErrorKind::InvalidUrl("no scheme".into()),
                "Invalid URL: no scheme",
            ),
            (
                ErrorKind::Config("missing field".into()),
                "Configuration error: missing field",
            ),
            (ErrorKind::Other("something else".into()), "something else"),
        ];

        for (kind, expected_substring) in cases {
            let display = kind.to_string();
            assert!(
                display.contains(expected_substring),
                "Expected '{display}' to contain '{expected_substring}'"
            );
        }
    }

    #[test]
    fn test_with_body_and_source() {
        let source_err = std::io::Error::other("disk full");
        let err = Error::with_source(ErrorKind::Other("write failed".into()), source_err)
            .with_body(serde_json::json!({"hasErrors": true}));

        assert!(err.source.is_some());
        assert_eq!(err.body, Some(serde_json::json!({"hasErrors": true})));
        assert_eq!(err.to_string(), "write failed");
    }

    #[test]
    fn test_from_url_parse_error() {
        let url_err = url::Url::parse("not a url").unwrap_err();
        let err: Error = url_err.into();
        assert!(matches!(err.kind, ErrorKind::InvalidUrl(_)));
    }
}
