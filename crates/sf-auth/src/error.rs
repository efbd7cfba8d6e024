//! Error types for sfauto-auth.
//!
//! Error messages are designed to avoid exposing sensitive credential data.

/// Result type alias for sfauto-auth operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for sfauto-auth operations.
///
/// Error messages are sanitized to prevent accidental credential exposure.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// True for missing or invalid settings, detected before any network call.
    pub fn is_configuration(&self) -> bool {
        matches!(self.kind, ErrorKind::Config(_) | ErrorKind::EnvVar(_))
    }

    /// True when the token exchange itself failed.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::OAuth { .. } | ErrorKind::MalformedTokenResponse(_) | ErrorKind::Http(_)
        )
    }
}

/// The kind of error that occurred.
///
/// Error messages avoid including credential values.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// OAuth error response from Salesforce.
    #[error("OAuth error ({status}): {error} - {description}")]
    OAuth {
        status: u16,
        error: String,
        description: String,
    },

    /// The token endpoint answered 2xx but the body is unusable.
    #[error("Malformed token response: {0}")]
    MalformedTokenResponse(String),

    /// HTTP error during authentication.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Environment variable not set.
    #[error("Environment variable not set: {0}")]
    EnvVar(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Other error.
    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        // The token URL carries the credentials in its query string.
        let err = err.without_url();
        Error::with_source(ErrorKind::Http(err.to_string()), err)
    }
}

impl From<serde_urlencoded::ser::Error> for Error {
    fn from(err: serde_urlencoded::ser::Error) -> Self {
        Error::with_source(ErrorKind::Serialization(err.to_string()), err)
    }
}

impl From<sfauto_client::Error> for Error {
    fn from(err: sfauto_client::Error) -> Self {
        let kind = match &err.kind {
            sfauto_client::ErrorKind::Config(msg) => ErrorKind::Config(msg.clone()),
            sfauto_client::ErrorKind::InvalidUrl(msg) => {
                ErrorKind::MalformedTokenResponse(format!("invalid instance_url: {msg}"))
            }
            other => ErrorKind::Other(other.to_string()),
        };
        Error::with_source(kind, err)
    }
}
