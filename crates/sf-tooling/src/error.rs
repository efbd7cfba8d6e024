//! Error types for sfauto-tooling.

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
}

#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// The job could not be started at all.
    #[error("Failed to submit job {job}: {message}")]
    JobSubmission { job: String, message: String },

    #[error("Apex compilation error: {0}")]
    ApexCompilation(String),

    #[error("Apex execution error: {0}")]
    ApexExecution(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("REST error: {0}")]
    Rest(String),

    #[error("Client error: {0}")]
    Client(String),
}

impl From<sfauto_client::Error> for Error {
    fn from(err: sfauto_client::Error) -> Self {
        Error::with_source(ErrorKind::Client(err.to_string()), err)
    }
}

impl From<sfauto_rest::Error> for Error {
    fn from(err: sfauto_rest::Error) -> Self {
        Error::with_source(ErrorKind::Rest(err.to_string()), err)
    }
}
