//! Types for anonymous Apex and async job tracking.

use serde::{Deserialize, Serialize};

// ============================================================================
// Execute Anonymous Types
// ============================================================================

/// Result of executing anonymous Apex.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ExecuteAnonymousResult {
    /// Whether the code compiled successfully.
    #[serde(default)]
    pub compiled: bool,

    /// Compiler message when `compiled` is false.
    #[serde(rename = "compileProblem", default)]
    pub compile_problem: Option<String>,

    /// Whether the execution was successful.
    #[serde(default)]
    pub success: bool,

    #[serde(rename = "exceptionStackTrace", default)]
    pub exception_stack_trace: Option<String>,

    #[serde(rename = "exceptionMessage", default)]
    pub exception_message: Option<String>,

    /// The column number of the error.
    #[serde(default)]
    pub column: Option<i32>,

    /// The line number of the error.
    #[serde(default)]
    pub line: Option<i32>,
}

// ============================================================================
// Async Apex Job Types
// ============================================================================

/// `AsyncApexJob.Status` picklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum AsyncJobStatus {
    Holding,
    Queued,
    Preparing,
    Processing,
    Completed,
    Failed,
    Aborted,
    /// Any status this crate does not know; treated as still running.
    #[serde(other)]
    Unknown,
}

impl AsyncJobStatus {
    /// The job ended without completing.
    pub fn is_failure(self) -> bool {
        matches!(self, AsyncJobStatus::Failed | AsyncJobStatus::Aborted)
    }
}

/// Status row of an `AsyncApexJob` query.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AsyncApexJob {
    #[serde(rename = "Status")]
    pub status: AsyncJobStatus,
}
