//! Code execution collaborator seam.
//!
//! The synchronization core never runs code itself: execution requests are
//! delegated to an external sandbox behind this trait. A failure here is
//! reported to the one requesting client and never touches room state.

use async_trait::async_trait;
use thiserror::Error;

/// A single execution request: source text, language tag, and stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionRequest {
    pub code: String,
    pub language: String,
    pub stdin: String,
}

/// Outcome of a sandbox run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub output: String,
    pub status: String,
    /// Elapsed wall-clock time, formatted (e.g. "0.03s")
    pub time: String,
    /// Peak memory, formatted (e.g. "1024KB")
    pub memory: String,
}

/// Execution collaborator failure
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExecuteError {
    #[error("execution backend unavailable: {0}")]
    Unavailable(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CodeExecutor: Send + Sync {
    /// Run the given source in the sandbox and return its outcome.
    async fn execute(&self, request: ExecutionRequest) -> Result<ExecutionResult, ExecuteError>;
}
