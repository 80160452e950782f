//! Shared error type for repository analysis.
//!
//! Errors fall into three groups:
//!
//! - **Invalid input**: a missing or unrecognizable repository reference.
//!   Reported to HTTP clients as 400.
//! - **Upstream failures**: GitHub, the summarization endpoint, git clones,
//!   local I/O. Reported as 500 with the original message.
//! - **Per-file analysis failures**: never surface here. The structure
//!   analyzer records an empty metrics entry and moves on.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Request is missing a required field or carries a malformed body
    #[error("{0}")]
    InvalidInput(String),

    /// Repository reference did not match `github.com/<owner>/<repo>`
    #[error("Invalid GitHub repository URL")]
    InvalidRepoUrl { url: String },

    /// A remote service answered with a failure status
    #[error("{service} error ({status}): {message}")]
    Upstream {
        service: &'static str,
        status: u16,
        message: String,
    },

    /// Transport-level HTTP failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Parser setup failed: {0}")]
    Parser(#[from] tree_sitter::LanguageError),

    /// Background task panicked or was cancelled
    #[error("Task failed: {0}")]
    Task(String),
}

impl Error {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Error::InvalidInput(message.into())
    }

    pub fn upstream(service: &'static str, status: u16, message: impl Into<String>) -> Self {
        Error::Upstream {
            service,
            status,
            message: message.into(),
        }
    }

    /// True for errors caused by the caller's input rather than by this
    /// service or its upstreams.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::InvalidInput(_) | Error::InvalidRepoUrl { .. })
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(err: tokio::task::JoinError) -> Self {
        Error::Task(err.to_string())
    }
}
