//! Error types for path auditing

use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors raised while configuring or running an audit
///
/// Missing candidates are not errors; they are the audit's output.
#[derive(Debug, Error)]
pub enum AuditError {
    /// The source root does not exist or cannot be read
    #[error("source root '{}' is not accessible: {source}", .path.display())]
    SourceRoot {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source root exists but is not a directory
    #[error("source root '{}' is not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// Configuration file could not be read or parsed, or holds invalid values
    #[error("configuration error: {0}")]
    Config(String),

    /// Report serialization failed
    #[error("failed to render report: {0}")]
    Render(String),
}

/// Result type for audit operations
pub type AuditResult<T> = Result<T, AuditError>;
