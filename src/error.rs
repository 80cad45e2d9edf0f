//! Error types for stackctl
//!
//! Uses `thiserror` for library errors; the CLI layer wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for stackctl operations
pub type StackResult<T> = Result<T, StackError>;

/// Main error type for stackctl operations
///
/// External-command failures carry the captured stderr of the failing
/// invocation so the CLI can render it for diagnosis.
#[derive(Error, Debug)]
pub enum StackError {
    /// Manifest file does not exist
    #[error("no stack manifest found at {path}")]
    ManifestNotFound { path: PathBuf },

    /// Manifest exists but is structurally or semantically invalid
    #[error("invalid manifest {path}: {message}")]
    ManifestInvalid { path: PathBuf, message: String },

    /// Required external tool is not installed or not runnable
    #[error("{tool} was not found. Please install it and try again.")]
    ToolNotAvailable { tool: String },

    /// Registry login returned a non-zero exit
    #[error("failed to log in to {registry}")]
    AuthenticationFailed { registry: String, stderr: String },

    /// Image build returned a non-zero exit
    #[error("failed to build {component}")]
    BuildFailed { component: String, stderr: String },

    /// Image push returned a non-zero exit
    #[error("failed to push {component}")]
    PushFailed { component: String, stderr: String },

    /// Applying a configuration file returned a non-zero exit
    #[error("failed to apply {target}")]
    ApplyFailed { target: String, stderr: String },

    /// Teardown returned a non-zero exit
    #[error("failed to tear the stack down")]
    DeleteFailed { stderr: String },

    /// The external program could not be started at all
    ///
    /// Distinct from a non-zero exit: the binary was missing or not
    /// executable, so no output was captured.
    #[error("failed to start '{program}': {source}")]
    CommandSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Interactive credential prompt failed (no terminal, EOF, ...)
    #[error("credential prompt failed: {0}")]
    Prompt(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StackError {
    /// Captured stderr of the failing external command, when there is one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            StackError::AuthenticationFailed { stderr, .. }
            | StackError::BuildFailed { stderr, .. }
            | StackError::PushFailed { stderr, .. }
            | StackError::ApplyFailed { stderr, .. }
            | StackError::DeleteFailed { stderr } => Some(stderr),
            _ => None,
        }
    }
}
