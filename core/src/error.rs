//! Error types for the hostscope-core library.

use std::time::Duration;

use thiserror::Error;

/// Result type alias for hostscope operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while querying ports/processes or killing processes.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed port number, PID, or process name. Raised before any command runs.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Platform outside of windows/macos/linux.
    #[error("Unsupported operating system: {0}")]
    UnsupportedPlatform(String),

    /// An external tool exited with a nonzero code.
    #[error("Command execution failed: {command}. Return code: {exit_code}. Output: {output}")]
    CommandFailed {
        command: String,
        exit_code: i32,
        output: String,
    },

    /// An external tool did not finish before its deadline and was killed.
    #[error("Command timed out after {}s: {command}", timeout.as_secs())]
    CommandTimeout { command: String, timeout: Duration },

    /// A component was used before it was initialized.
    #[error("{0} is not available")]
    Unavailable(&'static str),

    /// A required external binary is absent.
    #[error("Required command '{0}' is not available on this system")]
    MissingTool(String),

    /// A query failed after its input was accepted.
    #[error("Failed to query {target} for input '{input}': {source}")]
    QueryFailed {
        target: &'static str,
        input: String,
        #[source]
        source: Box<Error>,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Wrap an executor or parser failure with the input that triggered it.
    pub fn query_failed(target: &'static str, input: impl Into<String>, source: Error) -> Self {
        Error::QueryFailed {
            target,
            input: input.into(),
            source: Box::new(source),
        }
    }

    /// True when the message reads like an access problem rather than a tool failure.
    pub fn is_permission_denied(&self) -> bool {
        let message = self.to_string().to_lowercase();
        message.contains("permission")
            || message.contains("access")
            || message.contains("operation not permitted")
    }
}
