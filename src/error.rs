//! Error types shared by the rc invoker, the output parsers and the plugin operations.

use std::time::Duration;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, RtagsError>;

/// Everything that can go wrong while talking to rc or mapping its output
#[derive(Debug, thiserror::Error)]
pub enum RtagsError {
    /// The rc binary could not be started at all (not installed, not executable, ...)
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// rc ran but exited with a non-zero status. Output is kept verbatim so the
    /// caller can show it to the user.
    #[error("`{command}` exited with status {status}: {}", summarize(.stderr, .stdout))]
    ToolInvocation {
        command: String,
        status: i32,
        stdout: String,
        stderr: String,
    },

    /// rc did not finish within the configured timeout and was killed
    #[error("`{command}` timed out after {}ms", .timeout.as_millis())]
    TimedOut { command: String, timeout: Duration },

    /// rc produced output we could not make sense of
    #[error("malformed rc output: {0}")]
    Malformed(#[from] MalformedOutput),

    /// The editor host failed (file could not be opened, saved, prompt closed, ...)
    #[error("editor host error: {0}")]
    Host(#[from] std::io::Error),
}

impl RtagsError {
    /// True when the error came from rc itself rather than from our side
    pub fn is_tool_failure(&self) -> bool {
        matches!(
            self,
            RtagsError::ToolInvocation { .. } | RtagsError::TimedOut { .. }
        )
    }
}

fn summarize<'a>(stderr: &'a str, stdout: &'a str) -> &'a str {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        stdout.trim()
    } else {
        stderr
    }
}

/// Shape errors in rc output. These fail loudly instead of producing partial results.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedOutput {
    /// A record did not split into the expected number of fields
    #[error("expected {expected} {separator:?}-separated fields in {record:?}, found {found}")]
    MalformedRecord {
        record: String,
        separator: char,
        expected: usize,
        found: usize,
    },

    /// A line or column field was not a number
    #[error("invalid number {text:?} in {record:?}")]
    InvalidNumber { record: String, text: String },

    /// JSON parsed but does not have the structure rc documents
    #[error("unexpected shape: {0}")]
    UnexpectedShape(String),

    /// Output was not valid JSON
    #[error("invalid JSON: {0}")]
    InvalidJson(String),
}

impl From<serde_json::Error> for MalformedOutput {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() {
            MalformedOutput::UnexpectedShape(err.to_string())
        } else {
            MalformedOutput::InvalidJson(err.to_string())
        }
    }
}

impl From<serde_json::Error> for RtagsError {
    fn from(err: serde_json::Error) -> Self {
        RtagsError::Malformed(err.into())
    }
}
