//! Error types for adb invocations.

use std::io;
use std::time::Duration;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AdbError>;

#[derive(Debug, Error)]
pub enum AdbError {
    /// The adb executable could not be launched.
    #[error("failed to launch adb: {0}")]
    Spawn(#[source] io::Error),

    /// adb ran but wrote to stderr. Non-empty stderr is treated as failure
    /// regardless of exit code.
    #[error("ADB command failed: {0}")]
    Command(String),

    /// A configured per-command timeout elapsed. Never produced unless a
    /// timeout was explicitly set on the client.
    #[error("ADB command timed out after {0:?}")]
    Timeout(Duration),

    /// Local filesystem error, e.g. creating a screenshot output directory.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A higher-level operation failed.
    #[error("{context}: {source}")]
    Operation {
        context: String,
        #[source]
        source: Box<AdbError>,
    },
}

impl AdbError {
    /// Wrap this error with the name of the failing high-level operation.
    pub fn context(self, context: impl Into<String>) -> Self {
        AdbError::Operation {
            context: context.into(),
            source: Box::new(self),
        }
    }
}
