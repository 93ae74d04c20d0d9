//! Render Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.
//!
//! Two families of failure exist: [`ErrorKind::Configuration`] is raised
//! before anything is handed to the renderer, every other variant is a
//! render failure surfaced while producing the PDF.

use derive_more::{Display, Error};
use std::io::Error as IoError;
use std::path::PathBuf;

/// A render error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for render operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// Invocation parameters are missing or conflict with each other.
    #[display("{_0}")]
    Configuration(#[error(not(source))] String),
    /// The HTML file to convert does not exist or is not a file.
    #[display("input file not found: {}", _0.display())]
    InputNotFound(#[error(not(source))] PathBuf),
    /// The directory the PDF should be written into does not exist.
    #[display("output directory does not exist: {}", _0.display())]
    OutputDirectory(#[error(not(source))] PathBuf),
    #[display("chrome/chromium not detected on your system")]
    ChromeNotFound,
    /// Chrome exited unsuccessfully. Without an exit code, Chrome was killed by a signal.
    #[display("Chrome failed ({}): {stderr}", describe_exit(code))]
    ChromeFailed { code: Option<i32>, stderr: String },
    /// Chrome reported success but wrote nothing.
    #[display("Chrome produced an empty PDF")]
    EmptyOutput,
    /// Asset was not loadable (either file or builtin).
    #[display("stylesheet not found: {_0}")]
    AssetNotFound(#[error(not(source))] String),
    #[display("I/O error: {_0}")]
    Io(IoError),
}
impl From<IoError> for ErrorKind {
    fn from(err: IoError) -> Self {
        Self::Io(err)
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "killed by signal".to_string(),
    }
}

impl ErrorKind {
    /// Shorthand for [`ErrorKind::Configuration`].
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Returns `true` if the failure was detected before rendering started
    /// because of invalid invocation parameters.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// Returns `true` if retrying might succeed.
    ///
    /// Conversions are one-shot: nothing is ever retried.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
