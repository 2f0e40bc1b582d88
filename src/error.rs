#![forbid(unsafe_code)]

//! Top-level error type and exit code mapping

use crate::config::ConfigError;
use std::io;
use thiserror::Error;

/// Exit codes
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_USAGE: i32 = 1;
pub const EXIT_INVALID_MODE: i32 = 2;
pub const EXIT_CHILD_FAILED: i32 = 3;
pub const EXIT_ENVIRONMENT: i32 = 4;

/// Every way a copypasta invocation can end unsuccessfully
#[derive(Debug, Error)]
pub enum Error {
    /// Fewer than two positional arguments
    #[error("Usage: copypasta <url> <type>")]
    Usage,

    /// The `<type>` argument is not `mirror` or `page`
    #[error("Invalid command type!")]
    InvalidMode(String),

    /// The downloader exited non-zero or was killed by a signal
    #[error("Error occurred!")]
    ChildFailed { code: Option<i32> },

    /// The downloader binary could not be started
    #[error("Failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// Reading the child's output or writing to the terminal failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Error {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Usage => EXIT_USAGE,
            Error::InvalidMode(_) => EXIT_INVALID_MODE,
            Error::ChildFailed { .. } => EXIT_CHILD_FAILED,
            Error::Spawn { .. } | Error::Io(_) | Error::Config(_) => EXIT_ENVIRONMENT,
        }
    }
}
