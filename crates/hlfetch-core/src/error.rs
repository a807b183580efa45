//! Per-language fetch error and its classification.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Coarse category of a fetch failure, used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Remote answered with a non-2xx status.
    HttpStatus,
    /// DNS, TLS, connection or timeout failure.
    Transport,
    /// Local filesystem failure (directory, temp file, write, rename).
    LocalIo,
}

/// Error returned by a single language fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status}")]
    Http { status: u32 },

    #[error("{0}")]
    Transport(#[from] curl::Error),

    #[error("unsafe language identifier {name:?}")]
    UnsafeName { name: String },

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FetchError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        FetchError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::Http { .. } => ErrorKind::HttpStatus,
            FetchError::Transport(_) => ErrorKind::Transport,
            FetchError::UnsafeName { .. } | FetchError::Io { .. } => ErrorKind::LocalIo,
        }
    }

    /// True if the request hit the configured timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Transport(e) if e.is_operation_timedout())
    }

    /// Short human-readable reason for the console report.
    pub fn reason(&self) -> String {
        match self {
            FetchError::Http { status } => format!("HTTP error {status}"),
            FetchError::Transport(e) if self.is_timeout() => {
                format!("timed out: {}", e.description())
            }
            FetchError::Transport(e) => format!("connection error: {}", e.description()),
            FetchError::UnsafeName { name } => {
                format!("{name:?} is not a safe directory name")
            }
            FetchError::Io { path, source } => {
                format!("I/O error on {}: {}", path.display(), source)
            }
        }
    }
}
