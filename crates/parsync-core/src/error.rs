//! Error taxonomy shared by every pipeline stage.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ParsyncError>;

/// Coarse classification used by the CLI when reporting a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad options; raised before the filesystem or network is touched.
    Configuration,
    /// An external requirement is missing (runner, resume session).
    Precondition,
    /// The listing step could not reach or read the source.
    Transport,
    /// Reading or writing session artifacts failed.
    Io,
}

#[derive(Debug, Error)]
pub enum ParsyncError {
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("required program `{program}` not found on PATH")]
    RunnerNotFound { program: String },

    #[error("session not found: {}", .path.display())]
    SessionNotFound { path: PathBuf },

    #[error("session {} is incomplete: missing `{missing}`", .path.display())]
    SessionIncomplete { path: PathBuf, missing: &'static str },

    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("listing with `{program}` exited with {status}")]
    ListingFailed { program: String, status: String },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl ParsyncError {
    pub fn config(msg: impl Into<String>) -> Self {
        ParsyncError::Configuration(msg.into())
    }

    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        ParsyncError::Io {
            context: context.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ParsyncError::Configuration(_) => ErrorKind::Configuration,
            ParsyncError::RunnerNotFound { .. }
            | ParsyncError::SessionNotFound { .. }
            | ParsyncError::SessionIncomplete { .. } => ErrorKind::Precondition,
            ParsyncError::Spawn { .. } | ParsyncError::ListingFailed { .. } => {
                ErrorKind::Transport
            }
            ParsyncError::Io { .. } => ErrorKind::Io,
        }
    }
}
