//! Error taxonomy for command execution.
//!
//! Only two failure categories are absorbed by the run loop: a violated
//! argument contract (the command's usage string is printed) and a closed
//! connection (reported, loop continues). Everything else is deliberately
//! fatal and propagates out of the loop.

use thiserror::Error;

use crate::session::SessionError;

/// Errors surfaced by command execution.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The command's own argument contract was violated.
    #[error("malformed arguments")]
    Usage,

    /// The transport was closed, locally or remotely, during the invocation.
    #[error("connection closed")]
    ConnectionClosed,

    /// Unclassified failure. Not absorbed; terminates the process.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CommandError {
    /// Static code for structured logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Usage => "usage",
            Self::ConnectionClosed => "connection_closed",
            Self::Internal(_) => "internal",
        }
    }
}

impl From<SessionError> for CommandError {
    fn from(err: SessionError) -> Self {
        match err {
            // An I/O failure mid-invocation means the transport is gone;
            // report it the same way as an orderly close.
            SessionError::Closed | SessionError::Io(_) => Self::ConnectionClosed,
            SessionError::Wire(e) => Self::Internal(e.into()),
        }
    }
}

/// Result type for command execution.
pub type CommandResult = Result<(), CommandError>;
