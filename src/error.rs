//! Error types returned by the client.

use crate::Value;

use std::io;
use thiserror::Error;

/// A command failed at the protocol level.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The reply decoded fine but has a shape the command does not accept.
    #[error("unexpected reply: {0}")]
    UnexpectedReply(Value),

    /// The server answered with an error reply.
    #[error("server error: {0}")]
    RedisError(String),

    /// `AUTH` was requested but no password is configured.
    #[error("no password configured")]
    MissingPassword,

    /// The byte stream is not valid RESP.
    #[error("malformed reply: {0}")]
    MalformedReply(String),
}

/// Error returned by most functions.
///
/// Transport failures are passed through untouched as `Io`.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// A specialized `Result` type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns the protocol-level error, if this is one.
    pub fn as_command(&self) -> Option<&CommandError> {
        match self {
            Error::Command(err) => Some(err),
            Error::Io(_) => None,
        }
    }
}
