//! Error types for the CRUD façades.
//!
//! # Design
//! Failures are grouped by where they happen: the transport (network, DNS,
//! TLS), the server (non-2xx status), or JSON handling on either side of the
//! exchange. Nothing here is retried or logged; every variant travels back to
//! the caller as-is.

/// Boxed error raised by a `Transport` implementation.
///
/// Opaque to the façades: it is carried through `Error::Transport` untouched.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct TransportError(Box<dyn std::error::Error + Send + Sync>);

impl TransportError {
    pub fn new<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self(err.into())
    }

    pub fn msg(message: impl Into<String>) -> Self {
        let message: String = message.into();
        Self(message.into())
    }

    pub fn into_inner(self) -> Box<dyn std::error::Error + Send + Sync> {
        self.0
    }
}

/// Errors returned by the façades.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The transport failed before a response was produced.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The server answered with a status outside 2xx. Displays as the
    /// response's status text only.
    #[error("{status_text}")]
    Http { status: u16, status_text: String },

    /// A response that qualified for parsing did not hold the expected JSON.
    #[error("invalid response body: {0}")]
    Parse(#[source] serde_json::Error),

    /// The request body could not be serialized to JSON.
    #[error("failed to serialize request body: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("request method is not set")]
    MissingMethod,
}

impl Error {
    /// Status code of an `Http` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
