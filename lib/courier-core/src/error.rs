//! Error types for courier.

use derive_more::{Display, Error, From};

// ============================================================================
// Transport Error
// ============================================================================

/// Category of a [`TransportError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum TransportErrorKind {
    /// Could not establish a connection (refused, DNS failure, ...).
    #[display("connection error")]
    Connect,
    /// TLS handshake or certificate failure.
    #[display("TLS error")]
    Tls,
    /// The transport gave up waiting for the response.
    #[display("timeout")]
    Timeout,
    /// The request descriptor could not be turned into a wire request.
    #[display("invalid request")]
    InvalidRequest,
    /// The response body stream failed.
    #[display("body error")]
    Body,
    /// The transport was shut down before the request was issued.
    #[display("shut down")]
    Shutdown,
    /// The task driving the request was cancelled or panicked.
    #[display("aborted")]
    Aborted,
    /// Anything else reported by the transport.
    #[display("transport error")]
    Other,
}

/// Failure reported by an [`HttpClient`](crate::HttpClient) implementation.
///
/// The pipeline never inspects or rewrites these; they reach the caller as
/// [`Error::Transport`] (or [`Error::BodyRead`] when raised while reading a
/// response body).
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("{kind}: {message}")]
pub struct TransportError {
    kind: TransportErrorKind,
    message: String,
}

impl TransportError {
    /// Create a transport error of the given kind.
    #[must_use]
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Create a connection error.
    #[must_use]
    pub fn connect(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Connect, message)
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Tls, message)
    }

    /// Create a timeout error.
    #[must_use]
    pub fn timeout() -> Self {
        Self::new(TransportErrorKind::Timeout, "request timed out")
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::InvalidRequest, message)
    }

    /// Create a body stream error.
    #[must_use]
    pub fn body(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Body, message)
    }

    /// The error category.
    #[must_use]
    pub const fn kind(&self) -> TransportErrorKind {
        self.kind
    }

    /// The error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns `true` if this is a timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        self.kind == TransportErrorKind::Timeout
    }

    /// Returns `true` if this is a connection error.
    #[must_use]
    pub fn is_connect(&self) -> bool {
        self.kind == TransportErrorKind::Connect
    }
}

// ============================================================================
// Error Type
// ============================================================================

/// Every way a courier call can fail.
///
/// A call resolves to exactly one of these or to a fully decoded value.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// The response status was 400 or above.
    #[display("HTTP error {_0}")]
    #[from(skip)]
    Http(#[error(not(source))] u16),

    /// A decoded or raw result was expected but the response had no body.
    #[display("no body in response (status {_0})")]
    #[from(skip)]
    NoBody(#[error(not(source))] u16),

    /// The response body was present but could not be read to the end.
    #[display("could not read response body: {_0}")]
    #[from(skip)]
    BodyRead(TransportError),

    /// The response body could not be decoded into the expected type.
    #[display("could not parse response body")]
    Parsing,

    /// The request body could not be serialized.
    #[display("could not encode request body: {_0}")]
    #[from]
    Encoding(serde_json::Error),

    /// The transport failed; passed through unchanged.
    #[display("{_0}")]
    #[from]
    Transport(TransportError),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns the HTTP status code carried by [`Error::Http`] or [`Error::NoBody`].
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http(status) | Self::NoBody(status) => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if this is an HTTP error with a 4xx status.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Http(status) if (400..500).contains(status))
    }

    /// Returns `true` if this is an HTTP error with a 5xx status.
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Http(status) if (500..600).contains(status))
    }

    /// Returns `true` if this is a 404 Not Found error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Http(404))
    }

    /// Returns `true` if the transport failed.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// The transport error, if any, behind this error.
    #[must_use]
    pub const fn transport_error(&self) -> Option<&TransportError> {
        match self {
            Self::Transport(err) | Self::BodyRead(err) => Some(err),
            _ => None,
        }
    }
}
