//! Response descriptors.
//!
//! A [`Response`] is what a transport hands back: a status, headers and an
//! optional [`ResponseBody`]. The body is lazy: nothing is read until a
//! classifier asks for it, so status-only checks never wait on body bytes.
//!
//! `None` means the transport knew from the response head that no body
//! follows. A present body may still end without a single byte;
//! [`ResponseBody::read`] reports that as `None` too, which is distinct from
//! a body that fails halfway through.

use std::pin::Pin;

use bytes::Bytes;
use futures_core::Stream;
use futures_util::{StreamExt, stream};

use crate::{Headers, TransportError};

/// A response body: chunks of bytes arriving over time.
///
/// Read it to the end with [`ResponseBody::collect`].
pub struct ResponseBody {
    stream: Pin<Box<dyn Stream<Item = Result<Bytes, TransportError>> + Send>>,
}

impl ResponseBody {
    /// Wrap a stream of chunks.
    pub fn new<S>(stream: S) -> Self
    where
        S: Stream<Item = Result<Bytes, TransportError>> + Send + 'static,
    {
        Self {
            stream: Box::pin(stream),
        }
    }

    /// A body whose bytes are already in memory.
    #[must_use]
    pub fn full(bytes: impl Into<Bytes>) -> Self {
        Self::new(stream::once(std::future::ready(Ok(bytes.into()))))
    }

    /// Buffer the entire stream.
    ///
    /// # Errors
    ///
    /// Returns the first error yielded by the stream.
    pub async fn collect(self) -> Result<Bytes, TransportError> {
        let mut body = self.stream;
        let mut collected = Vec::new();

        while let Some(chunk) = body.next().await {
            collected.extend_from_slice(&chunk?);
        }

        Ok(Bytes::from(collected))
    }

    /// Buffer the entire stream, or `None` if it ended without any bytes.
    ///
    /// # Errors
    ///
    /// Returns the first error yielded by the stream.
    pub async fn read(self) -> Result<Option<Bytes>, TransportError> {
        let bytes = self.collect().await?;
        Ok((!bytes.is_empty()).then_some(bytes))
    }

    /// Read the stream to its end, discarding the bytes.
    ///
    /// Lets the transport reuse the connection for a body nobody needs.
    ///
    /// # Errors
    ///
    /// Returns the first error yielded by the stream.
    pub async fn drain(self) -> Result<(), TransportError> {
        let mut body = self.stream;
        while let Some(chunk) = body.next().await {
            chunk?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for ResponseBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseBody").finish_non_exhaustive()
    }
}

impl From<Bytes> for ResponseBody {
    fn from(bytes: Bytes) -> Self {
        Self::full(bytes)
    }
}

/// HTTP response with status, headers, and optional body.
#[derive(Debug)]
pub struct Response {
    status: u16,
    headers: Headers,
    body: Option<ResponseBody>,
}

impl Response {
    /// Creates a new response.
    #[must_use]
    pub fn new(status: u16, headers: Headers, body: Option<ResponseBody>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// A response without body.
    #[must_use]
    pub fn empty(status: u16) -> Self {
        Self::new(status, Headers::new(), None)
    }

    /// A response with an in-memory body.
    #[must_use]
    pub fn buffered(status: u16, body: impl Into<Bytes>) -> Self {
        Self::new(status, Headers::new(), Some(ResponseBody::full(body)))
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Response headers.
    #[must_use]
    pub const fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Single header value by name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// Returns `true` unless the response head announced that no body follows.
    #[must_use]
    pub const fn has_body(&self) -> bool {
        self.body.is_some()
    }

    /// Consume into (status, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (u16, Headers, Option<ResponseBody>) {
        (self.status, self.headers, self.body)
    }

    /// Status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Status is 400 or above.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.status >= 400
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn body_collects_chunks() {
        let body = ResponseBody::new(stream::iter([
            Ok(Bytes::from_static(b"[{\"id\"")),
            Ok(Bytes::from_static(b":1}]")),
        ]));

        let bytes = body.collect().await.expect("collect");
        assert_eq!(bytes.as_ref(), br#"[{"id":1}]"#);
    }

    #[tokio::test]
    async fn body_stops_at_first_error() {
        let body = ResponseBody::new(stream::iter([
            Ok(Bytes::from_static(b"partial")),
            Err(TransportError::body("connection reset")),
            Ok(Bytes::from_static(b"never read")),
        ]));

        let err = body.collect().await.expect_err("should fail");
        assert_eq!(err, TransportError::body("connection reset"));
    }

    #[tokio::test]
    async fn read_empty_stream_is_none() {
        let body = ResponseBody::new(stream::iter([Ok(Bytes::new()), Ok(Bytes::new())]));
        assert_eq!(body.read().await, Ok(None));

        let body = ResponseBody::full("{}");
        assert_eq!(body.read().await, Ok(Some(Bytes::from_static(b"{}"))));
    }

    #[tokio::test]
    async fn drain_consumes_every_chunk() {
        let body = ResponseBody::new(stream::iter([
            Ok(Bytes::from_static(b"ignored")),
            Ok(Bytes::from_static(b"too")),
        ]));
        assert_eq!(body.drain().await, Ok(()));

        let body = ResponseBody::new(stream::iter([Err(TransportError::body("reset"))]));
        assert_eq!(body.drain().await, Err(TransportError::body("reset")));
    }

    #[test]
    fn response_basic() {
        let response = Response::new(
            200,
            Headers::new().with("Content-Type", "application/json"),
            Some(ResponseBody::full(r#"{"id":1}"#)),
        );

        assert_eq!(response.status(), 200);
        assert_eq!(response.header("content-type"), Some("application/json"));
        assert!(response.has_body());
        assert!(response.is_success());
        assert!(!response.is_error());
    }

    #[test]
    fn response_status_checks() {
        assert!(!Response::empty(204).has_body());
        assert!(Response::empty(204).is_success());
        assert!(!Response::empty(302).is_success());
        assert!(Response::empty(401).is_error());
        assert!(Response::buffered(500, "oops").is_error());
    }

    #[test]
    fn response_body_is_debug() {
        let debug = format!("{:?}", Response::buffered(200, "x"));
        assert!(debug.contains("ResponseBody"));
    }
}
