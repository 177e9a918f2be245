//! Transport trait.
//!
//! [`HttpClient`] is the only seam between the pipeline and the network.
//! It receives a fully formed [`Request`] and resolves to a [`Response`] or
//! a [`TransportError`]; connections, pooling, TLS and timeouts all live
//! behind it. Implement it to plug in another HTTP stack or a test double.

use std::future::Future;

use crate::{Request, Response, TransportError};

/// Core HTTP transport trait.
///
/// # Example
///
/// ```
/// use courier_core::{HttpClient, Request, Response, TransportError};
///
/// /// Answers every request with `204 No Content`.
/// struct NoContent;
///
/// impl HttpClient for NoContent {
///     async fn execute(&self, _request: Request) -> Result<Response, TransportError> {
///         Ok(Response::empty(204))
///     }
/// }
/// ```
pub trait HttpClient: Send + Sync + 'static {
    /// Execute an HTTP request and return the response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails for any reason:
    /// - Network errors
    /// - TLS errors
    /// - Timeouts
    /// - Invalid request (e.g. an unparsable URL)
    fn execute(
        &self,
        request: Request,
    ) -> impl Future<Output = Result<Response, TransportError>> + Send;

    /// Release the transport's resources.
    ///
    /// Called synchronously when the owning client is dropped; failures are
    /// ignored by the caller. The default does nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport could not shut down cleanly.
    fn shutdown(&self) -> Result<(), TransportError> {
        Ok(())
    }
}
