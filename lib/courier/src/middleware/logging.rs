//! Request/response logging middleware.
//!
//! This middleware logs transport requests and responses using the `tracing`
//! crate.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use tower::{Layer, Service};
use tracing::{Instrument, Level, debug, info, span, warn};

use crate::{Headers, Request, Response, TransportError};

/// Headers whose values never reach the logs.
const REDACTED_HEADERS: [&str; 4] = ["authorization", "proxy-authorization", "cookie", "set-cookie"];

/// Copy of `headers` safe to log: credential values are masked.
fn redacted(headers: &Headers) -> Headers {
    headers
        .iter()
        .map(|(name, value)| {
            let sensitive = REDACTED_HEADERS
                .iter()
                .any(|redacted| name.eq_ignore_ascii_case(redacted));
            (name, if sensitive { "[redacted]" } else { value })
        })
        .collect()
}

/// Layer that adds request/response logging.
///
/// # Example
///
/// ```ignore
/// use courier::middleware::LoggingLayer;
/// use tower::ServiceBuilder;
///
/// let service = ServiceBuilder::new()
///     .layer(LoggingLayer::new())
///     .service(client);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingLayer {
    level: LogLevel,
}

/// Log level for the logging middleware.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// Log at debug level (request/response details).
    Debug,
    /// Log at info level (summary only).
    #[default]
    Info,
}

impl LoggingLayer {
    /// Create a new logging layer with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a logging layer that logs at debug level.
    #[must_use]
    pub fn debug() -> Self {
        Self {
            level: LogLevel::Debug,
        }
    }

    /// The configured level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = Logging<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Logging {
            inner,
            level: self.level,
        }
    }
}

/// Service that logs requests and responses.
#[derive(Debug, Clone)]
pub struct Logging<S> {
    inner: S,
    level: LogLevel,
}

impl<S> Logging<S> {
    /// Create a new logging service wrapping the given service.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            level: LogLevel::Info,
        }
    }
}

impl<S> Service<Request> for Logging<S>
where
    S: Service<Request, Response = Response, Error = TransportError> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = TransportError;
    type Future = Pin<Box<dyn Future<Output = Result<Response, TransportError>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), TransportError>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let method = request.method();
        let url = request.url().to_string();
        let level = self.level;

        let span = span!(Level::INFO, "http_request", %method, %url);

        let mut inner = self.inner.clone();
        Box::pin(
            async move {
                let start = Instant::now();

                match level {
                    LogLevel::Debug => {
                        debug!(
                            headers = ?redacted(request.headers()),
                            body_len = request.body().map_or(0, bytes::Bytes::len),
                            "sending request"
                        );
                    }
                    LogLevel::Info => {
                        info!("sending request");
                    }
                }

                let result = inner.call(request).await;

                // Saturating conversion to u64 (truncates after ~584 million years)
                let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

                match &result {
                    Ok(response) => {
                        let status = response.status();
                        let has_body = response.has_body();
                        if response.is_error() {
                            warn!(status, has_body, elapsed_ms, "request failed with HTTP error");
                        } else if level == LogLevel::Debug {
                            debug!(
                                status,
                                has_body,
                                elapsed_ms,
                                headers = ?redacted(response.headers()),
                                "request completed"
                            );
                        } else {
                            info!(status, elapsed_ms, "request completed");
                        }
                    }
                    Err(err) => {
                        warn!(error = %err, elapsed_ms, "request failed");
                    }
                }

                result
            }
            .instrument(span),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use courier_core::Method;
    use tower::ServiceExt;

    use super::*;

    #[test]
    fn logging_layer_default() {
        assert_eq!(LoggingLayer::new().level(), LogLevel::Info);
    }

    #[test]
    fn logging_layer_debug() {
        assert_eq!(LoggingLayer::debug().level(), LogLevel::Debug);
    }

    #[test]
    fn credentials_are_redacted() {
        let headers = Headers::new()
            .with("Authorization", "Bearer secret-token")
            .with("proxy-authorization", "Basic c2VjcmV0")
            .with("Content-Type", "application/json");

        let logged = redacted(&headers);
        assert_eq!(logged.get("authorization"), Some("[redacted]"));
        assert_eq!(logged.get("Proxy-Authorization"), Some("[redacted]"));
        assert_eq!(logged.get("content-type"), Some("application/json"));
        assert_eq!(logged.len(), 3);

        let debug = format!("{logged:?}");
        assert!(!debug.contains("secret"));
        assert!(!debug.contains("c2VjcmV0"));
    }

    #[tokio::test]
    async fn logging_passes_request_and_response_through() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let recorder = {
            let seen = Arc::clone(&seen);
            tower::service_fn(move |request: Request| {
                let seen = Arc::clone(&seen);
                async move {
                    seen.lock()
                        .unwrap_or_else(std::sync::PoisonError::into_inner)
                        .push(request.url().to_string());
                    Ok::<_, TransportError>(Response::empty(204))
                }
            })
        };

        let service = LoggingLayer::debug().layer(recorder);
        let request = Request::builder(Method::Delete, "https://api.example.com/items/1").build();
        let response = service.oneshot(request).await.expect("response");

        assert_eq!(response.status(), 204);
        assert_eq!(
            *seen.lock().expect("lock"),
            vec!["https://api.example.com/items/1".to_string()]
        );
    }

    #[tokio::test]
    async fn logging_passes_errors_through() {
        let failing = tower::service_fn(|_request: Request| async {
            Err::<Response, _>(TransportError::connect("connection refused"))
        });

        let service = LoggingLayer::new().layer(failing);
        let request = Request::builder(Method::Get, "https://api.example.com/").build();
        let err = service.oneshot(request).await.expect_err("should fail");

        assert!(err.is_connect());
    }
}
