//! Route handler: header composition and request dispatch.
//!
//! A [`RouteHandler`] binds a transport to a base URL and a runtime handle.
//! Every call goes through [`RouteHandler::send`]: the URL is the base URL
//! and the path concatenated as plain strings, the request is spawned on the
//! handler's runtime, and the response is classified by an
//! [`Expect`] implementation. The verb helpers (`get`, `post_with_body`,
//! ...) are thin wrappers defined in the `verbs` module.

use std::sync::Arc;

use bytes::Bytes;
use serde::Serialize;
use tokio::runtime::Handle;
use tracing::{Instrument, debug, debug_span};

use crate::{
    Expect, HeaderComposer, Headers, HttpClient, Method, Request, Response, ResponseFuture,
    codec,
};

/// Dispatches requests against a base URL through a transport.
///
/// Holds no per-request state. The base URL and the runtime handle may be
/// changed between calls through `&mut self`; requests already in flight
/// keep the values they started with.
#[derive(Debug)]
pub struct RouteHandler<C> {
    client: Arc<C>,
    base_url: String,
    executor: Handle,
    composer: HeaderComposer,
}

impl<C> Clone for RouteHandler<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            base_url: self.base_url.clone(),
            executor: self.executor.clone(),
            composer: self.composer.clone(),
        }
    }
}

impl<C: HttpClient> RouteHandler<C> {
    /// Create a handler that spawns its requests on `executor`.
    pub fn new(client: Arc<C>, executor: Handle, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            executor,
            composer: HeaderComposer::new(),
        }
    }

    /// Replace the header composer (extra default headers).
    #[must_use]
    pub fn with_composer(mut self, composer: HeaderComposer) -> Self {
        self.composer = composer;
        self
    }

    /// The transport.
    #[must_use]
    pub fn client(&self) -> &Arc<C> {
        &self.client
    }

    /// The base URL every path is appended to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Point subsequent requests at another base URL.
    pub fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.base_url = base_url.into();
    }

    /// The runtime requests are spawned on.
    #[must_use]
    pub fn executor(&self) -> &Handle {
        &self.executor
    }

    /// Spawn subsequent requests on another runtime.
    pub fn set_executor(&mut self, executor: Handle) {
        self.executor = executor;
    }

    // ========================================================================
    // Header Composer
    // ========================================================================

    /// The default header set (declares a JSON content type).
    #[must_use]
    pub fn headers(&self) -> Headers {
        self.composer.headers()
    }

    /// Defaults with `overrides` merged on top (replace-or-add).
    #[must_use]
    pub fn headers_with(
        &self,
        overrides: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
    ) -> Headers {
        self.composer.headers_with(overrides)
    }

    /// Defaults plus `Authorization: Bearer <token>` when a token is given.
    #[must_use]
    pub fn headers_with_token(&self, token: Option<&str>) -> Headers {
        self.composer.headers_with_token(token)
    }

    /// `other` plus the bearer token, merged onto the defaults.
    #[must_use]
    pub fn headers_with_token_and(
        &self,
        token: Option<&str>,
        other: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
    ) -> Headers {
        self.composer.headers_with_token_and(token, other)
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Send a request with an optional raw body and classify the response as `E`.
    ///
    /// `headers: None` uses [`RouteHandler::headers`].
    pub fn send<E: Expect>(
        &self,
        method: Method,
        path: &str,
        headers: Option<Headers>,
        body: Option<Bytes>,
    ) -> ResponseFuture<E::Output> {
        let headers = headers.unwrap_or_else(|| self.headers());
        let request = Self::build_request(&self.base_url, method, path, headers, body);
        self.submit::<E>(request)
    }

    /// Encode `body` as JSON, then [`send`](Self::send) it.
    ///
    /// If encoding fails the returned future has already failed with
    /// [`Error::Encoding`](crate::Error::Encoding) and nothing is sent.
    pub fn send_json<E: Expect, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        headers: Option<Headers>,
        body: &B,
    ) -> ResponseFuture<E::Output> {
        match codec::encode(body) {
            Ok(bytes) => self.send::<E>(method, path, headers, Some(bytes)),
            Err(err) => ResponseFuture::failed(err),
        }
    }

    pub(crate) fn send_with_base<E: Expect>(
        &self,
        base_url: &str,
        method: Method,
        path: &str,
        headers: Headers,
    ) -> ResponseFuture<E::Output> {
        let request = Self::build_request(base_url, method, path, headers, None);
        self.submit::<E>(request)
    }

    fn build_request(
        base_url: &str,
        method: Method,
        path: &str,
        headers: Headers,
        body: Option<Bytes>,
    ) -> Request {
        Request::builder(method, format!("{base_url}{path}"))
            .headers(headers)
            .maybe_body(body)
            .build()
    }

    fn submit<E: Expect>(&self, request: Request) -> ResponseFuture<E::Output> {
        let span = debug_span!("dispatch", method = %request.method(), url = request.url());
        let client = Arc::clone(&self.client);

        let task = self.executor.spawn(
            async move {
                let response = client.execute(request).await?;
                if E::NEEDS_BODY {
                    return E::classify(response).await;
                }

                let (status, headers, body) = response.into_parts();
                if let Some(body) = body {
                    tokio::spawn(
                        async move {
                            if let Err(err) = body.drain().await {
                                debug!(error = %err, "discarded response body failed");
                            }
                        }
                        .in_current_span(),
                    );
                }
                E::classify(Response::new(status, headers, None)).await
            }
            .instrument(span),
        );

        ResponseFuture::spawned(task)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use assert2::{check, let_assert};
    use courier_core::{Json, Raw, ResponseBody, TransportError, Void};
    use futures_util::stream;
    use tokio::sync::oneshot;

    use super::*;
    use crate::Error;

    /// Records requests and answers based on the URL suffix.
    #[derive(Default)]
    struct Recorder {
        requests: Mutex<Vec<Request>>,
    }

    impl Recorder {
        fn requests(&self) -> Vec<Request> {
            self.requests.lock().expect("lock").clone()
        }
    }

    impl HttpClient for Recorder {
        async fn execute(&self, request: Request) -> std::result::Result<Response, TransportError> {
            let reply = if request.url().ends_with("/missing") {
                Response::buffered(404, r#"{"message":"Not Found"}"#)
            } else if request.url().ends_with("/refused") {
                return Err(TransportError::connect("connection refused"));
            } else {
                Response::buffered(200, r#"{"id":1}"#)
            };
            self.requests.lock().expect("lock").push(request);
            Ok(reply)
        }
    }

    #[derive(Debug, PartialEq, serde::Deserialize)]
    struct Item {
        id: u64,
    }

    fn handler(base_url: &str) -> (Arc<Recorder>, RouteHandler<Recorder>) {
        let recorder = Arc::new(Recorder::default());
        let handler = RouteHandler::new(Arc::clone(&recorder), Handle::current(), base_url);
        (recorder, handler)
    }

    #[tokio::test]
    async fn url_is_base_plus_path_verbatim() {
        let (recorder, handler) = handler("https://api.example.com");

        handler
            .send::<Json<Item>>(Method::Get, "/users/alice/repos", None, None)
            .await
            .expect("item");
        handler
            .send::<Void>(Method::Get, "//odd/../path?q=a b", None, None)
            .await
            .expect("void");

        let urls: Vec<_> = recorder.requests().iter().map(|r| r.url().to_string()).collect();
        check!(urls == vec![
            "https://api.example.com/users/alice/repos".to_string(),
            "https://api.example.com//odd/../path?q=a b".to_string(),
        ]);
    }

    #[tokio::test]
    async fn missing_headers_use_defaults() {
        let (recorder, handler) = handler("https://api.example.com");

        handler
            .send::<Void>(Method::Get, "/", None, None)
            .await
            .expect("void");

        let requests = recorder.requests();
        let_assert!([request] = requests.as_slice());
        check!(request.header("Content-Type") == Some("application/json"));
    }

    #[tokio::test]
    async fn given_headers_are_sent_as_is() {
        let (recorder, handler) = handler("https://api.example.com");

        handler
            .send::<Void>(Method::Get, "/", Some(Headers::new().with("X-Only", "1")), None)
            .await
            .expect("void");

        let requests = recorder.requests();
        let_assert!([request] = requests.as_slice());
        check!(request.headers() == &Headers::new().with("X-Only", "1"));
    }

    #[tokio::test]
    async fn send_json_encodes_body() {
        let (recorder, handler) = handler("https://api.example.com");

        handler
            .send_json::<Void, _>(Method::Post, "/items", None, &serde_json::json!({"name": "x"}))
            .await
            .expect("void");

        let requests = recorder.requests();
        let_assert!([request] = requests.as_slice());
        check!(request.method() == Method::Post);
        check!(request.body() == Some(&Bytes::from_static(br#"{"name":"x"}"#)));
    }

    #[tokio::test]
    async fn encoding_failure_sends_nothing() {
        let (recorder, handler) = handler("https://api.example.com");
        let mut bad = std::collections::HashMap::new();
        bad.insert(vec![1_u8], "non-string key");

        let_assert!(
            Err(Error::Encoding(_)) = handler
                .send_json::<Void, _>(Method::Post, "/items", None, &bad)
                .await
        );
        check!(recorder.requests().is_empty());
    }

    #[tokio::test]
    async fn transport_errors_pass_through() {
        let (_, handler) = handler("https://api.example.com");

        let_assert!(
            Err(Error::Transport(err)) = handler
                .send::<Json<Item>>(Method::Get, "/refused", None, None)
                .await
        );
        check!(err == TransportError::connect("connection refused"));
    }

    #[tokio::test]
    async fn http_errors_are_classified() {
        let (_, handler) = handler("https://api.example.com");

        let_assert!(
            Err(Error::Http(404)) = handler
                .send::<Json<Item>>(Method::Get, "/missing", None, None)
                .await
        );
    }

    #[tokio::test]
    async fn send_with_base_overrides_base_url() {
        let (recorder, handler) = handler("https://api.example.com");

        let bytes = handler
            .send_with_base::<Raw>("https://cdn.example.com", Method::Get, "/logo.png", Headers::new())
            .await
            .expect("bytes");

        check!(bytes.as_ref() == br#"{"id":1}"#);
        let requests = recorder.requests();
        let_assert!([request] = requests.as_slice());
        check!(request.url() == "https://cdn.example.com/logo.png");
        check!(request.headers().is_empty());
    }

    #[tokio::test]
    async fn reconfigured_base_url_applies_to_next_call() {
        let (recorder, mut handler) = handler("https://api.example.com");
        handler.set_base_url("https://staging.example.com/v2");

        handler
            .send::<Void>(Method::Delete, "/items/1", None, None)
            .await
            .expect("void");

        let requests = recorder.requests();
        let_assert!([request] = requests.as_slice());
        check!(request.url() == "https://staging.example.com/v2/items/1");
        check!(handler.base_url() == "https://staging.example.com/v2");
    }

    #[tokio::test]
    async fn extra_default_headers() {
        let (recorder, handler) = handler("https://api.example.com");
        let handler = handler.with_composer(HeaderComposer::new().with_default("User-Agent", "courier-tests"));

        check!(handler.headers().get("user-agent") == Some("courier-tests"));
        check!(handler.headers_with_token(Some("abc")).get("authorization") == Some("Bearer abc"));

        handler
            .send::<Void>(Method::Get, "/", None, None)
            .await
            .expect("void");
        let requests = recorder.requests();
        let_assert!([request] = requests.as_slice());
        check!(request.header("user-agent") == Some("courier-tests"));
        check!(request.header("content-type") == Some("application/json"));
    }

    /// Answers with a fixed status and a body that signals once it is read
    /// to the end, or never ends.
    struct Streaming {
        status: u16,
        drained: Mutex<Option<oneshot::Sender<()>>>,
    }

    impl HttpClient for Streaming {
        async fn execute(&self, _request: Request) -> std::result::Result<Response, TransportError> {
            let drained = self.drained.lock().expect("lock").take();
            let body = match drained {
                Some(tx) => ResponseBody::new(stream::unfold(Some(tx), |tx| async move {
                    tx.map(|tx| {
                        let _ = tx.send(());
                        (Ok(Bytes::from_static(b"{}")), None)
                    })
                })),
                None => ResponseBody::new(stream::pending()),
            };
            Ok(Response::new(self.status, Headers::new(), Some(body)))
        }
    }

    fn streaming(status: u16, drained: Option<oneshot::Sender<()>>) -> RouteHandler<Streaming> {
        let client = Streaming {
            status,
            drained: Mutex::new(drained),
        };
        RouteHandler::new(Arc::new(client), Handle::current(), "https://api.example.com")
    }

    #[tokio::test]
    async fn status_only_calls_ignore_stalled_body() {
        let handler = streaming(500, None);

        let void = handler.send::<Void>(Method::Post, "/jobs", None, None);
        let_assert!(Ok(Err(Error::Http(500))) = tokio::time::timeout(Duration::from_secs(5), void).await);

        let raw = handler.send::<Raw>(Method::Get, "/logo.png", None, None);
        let_assert!(Ok(Err(Error::Http(500))) = tokio::time::timeout(Duration::from_secs(5), raw).await);
    }

    #[tokio::test]
    async fn void_drains_unread_body() {
        let (tx, rx) = oneshot::channel();
        let handler = streaming(200, Some(tx));

        handler
            .send::<Void>(Method::Delete, "/items/1", None, None)
            .await
            .expect("void");

        let_assert!(Ok(Ok(())) = tokio::time::timeout(Duration::from_secs(5), rx).await);
    }
}
