//! Client shell: owns the transport and the route handler.
//!
//! API clients are built on top of an [`ApiClient`], usually by wrapping it
//! and exposing one method per endpoint. The shell adds two things to the
//! [`RouteHandler`] it derefs to:
//!
//! - [`hop`](ApiClient::hop): move subsequent calls to another runtime
//! - on drop, [`HttpClient::shutdown`] runs synchronously and any owned
//!   runtime is released
//!
//! # Example
//!
//! ```ignore
//! use courier::ApiClient;
//!
//! let client = ApiClient::builder("https://api.github.com")
//!     .default_header("User-Agent", "courier")
//!     .build()?;
//!
//! let repos: Vec<Repository> = client.get("/users/octocat/repos", None).await?;
//! ```

use std::ops::Deref;
use std::sync::Arc;

use tokio::runtime::{Handle, Runtime};
use tracing::debug;

use crate::{HeaderComposer, HttpClient, HyperClient, RouteHandler};

/// Where an [`ApiClient`] runs its requests.
#[derive(Debug, Clone, Default)]
pub enum ExecutorProvider {
    /// Spawn on an existing runtime.
    Shared(Handle),
    /// Build a dedicated multi-threaded runtime, owned and released by the
    /// client.
    #[default]
    CreateNew,
}

/// API client shell.
///
/// Derefs to its [`RouteHandler`], so every verb operation is available
/// directly on the client.
#[derive(Debug)]
pub struct ApiClient<C: HttpClient = HyperClient> {
    handler: RouteHandler<C>,
    runtime: Option<Runtime>,
}

impl ApiClient<HyperClient> {
    /// Start building a client on the default hyper transport.
    #[must_use]
    pub fn builder(base_url: impl Into<String>) -> ApiClientBuilder<HyperClient> {
        ApiClientBuilder::new(base_url)
    }
}

impl<C: HttpClient> ApiClient<C> {
    /// Wrap an already configured route handler.
    #[must_use]
    pub fn from_handler(handler: RouteHandler<C>) -> Self {
        Self {
            handler,
            runtime: None,
        }
    }

    /// Create a client over `client`, running requests on `executor`.
    #[must_use]
    pub fn new(client: C, executor: Handle, base_url: impl Into<String>) -> Self {
        Self::from_handler(RouteHandler::new(Arc::new(client), executor, base_url))
    }

    /// The route handler.
    #[must_use]
    pub fn handler(&self) -> &RouteHandler<C> {
        &self.handler
    }

    /// Mutable access to the route handler, e.g. to change its base URL.
    pub fn handler_mut(&mut self) -> &mut RouteHandler<C> {
        &mut self.handler
    }

    /// Point subsequent requests at another base URL.
    pub fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.handler.set_base_url(base_url);
    }

    /// Run subsequent requests on `executor`.
    ///
    /// Requests already in flight finish where they started. Base URL and
    /// default headers are kept. An owned runtime stays alive until the
    /// client is dropped.
    pub fn hop(&mut self, executor: Handle) {
        self.handler.set_executor(executor);
    }

    /// Builder-style [`ApiClient::hop`].
    #[must_use]
    pub fn hopped(mut self, executor: Handle) -> Self {
        self.hop(executor);
        self
    }
}

impl<C: HttpClient> Deref for ApiClient<C> {
    type Target = RouteHandler<C>;

    fn deref(&self) -> &Self::Target {
        &self.handler
    }
}

impl<C: HttpClient> Drop for ApiClient<C> {
    fn drop(&mut self) {
        if let Err(err) = self.handler.client().shutdown() {
            debug!(error = %err, "transport shutdown failed");
        }
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

/// Builder for [`ApiClient`].
#[derive(Debug)]
pub struct ApiClientBuilder<C = HyperClient> {
    base_url: String,
    executor: Option<ExecutorProvider>,
    composer: HeaderComposer,
    client: C,
}

impl ApiClientBuilder<HyperClient> {
    fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            executor: None,
            composer: HeaderComposer::new(),
            client: HyperClient::new(),
        }
    }
}

impl<C: HttpClient> ApiClientBuilder<C> {
    /// Run requests on an existing runtime.
    #[must_use]
    pub fn executor(mut self, handle: Handle) -> Self {
        self.executor = Some(ExecutorProvider::Shared(handle));
        self
    }

    /// Run requests on a runtime owned by the client.
    #[must_use]
    pub fn create_runtime(mut self) -> Self {
        self.executor = Some(ExecutorProvider::CreateNew);
        self
    }

    /// Set the executor provider.
    #[must_use]
    pub fn executor_provider(mut self, provider: ExecutorProvider) -> Self {
        self.executor = Some(provider);
        self
    }

    /// Add a header sent by default with every request.
    #[must_use]
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.composer = self.composer.with_default(name, value);
        self
    }

    /// Use another transport.
    #[must_use]
    pub fn client<D: HttpClient>(self, client: D) -> ApiClientBuilder<D> {
        ApiClientBuilder {
            base_url: self.base_url,
            executor: self.executor,
            composer: self.composer,
            client,
        }
    }

    /// Build the client.
    ///
    /// Without an explicit executor the current runtime is shared if there
    /// is one; otherwise a dedicated runtime is created.
    ///
    /// # Errors
    ///
    /// Returns an error if a dedicated runtime could not be created.
    pub fn build(self) -> std::io::Result<ApiClient<C>> {
        let provider = self.executor.unwrap_or_else(|| {
            Handle::try_current().map_or(ExecutorProvider::CreateNew, ExecutorProvider::Shared)
        });

        let (executor, runtime) = match provider {
            ExecutorProvider::Shared(handle) => (handle, None),
            ExecutorProvider::CreateNew => {
                let runtime = tokio::runtime::Builder::new_multi_thread()
                    .thread_name("courier-worker")
                    .enable_all()
                    .build()?;
                debug!("created dedicated runtime");
                (runtime.handle().clone(), Some(runtime))
            }
        };

        let handler = RouteHandler::new(Arc::new(self.client), executor, self.base_url)
            .with_composer(self.composer);

        Ok(ApiClient { handler, runtime })
    }
}
