//! Typed HTTP request/response pipeline for building API clients.
//!
//! A [`RouteHandler`] turns `(verb, path, headers, body)` into a request,
//! runs it on a tokio runtime through an [`HttpClient`] transport and
//! classifies the response into a typed value or an [`Error`]. An
//! [`ApiClient`] owns the handler and shuts the transport down on drop.
//!
//! # Example
//!
//! ```ignore
//! use courier::prelude::*;
//!
//! #[derive(Debug, Deserialize)]
//! pub struct Repository {
//!     id: u64,
//!     name: Option<String>,
//! }
//!
//! let client = ApiClient::builder("https://api.github.com")
//!     .default_header("User-Agent", "courier")
//!     .build()?;
//!
//! let repos: Vec<Repository> = client.get("/users/octocat/repos", None).await?;
//! ```

mod api_client;
mod client;
mod config;
mod connector;
mod future;
mod handler;
pub mod middleware;
pub mod prelude;
#[cfg(test)]
mod testing;
mod verbs;

// Re-export client types
pub use api_client::{ApiClient, ApiClientBuilder, ExecutorProvider};
pub use client::{BoxedService, HyperClient, HyperClientBuilder, ServiceFuture};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use future::ResponseFuture;
pub use handler::RouteHandler;

pub use bytes::Bytes;

// Re-export tower for middleware composition
pub use tower;

// Re-export core types
pub use courier_core::{
    AUTHORIZATION, CONTENT_TYPE, ContentType, DecodeError, Error, Expect, HeaderComposer, Headers,
    HttpClient, Json, Method, Raw, Request, RequestBuilder, Response, ResponseBody, Result,
    TransportError, TransportErrorKind, Void, codec,
};
