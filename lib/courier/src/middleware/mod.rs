//! Tower middleware layers for the default transport.
//!
//! Layers wrap the [`HyperClient`](crate::HyperClient) service and see every
//! request descriptor before it reaches hyper, and every response descriptor
//! before it reaches the classifier. Add them with
//! [`HyperClientBuilder::layer`](crate::HyperClientBuilder::layer) or one of
//! the helper methods.
//!
//! # Available Layers
//!
//! - [`LoggingLayer`] - Logs requests/responses using `tracing`
//!
//! # Example
//!
//! ```ignore
//! use courier::HyperClient;
//! use courier::middleware::LoggingLayer;
//!
//! let client = HyperClient::builder()
//!     .layer(LoggingLayer::debug())
//!     .build();
//! ```

mod logging;

pub use logging::{LogLevel, Logging, LoggingLayer};

// Re-export tower types for convenience
pub use tower::{Layer, ServiceBuilder};
