//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types for easy glob
//! importing:
//!
//! ```ignore
//! use courier::prelude::*;
//! ```

pub use crate::{
    ApiClient, ClientConfig, Error, Headers, HttpClient, HyperClient, Method, ResponseFuture,
    Result, RouteHandler, codec::iso8601,
};
pub use serde::{Deserialize, Serialize};
