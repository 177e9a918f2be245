//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types for easy glob
//! importing:
//!
//! ```ignore
//! use courier_core::prelude::*;
//! ```

pub use crate::{
    ContentType, Error, Expect, HeaderComposer, Headers, HttpClient, Json, Method, Raw, Request,
    RequestBuilder, Response, ResponseBody, Result, TransportError, Void,
};
