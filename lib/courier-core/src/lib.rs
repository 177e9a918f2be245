//! Core types and traits for the courier typed HTTP API pipeline.
//!
//! This crate provides the transport-agnostic half of courier:
//! - [`Error`], [`TransportError`] and [`Result`] - the closed error taxonomy
//! - [`Headers`] and [`HeaderComposer`] - replace-or-add header sets
//! - [`codec`] - JSON encoding/decoding with ISO-8601 timestamps
//! - [`Request`] and [`Response`] - request/response descriptors
//! - [`HttpClient`] - the transport trait
//! - [`Expect`] with [`Json`], [`Void`] and [`Raw`] - response classification
//! - [`Method`] - HTTP method enum

mod classify;
mod client;
pub mod codec;
mod error;
mod headers;
mod method;
pub mod prelude;
mod request;
mod response;

pub use classify::{Expect, Json, Raw, Void};
pub use client::HttpClient;
pub use codec::{ContentType, DecodeError};
pub use error::{Error, Result, TransportError, TransportErrorKind};
pub use headers::{AUTHORIZATION, CONTENT_TYPE, HeaderComposer, Headers};
pub use method::Method;
pub use request::{Request, RequestBuilder};
pub use response::{Response, ResponseBody};
