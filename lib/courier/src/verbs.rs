//! Per-verb operations on [`RouteHandler`].
//!
//! Each method is a one-line composition over [`RouteHandler::send`] or
//! [`RouteHandler::send_json`]; the suffix tells what comes back:
//!
//! - no suffix: a JSON body decoded into `T`
//! - `_void`: nothing, only the status is checked
//! - `_with_body`: the request carries a JSON-encoded body
//! - `_with_data`: the request carries a raw byte body
//!
//! Passing `headers: None` sends [`RouteHandler::headers`].

use bytes::Bytes;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{Headers, HttpClient, Json, Method, Raw, ResponseFuture, RouteHandler, Void};

impl<C: HttpClient> RouteHandler<C> {
    // ------------------------------------------------------------------------
    // GET
    // ------------------------------------------------------------------------

    /// `GET path`, decoding the response body.
    pub fn get<T>(&self, path: &str, headers: Option<Headers>) -> ResponseFuture<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        self.send::<Json<T>>(Method::Get, path, headers, None)
    }

    /// `GET path` with a JSON body, decoding the response body.
    pub fn get_with_body<T, B>(
        &self,
        path: &str,
        headers: Option<Headers>,
        body: &B,
    ) -> ResponseFuture<T>
    where
        T: DeserializeOwned + Send + 'static,
        B: Serialize + ?Sized,
    {
        self.send_json::<Json<T>, B>(Method::Get, path, headers, body)
    }

    /// `GET path` for raw bytes, optionally against another base URL.
    ///
    /// Sends no headers at all, not even the defaults. Meant for binary
    /// downloads such as images served from a CDN.
    pub fn get_data(&self, base_url: Option<&str>, path: &str) -> ResponseFuture<Bytes> {
        let base_url = base_url.unwrap_or_else(|| self.base_url());
        self.send_with_base::<Raw>(base_url, Method::Get, path, Headers::new())
    }

    // ------------------------------------------------------------------------
    // POST
    // ------------------------------------------------------------------------

    /// `POST path` without body, decoding the response body.
    pub fn post<T>(&self, path: &str, headers: Option<Headers>) -> ResponseFuture<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        self.send::<Json<T>>(Method::Post, path, headers, None)
    }

    /// `POST path` with a JSON body, decoding the response body.
    pub fn post_with_body<T, B>(
        &self,
        path: &str,
        headers: Option<Headers>,
        body: &B,
    ) -> ResponseFuture<T>
    where
        T: DeserializeOwned + Send + 'static,
        B: Serialize + ?Sized,
    {
        self.send_json::<Json<T>, B>(Method::Post, path, headers, body)
    }

    /// `POST path` with a JSON body.
    pub fn post_with_body_void<B>(
        &self,
        path: &str,
        headers: Option<Headers>,
        body: &B,
    ) -> ResponseFuture<()>
    where
        B: Serialize + ?Sized,
    {
        self.send_json::<Void, B>(Method::Post, path, headers, body)
    }

    /// `POST path` with a raw body.
    pub fn post_with_data_void(
        &self,
        path: &str,
        headers: Option<Headers>,
        data: impl Into<Bytes>,
    ) -> ResponseFuture<()> {
        self.send::<Void>(Method::Post, path, headers, Some(data.into()))
    }

    /// `POST path` without body.
    pub fn post_void(&self, path: &str, headers: Option<Headers>) -> ResponseFuture<()> {
        self.send::<Void>(Method::Post, path, headers, None)
    }

    // ------------------------------------------------------------------------
    // PUT
    // ------------------------------------------------------------------------

    /// `PUT path` without body, decoding the response body.
    pub fn put<T>(&self, path: &str, headers: Option<Headers>) -> ResponseFuture<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        self.send::<Json<T>>(Method::Put, path, headers, None)
    }

    /// `PUT path` with a JSON body, decoding the response body.
    pub fn put_with_body<T, B>(
        &self,
        path: &str,
        headers: Option<Headers>,
        body: &B,
    ) -> ResponseFuture<T>
    where
        T: DeserializeOwned + Send + 'static,
        B: Serialize + ?Sized,
    {
        self.send_json::<Json<T>, B>(Method::Put, path, headers, body)
    }

    /// `PUT path` with a JSON body.
    pub fn put_with_body_void<B>(
        &self,
        path: &str,
        headers: Option<Headers>,
        body: &B,
    ) -> ResponseFuture<()>
    where
        B: Serialize + ?Sized,
    {
        self.send_json::<Void, B>(Method::Put, path, headers, body)
    }

    /// `PUT path` with a raw body.
    pub fn put_with_data_void(
        &self,
        path: &str,
        headers: Option<Headers>,
        data: impl Into<Bytes>,
    ) -> ResponseFuture<()> {
        self.send::<Void>(Method::Put, path, headers, Some(data.into()))
    }

    /// `PUT path` without body.
    pub fn put_void(&self, path: &str, headers: Option<Headers>) -> ResponseFuture<()> {
        self.send::<Void>(Method::Put, path, headers, None)
    }

    // ------------------------------------------------------------------------
    // PATCH
    // ------------------------------------------------------------------------

    /// `PATCH path` with a JSON body, decoding the response body.
    pub fn patch_with_body<T, B>(
        &self,
        path: &str,
        headers: Option<Headers>,
        body: &B,
    ) -> ResponseFuture<T>
    where
        T: DeserializeOwned + Send + 'static,
        B: Serialize + ?Sized,
    {
        self.send_json::<Json<T>, B>(Method::Patch, path, headers, body)
    }

    /// `PATCH path` with a JSON body.
    pub fn patch_with_body_void<B>(
        &self,
        path: &str,
        headers: Option<Headers>,
        body: &B,
    ) -> ResponseFuture<()>
    where
        B: Serialize + ?Sized,
    {
        self.send_json::<Void, B>(Method::Patch, path, headers, body)
    }

    // ------------------------------------------------------------------------
    // DELETE
    // ------------------------------------------------------------------------

    /// `DELETE path` with a JSON body, decoding the response body.
    pub fn delete_with_body<T, B>(
        &self,
        path: &str,
        headers: Option<Headers>,
        body: &B,
    ) -> ResponseFuture<T>
    where
        T: DeserializeOwned + Send + 'static,
        B: Serialize + ?Sized,
    {
        self.send_json::<Json<T>, B>(Method::Delete, path, headers, body)
    }

    /// `DELETE path` with a JSON body.
    pub fn delete_with_body_void<B>(
        &self,
        path: &str,
        headers: Option<Headers>,
        body: &B,
    ) -> ResponseFuture<()>
    where
        B: Serialize + ?Sized,
    {
        self.send_json::<Void, B>(Method::Delete, path, headers, body)
    }

    /// `DELETE path` without body.
    pub fn delete_void(&self, path: &str, headers: Option<Headers>) -> ResponseFuture<()> {
        self.send::<Void>(Method::Delete, path, headers, None)
    }
}
