//! Response classification.
//!
//! An [`Expect`] implementation turns a transport [`Response`] into the value
//! the caller asked for, or into exactly one [`Error`]. Three expectations
//! exist:
//!
//! | Expectation | Checks, in order |
//! |-------------|------------------|
//! | [`Json<T>`] | body present, body readable, status < 400, body decodes |
//! | [`Void`]    | status < 400 |
//! | [`Raw`]     | status < 400, body present, body readable |
//!
//! The order differs between [`Json`] and [`Raw`]: a typed call that gets a
//! 404 without body fails with [`Error::NoBody`], a raw call with
//! [`Error::Http`]. Both orders are part of the error contract.
//!
//! A body counts as present once it yields at least one byte, so only
//! [`Json`] and [`Raw`] ever wait on it. [`Void`] never reads the body.

use std::future::Future;
use std::marker::PhantomData;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::{Error, Response, ResponseBody, Result, codec};

/// What a call expects back, and how to get it out of a [`Response`].
pub trait Expect: Send + Sync + 'static {
    /// The value delivered to the caller.
    type Output: Send + 'static;

    /// Whether [`Expect::classify`] reads the body. When `false` the
    /// dispatcher drains the body in the background instead.
    const NEEDS_BODY: bool = true;

    /// Classify the response.
    fn classify(response: Response) -> impl Future<Output = Result<Self::Output>> + Send;
}

/// Expect a JSON body decoded into `T`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(PhantomData<fn() -> T>);

/// Expect no meaningful body; only the status matters.
#[derive(Debug, Clone, Copy, Default)]
pub struct Void;

/// Expect the body bytes as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct Raw;

fn check_status(status: u16) -> Result<()> {
    if status < 400 {
        Ok(())
    } else {
        Err(Error::Http(status))
    }
}

async fn read_body(status: u16, body: Option<ResponseBody>) -> Result<Bytes> {
    let body = body.ok_or(Error::NoBody(status))?;
    body.read()
        .await
        .map_err(Error::BodyRead)?
        .ok_or(Error::NoBody(status))
}

impl<T> Expect for Json<T>
where
    T: DeserializeOwned + Send + 'static,
{
    type Output = T;

    async fn classify(response: Response) -> Result<T> {
        let (status, _, body) = response.into_parts();
        let bytes = read_body(status, body).await?;
        check_status(status)?;

        codec::decode(&bytes).map_err(|err| {
            warn!(
                status,
                path = err.path(),
                error = err.message(),
                expected = std::any::type_name::<T>(),
                "failed to decode response body"
            );
            Error::Parsing
        })
    }
}

impl Expect for Void {
    type Output = ();

    const NEEDS_BODY: bool = false;

    async fn classify(response: Response) -> Result<()> {
        check_status(response.status())
    }
}

impl Expect for Raw {
    type Output = Bytes;

    async fn classify(response: Response) -> Result<Bytes> {
        let (status, _, body) = response.into_parts();
        check_status(status)?;
        read_body(status, body).await
    }
}
