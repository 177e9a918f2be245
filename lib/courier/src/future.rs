//! The future returned by every route handler operation.

use std::future::{Future, Ready, ready};
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::task::JoinHandle;

use crate::{Error, Result, TransportError, TransportErrorKind};

/// Eventual result of a request issued through a
/// [`RouteHandler`](crate::RouteHandler).
///
/// The request is already running on the handler's runtime when this value
/// is handed out; awaiting it only waits for the outcome. Dropping it does
/// not cancel the request.
#[must_use = "the request runs regardless, but its result is lost unless awaited"]
#[derive(Debug)]
pub struct ResponseFuture<T> {
    state: State<T>,
}

#[derive(Debug)]
enum State<T> {
    Failed(Ready<Result<T>>),
    Spawned(JoinHandle<Result<T>>),
}

impl<T> ResponseFuture<T> {
    /// A future that already failed, for errors detected before dispatch.
    pub fn failed(error: impl Into<Error>) -> Self {
        Self {
            state: State::Failed(ready(Err(error.into()))),
        }
    }

    pub(crate) const fn spawned(handle: JoinHandle<Result<T>>) -> Self {
        Self {
            state: State::Spawned(handle),
        }
    }

    /// Returns `true` if the outcome is known without polling.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        match &self.state {
            State::Failed(_) => true,
            State::Spawned(handle) => handle.is_finished(),
        }
    }
}

impl<T> Future for ResponseFuture<T> {
    type Output = Result<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match &mut self.get_mut().state {
            State::Failed(failed) => Pin::new(failed).poll(cx),
            State::Spawned(handle) => Pin::new(handle).poll(cx).map(|joined| match joined {
                Ok(result) => result,
                Err(err) => Err(Error::Transport(TransportError::new(
                    TransportErrorKind::Aborted,
                    err.to_string(),
                ))),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};

    use super::*;

    #[tokio::test]
    async fn failed_resolves_immediately() {
        let future = ResponseFuture::<u32>::failed(Error::Parsing);
        check!(future.is_finished());
        let_assert!(Err(Error::Parsing) = future.await);
    }

    #[tokio::test]
    async fn spawned_resolves_with_task_result() {
        let future = ResponseFuture::spawned(tokio::spawn(async { Ok(42_u32) }));
        check!(future.await.expect("value") == 42);
    }

    #[tokio::test]
    async fn panicking_task_is_aborted_transport_error() {
        let future = ResponseFuture::<u32>::spawned(tokio::spawn(async { panic!("boom") }));
        let_assert!(Err(Error::Transport(err)) = future.await);
        check!(err.kind() == TransportErrorKind::Aborted);
    }
}
