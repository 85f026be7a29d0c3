//! Pending subscriber completions.

use crate::error::{BoxError, HandlerError};
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};
use tokio::task::{JoinError, JoinHandle};

/// One subscriber's pending completion.
///
/// Returned, inside [`Completions`], by [`Bus::dispatch`]. The underlying
/// invocation is already running as its own task by the time the caller sees
/// this value; awaiting it only observes the outcome. There is no way to
/// abort it, and dropping the completion detaches the task rather than
/// stopping it.
///
/// [`Bus::dispatch`]: crate::Bus::dispatch
#[derive(Debug)]
pub struct Completion {
    handle: JoinHandle<Result<(), BoxError>>,
}

impl Completion {
    pub(crate) fn new(handle: JoinHandle<Result<(), BoxError>>) -> Self {
        Self { handle }
    }

    /// Whether the invocation has already settled, without awaiting it.
    pub fn is_settled(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Future for Completion {
    type Output = Result<(), HandlerError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let handle = Pin::new(&mut self.get_mut().handle);
        match handle.poll(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(Ok(Ok(()))) => Poll::Ready(Ok(())),
            Poll::Ready(Ok(Err(err))) => Poll::Ready(Err(HandlerError::Failed(err))),
            Poll::Ready(Err(join_err)) => Poll::Ready(Err(handler_error_from_join(join_err))),
        }
    }
}

/// The ordered pending completions of one dispatch.
pub type Completions = Vec<Completion>;

/// Awaits every completion in order and reports the first failure.
///
/// All completions are observed even after a failure; only the first error is
/// kept. A failure here never stops the remaining work, which was already
/// running on its own.
pub async fn join_all(completions: Completions) -> Result<(), HandlerError> {
    let mut first_err = None;
    for completion in completions {
        if let Err(err) = completion.await {
            first_err.get_or_insert(err);
        }
    }
    match first_err {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn handler_error_from_join(err: JoinError) -> HandlerError {
    if err.is_panic() {
        let payload = err.into_panic();
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_owned())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_owned());
        HandlerError::Panicked(message)
    } else {
        HandlerError::Cancelled
    }
}
