//! # Middleware
//!
//! Cross-cutting wrappers around handler invocations. A bus carries one
//! ordered middleware chain, fixed at construction, and wraps **every**
//! handler invocation in the whole chain regardless of topic: logging,
//! counting and filtering live here, not in handlers.
//!
//! A middleware runs code around [`Next`], the remainder of the chain with
//! the subscriber's handler at its end. Declaration order is execution
//! order: the first middleware given to [`BusBuilder::middleware`] observes
//! the event first. Not calling `next` is legitimate and silently drops the
//! rest of the chain, which is how gating middleware suppresses handlers.
//!
//! Middleware never touches the registry and holds no per-topic state of the
//! bus; whatever state it keeps (counters, say) it owns itself.
//!
//! [`BusBuilder::middleware`]: crate::BusBuilder::middleware

use crate::{dispatch::Dispatch, error::BoxError, event::Event, handler::DynHandler};
use std::{future::Future, pin::Pin, sync::Arc};

/// A wrapper around one handler invocation.
///
/// Closures of the shape `Fn(E, Dispatch<E>, Next<E>) -> impl Future`
/// implement `Middleware` automatically:
///
/// ```rust,ignore
/// let bus = Bus::builder()
///     .middleware(|event: AppEvent, dispatch, next: Next<AppEvent>| async move {
///         println!("before {:?}", event.topic());
///         next.run(event, dispatch).await
///     })
///     .build();
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot wrap handlers for events of type `{E}`",
    label = "missing `Middleware<{E}>` implementation",
    note = "Middleware must implement `around` for the specific event type `{E}`."
)]
pub trait Middleware<E: Event>: Send + Sync + 'static {
    /// Called once per handler invocation, with the rest of the chain.
    fn around(
        &self,
        event: E,
        dispatch: Dispatch<E>,
        next: Next<E>,
    ) -> impl Future<Output = Result<(), BoxError>> + Send;
}

/// Dynamic object-safe version of [`Middleware`].
pub trait DynMiddleware<E: Event>: Send + Sync + 'static {
    /// Called once per handler invocation (dynamic dispatch version).
    fn around_dyn<'a>(
        &'a self,
        event: E,
        dispatch: Dispatch<E>,
        next: Next<E>,
    ) -> Pin<Box<dyn Future<Output = Result<(), BoxError>> + Send + 'a>>;
}

// Blanket implementation: any type implementing Middleware implements DynMiddleware.
impl<E: Event, T: Middleware<E>> DynMiddleware<E> for T {
    fn around_dyn<'a>(
        &'a self,
        event: E,
        dispatch: Dispatch<E>,
        next: Next<E>,
    ) -> Pin<Box<dyn Future<Output = Result<(), BoxError>> + Send + 'a>> {
        Box::pin(self.around(event, dispatch, next))
    }
}

// Blanket impl for closures
impl<E, F, Fut> Middleware<E> for F
where
    E: Event,
    F: Fn(E, Dispatch<E>, Next<E>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), BoxError>> + Send,
{
    fn around(
        &self,
        event: E,
        dispatch: Dispatch<E>,
        next: Next<E>,
    ) -> impl Future<Output = Result<(), BoxError>> + Send {
        (self)(event, dispatch, next)
    }
}

/// The remainder of a composed chain: zero or more middlewares wrapped
/// around one subscriber's handler.
///
/// [`run`] consumes the continuation; middleware wanting to invoke it more
/// than once clones first. Dropping it without running is the truncation
/// path: the inner middlewares and the handler simply never execute, and no
/// record of that is kept anywhere.
///
/// [`run`]: Next::run
pub struct Next<E: Event> {
    inner: Arc<dyn DynHandler<E>>,
}

impl<E: Event> Next<E> {
    pub(crate) fn new(inner: Arc<dyn DynHandler<E>>) -> Self {
        Self { inner }
    }

    /// Runs the rest of the chain to completion.
    pub async fn run(self, event: E, dispatch: Dispatch<E>) -> Result<(), BoxError> {
        self.inner.call_dyn(event, dispatch).await
    }
}

impl<E: Event> Clone for Next<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
