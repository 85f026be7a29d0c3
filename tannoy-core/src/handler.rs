//! # Handlers
//!
//! The receiving end of a subscription. A handler owns the event it is given
//! (every subscriber gets its own clone) together with a [`Dispatch`]
//! capability bound to the bus that invoked it, which is how handlers publish
//! follow-up events without ever holding the bus directly.
//!
//! # Static vs Dynamic Dispatch
//!
//! [`Handler`] uses native `async fn`-style futures for zero-cost static
//! dispatch. The registry stores handlers behind the object-safe twin
//! [`DynHandler`]; a blanket impl converts every `Handler` automatically, so
//! implementors never see the boxed form.

use crate::{dispatch::Dispatch, error::BoxError, event::Event};
use std::{future::Future, pin::Pin};

/// An async subscriber for events of type `E`.
///
/// Handlers receive an owned event plus a [`Dispatch`] bound to the bus value
/// that invoked them. Dispatching through it is the cascade mechanism: the
/// follow-up event sees exactly the subscriptions this invocation saw.
///
/// Failure is returning `Err`; the bus reports it on the subscriber's
/// completion and otherwise leaves it alone. There is no retry and no
/// logging on this path.
///
/// Closures of the shape `Fn(E, Dispatch<E>) -> impl Future` implement
/// `Handler` automatically:
///
/// ```rust,ignore
/// let module = Module::new("created", |event: AppEvent, _dispatch| async move {
///     println!("got {event:?}");
///     Ok(())
/// }, AppEvent::Created);
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot handle events of type `{E}`",
    label = "missing `Handler<{E}>` implementation",
    note = "Handlers must implement `call` for the specific event type `{E}`."
)]
pub trait Handler<E: Event>: Send + Sync + 'static {
    /// Called once per matching dispatch.
    fn call(
        &self,
        event: E,
        dispatch: Dispatch<E>,
    ) -> impl Future<Output = Result<(), BoxError>> + Send;
}

/// Dynamic object-safe version of [`Handler`].
///
/// This is the form the registry stores and the middleware chain composes
/// over. Use it directly only when you need runtime polymorphism.
pub trait DynHandler<E: Event>: Send + Sync + 'static {
    /// Called once per matching dispatch (dynamic dispatch version).
    fn call_dyn<'a>(
        &'a self,
        event: E,
        dispatch: Dispatch<E>,
    ) -> Pin<Box<dyn Future<Output = Result<(), BoxError>> + Send + 'a>>;
}

// Blanket implementation: any type implementing Handler implements DynHandler.
impl<E: Event, T: Handler<E>> DynHandler<E> for T {
    fn call_dyn<'a>(
        &'a self,
        event: E,
        dispatch: Dispatch<E>,
    ) -> Pin<Box<dyn Future<Output = Result<(), BoxError>> + Send + 'a>> {
        Box::pin(self.call(event, dispatch))
    }
}

// Blanket impl for closures
impl<E, F, Fut> Handler<E> for F
where
    E: Event,
    F: Fn(E, Dispatch<E>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), BoxError>> + Send,
{
    fn call(
        &self,
        event: E,
        dispatch: Dispatch<E>,
    ) -> impl Future<Output = Result<(), BoxError>> + Send {
        (self)(event, dispatch)
    }
}
