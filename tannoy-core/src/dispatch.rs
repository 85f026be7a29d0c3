//! The dispatch capability handed to handlers.

use crate::{bus::Bus, completion::Completions, error::DispatchError, event::Event};

/// A cloneable capability for dispatching against one fixed [`Bus`] value.
///
/// Every handler invocation receives a `Dispatch` bound to the bus that
/// invoked it; dispatching through it is how cascades re-enter that bus
/// without the handler ever holding the bus itself. Because the binding is
/// to a bus *value*, events published through a `Dispatch` only ever see the
/// subscriptions that value carries, never ones added to later generations.
pub struct Dispatch<E: Event> {
    bus: Bus<E>,
}

impl<E: Event> Dispatch<E> {
    pub(crate) fn new(bus: Bus<E>) -> Self {
        Self { bus }
    }

    /// Dispatches an event against the bound bus.
    ///
    /// Identical to [`Bus::dispatch`] on that bus: the completions start
    /// immediately and an unhandled topic fails synchronously. A handler
    /// propagating such a failure with `?` fails its own completion.
    pub fn dispatch(&self, event: E) -> Result<Completions, DispatchError> {
        self.bus.dispatch(event)
    }

    /// The bus this capability is bound to.
    pub fn bus(&self) -> &Bus<E> {
        &self.bus
    }
}

impl<E: Event> Clone for Dispatch<E> {
    fn clone(&self) -> Self {
        Self {
            bus: self.bus.clone(),
        }
    }
}

/// Anything events of type `E` can be dispatched against.
///
/// Implemented by [`Bus`] and [`Dispatch`]; producers that only ever publish
/// can take `&dyn Dispatcher<E>` and stay indifferent to which one they hold.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot dispatch events of type `{E}`",
    label = "missing `Dispatcher<{E}>` implementation"
)]
pub trait Dispatcher<E: Event>: Send + Sync {
    /// Dispatches the event, returning its pending completions.
    fn dispatch(&self, event: E) -> Result<Completions, DispatchError>;
}

impl<E: Event> Dispatcher<E> for Bus<E> {
    fn dispatch(&self, event: E) -> Result<Completions, DispatchError> {
        Bus::dispatch(self, event)
    }
}

impl<E: Event> Dispatcher<E> for Dispatch<E> {
    fn dispatch(&self, event: E) -> Result<Completions, DispatchError> {
        Dispatch::dispatch(self, event)
    }
}
