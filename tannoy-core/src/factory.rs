//! Factories for constructing events from payloads.

use crate::event::Event;
use std::sync::Arc;

/// A pure constructor turning a payload into an event.
///
/// Factories travel with a registration (see [`Module`]) so that producers
/// can look up, per subscription, how to build the event a subscriber
/// expects. The bus itself never invokes or validates them; they exist for
/// the producing side.
///
/// Enum variant constructors are factories:
///
/// ```rust,ignore
/// let factory = Factory::new(AppEvent::Created);
/// let event = factory.build(42);
/// assert_eq!(event, AppEvent::Created(42));
/// ```
///
/// [`Module`]: crate::Module
pub struct Factory<E, P> {
    make: Arc<dyn Fn(P) -> E + Send + Sync>,
}

impl<E: Event, P> Factory<E, P> {
    /// Wraps a constructor function.
    pub fn new(make: impl Fn(P) -> E + Send + Sync + 'static) -> Self {
        Self {
            make: Arc::new(make),
        }
    }

    /// Builds an event from a payload.
    ///
    /// Pure by contract: same payload, same event, no side effects.
    pub fn build(&self, payload: P) -> E {
        (self.make)(payload)
    }
}

impl<E, P> Clone for Factory<E, P> {
    fn clone(&self) -> Self {
        Self {
            make: Arc::clone(&self.make),
        }
    }
}
