//! Registration units binding a topic, a handler, and a factory.

use crate::{
    event::Event,
    factory::Factory,
    handler::{DynHandler, Handler},
    topic::Topic,
};
use std::sync::Arc;

/// One registration: the unit accepted by [`Bus::subscribe`].
///
/// A module binds a topic to the handler that will receive its events and to
/// the factory producers use to build them. Each `subscribe` call consumes
/// one module and mints one subscriber.
///
/// `P` is the factory's payload type; modules whose events carry no payload
/// use the default `P = ()`.
///
/// [`Bus::subscribe`]: crate::Bus::subscribe
pub struct Module<E: Event, P = ()> {
    topic: Topic,
    handler: Arc<dyn DynHandler<E>>,
    factory: Factory<E, P>,
}

impl<E: Event, P: Send + Sync + 'static> Module<E, P> {
    /// Creates a module from a topic, a handler, and a factory.
    ///
    /// Enum variant constructors slot straight in as factories:
    ///
    /// ```rust,ignore
    /// let module = Module::new("created", CreatedHandler, AppEvent::Created);
    /// ```
    pub fn new(
        topic: impl Into<Topic>,
        handler: impl Handler<E>,
        factory: impl Fn(P) -> E + Send + Sync + 'static,
    ) -> Self {
        Self {
            topic: topic.into(),
            handler: Arc::new(handler),
            factory: Factory::new(factory),
        }
    }

    /// The topic this module subscribes to.
    pub fn topic(&self) -> Topic {
        self.topic
    }

    /// The factory producers use to build this module's events.
    pub fn factory(&self) -> &Factory<E, P> {
        &self.factory
    }

    pub(crate) fn into_parts(self) -> (Topic, Arc<dyn DynHandler<E>>, Factory<E, P>) {
        (self.topic, self.handler, self.factory)
    }
}
