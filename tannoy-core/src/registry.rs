//! The immutable subscription registry.

use crate::{event::Event, factory::Factory, handler::DynHandler, module::Module, topic::Topic};
use std::{
    any::Any,
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// A token identifying one subscription.
///
/// Ids are minted from a process-wide counter, one per `subscribe`, and never
/// reused. An id means nothing on its own; it is only a key into the
/// registries that contain it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriberId(u64);

impl SubscriberId {
    fn mint() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// The immutable mapping from topics to subscribers.
///
/// Four maps keyed by [`SubscriberId`] are kept mutually consistent: the
/// ordered subscriber list per topic, the handler per id, the id's topic, and
/// the type-erased factory per id. Every id appears in exactly one topic list
/// and in all three id-keyed maps.
///
/// A registry never changes after construction. Subscribing builds the
/// successor generation by copying the map spines while sharing all handler
/// and factory values with the parent, so earlier generations stay valid and
/// cheap.
pub struct Registry<E: Event> {
    topics: HashMap<Topic, Vec<SubscriberId>>,
    handlers: HashMap<SubscriberId, Arc<dyn DynHandler<E>>>,
    subscriber_topics: HashMap<SubscriberId, Topic>,
    factories: HashMap<SubscriberId, Arc<dyn Any + Send + Sync>>,
}

impl<E: Event> Registry<E> {
    pub(crate) fn new() -> Self {
        Self {
            topics: HashMap::new(),
            handlers: HashMap::new(),
            subscriber_topics: HashMap::new(),
            factories: HashMap::new(),
        }
    }

    /// Copies the registry with one more subscription.
    ///
    /// The fresh id goes at the *front* of its topic's list, so the most
    /// recent subscription is invoked first; existing ids keep their relative
    /// order. Handler and factory values are shared with the parent.
    pub(crate) fn with_subscription<P: Send + Sync + 'static>(&self, module: Module<E, P>) -> Self {
        let id = SubscriberId::mint();
        let (topic, handler, factory) = module.into_parts();

        let mut topics = self.topics.clone();
        topics.entry(topic).or_default().insert(0, id);

        let mut handlers = self.handlers.clone();
        handlers.insert(id, handler);

        let mut subscriber_topics = self.subscriber_topics.clone();
        subscriber_topics.insert(id, topic);

        let mut factories = self.factories.clone();
        factories.insert(id, Arc::new(factory) as Arc<dyn Any + Send + Sync>);

        Self {
            topics,
            handlers,
            subscriber_topics,
            factories,
        }
    }

    /// The subscriber ids registered for a topic, in invocation order.
    pub fn subscribers(&self, topic: Topic) -> &[SubscriberId] {
        self.topics.get(&topic).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn handler(&self, id: SubscriberId) -> Option<&Arc<dyn DynHandler<E>>> {
        self.handlers.get(&id)
    }

    /// The topic a subscriber id is registered under.
    pub fn topic_of(&self, id: SubscriberId) -> Option<Topic> {
        self.subscriber_topics.get(&id).copied()
    }

    /// The factory registered with an id, if its payload type is `P`.
    ///
    /// Factories are stored type-erased; asking with the wrong payload type
    /// returns `None` rather than an event of the wrong shape.
    pub fn factory<P: Send + Sync + 'static>(&self, id: SubscriberId) -> Option<Factory<E, P>> {
        let erased = Arc::clone(self.factories.get(&id)?);
        erased
            .downcast::<Factory<E, P>>()
            .ok()
            .map(|factory| (*factory).clone())
    }

    /// Topics with at least one subscriber.
    pub fn topics(&self) -> impl Iterator<Item = Topic> + '_ {
        self.topics.keys().copied()
    }

    /// Number of live subscriptions.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether the registry holds no subscriptions at all.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{dispatch::Dispatch, error::BoxError, handler::Handler};

    #[derive(Debug, Clone, PartialEq)]
    enum TestEvent {
        Ping(u32),
        Pong,
    }

    impl Event for TestEvent {
        fn topic(&self) -> Topic {
            match self {
                TestEvent::Ping(_) => Topic::new("ping"),
                TestEvent::Pong => Topic::new("pong"),
            }
        }
    }

    struct NoopHandler;

    impl Handler<TestEvent> for NoopHandler {
        async fn call(
            &self,
            _event: TestEvent,
            _dispatch: Dispatch<TestEvent>,
        ) -> Result<(), BoxError> {
            Ok(())
        }
    }

    fn ping_module() -> Module<TestEvent, u32> {
        Module::new("ping", NoopHandler, TestEvent::Ping)
    }

    #[test]
    fn test_empty_registry() {
        let registry: Registry<TestEvent> = Registry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert!(registry.subscribers(Topic::new("ping")).is_empty());
        assert_eq!(registry.topics().count(), 0);
    }

    #[test]
    fn test_newest_subscription_first() {
        let ping = Topic::new("ping");

        let r1 = Registry::new().with_subscription(ping_module());
        let first = r1.subscribers(ping)[0];

        let r2 = r1.with_subscription(ping_module());
        let second = r2.subscribers(ping)[0];

        let r3 = r2.with_subscription(ping_module());
        let third = r3.subscribers(ping)[0];

        // Most recent subscription sits at the head; older ones keep order.
        assert_eq!(r3.subscribers(ping), &[third, second, first]);
        assert_ne!(first, second);
        assert_ne!(second, third);
    }

    #[test]
    fn test_parent_generation_unchanged() {
        let ping = Topic::new("ping");

        let r1 = Registry::new().with_subscription(ping_module());
        let r2 = r1.with_subscription(ping_module());

        assert_eq!(r1.subscribers(ping).len(), 1);
        assert_eq!(r2.subscribers(ping).len(), 2);
        assert_eq!(r1.len(), 1);
        assert_eq!(r2.len(), 2);
    }

    #[test]
    fn test_maps_stay_consistent() {
        let ping = Topic::new("ping");
        let registry = Registry::new()
            .with_subscription(ping_module())
            .with_subscription(ping_module());

        for &id in registry.subscribers(ping) {
            assert_eq!(registry.topic_of(id), Some(ping));
            assert!(registry.handler(id).is_some());
            assert!(registry.factory::<u32>(id).is_some());
        }
    }

    #[test]
    fn test_factory_retrieval_is_typed() {
        let ping = Topic::new("ping");
        let registry = Registry::new().with_subscription(ping_module());
        let id = registry.subscribers(ping)[0];

        let factory = registry.factory::<u32>(id).unwrap();
        assert_eq!(factory.build(7), TestEvent::Ping(7));

        // Wrong payload type does not downcast.
        assert!(registry.factory::<String>(id).is_none());
    }

    #[test]
    fn test_topics_span_generations() {
        let registry = Registry::new()
            .with_subscription(ping_module())
            .with_subscription(Module::<TestEvent>::new("pong", NoopHandler, |()| {
                TestEvent::Pong
            }));

        let mut topics: Vec<_> = registry.topics().collect();
        topics.sort();
        assert_eq!(topics, vec![Topic::new("ping"), Topic::new("pong")]);
    }
}
