//! # The bus
//!
//! [`Bus`] pairs an ordered middleware chain with a subscription registry,
//! both immutable. Subscribing builds a new bus value; dispatching fans an
//! event out to every subscriber of its topic, wraps each handler in the
//! full middleware chain, and starts each composed invocation as its own
//! task. The bus owns no external resources and takes no locks.

use crate::{
    completion::{Completion, Completions},
    dispatch::Dispatch,
    error::{BoxError, DispatchError},
    event::Event,
    handler::{DynHandler, Handler},
    middleware::{DynMiddleware, Middleware, Next},
    module::Module,
    registry::Registry,
};
use std::sync::Arc;

/// An immutable pub/sub value: an ordered middleware chain plus a registry.
///
/// A bus never changes once built. [`subscribe`] returns a *new* bus sharing
/// everything but the added subscription, so a bus value can be held, cloned
/// and dispatched against concurrently without coordination; cloning copies
/// two `Arc`s.
///
/// The middleware chain is fixed at construction (see [`builder`]) and wraps
/// every handler invocation on every topic, in the order the middlewares
/// were added.
///
/// [`subscribe`]: Bus::subscribe
/// [`builder`]: Bus::builder
pub struct Bus<E: Event> {
    middlewares: Arc<[Arc<dyn DynMiddleware<E>>]>,
    registry: Arc<Registry<E>>,
}

impl<E: Event> Bus<E> {
    /// Creates an empty bus with no middleware.
    pub fn new() -> Self {
        BusBuilder::new().build()
    }

    /// Starts building a bus with a middleware chain.
    pub fn builder() -> BusBuilder<E> {
        BusBuilder::new()
    }

    /// The bus's subscription registry.
    pub fn registry(&self) -> &Registry<E> {
        &self.registry
    }

    /// Returns a new bus with one more subscription.
    ///
    /// The receiver is unaffected; dispatching against it keeps seeing its
    /// own registry. Within the module's topic the new subscriber is placed
    /// *first*: subscribing A, then B, then C yields invocation order C, B,
    /// A. Subscribing never fails.
    #[must_use = "subscribe returns a new bus and leaves the receiver unchanged"]
    pub fn subscribe<P: Send + Sync + 'static>(&self, module: Module<E, P>) -> Self {
        Self {
            middlewares: Arc::clone(&self.middlewares),
            registry: Arc::new(self.registry.with_subscription(module)),
        }
    }

    /// Dispatches an event to every subscriber of its topic.
    ///
    /// Each subscriber's handler is composed with the full middleware chain
    /// and started immediately as its own task. The returned completions,
    /// in invocation order, are already running when this returns: await
    /// them to observe outcomes, or drop them to fire and forget. Handler
    /// failures are reported only through the completions, never here.
    ///
    /// Handlers receive a [`Dispatch`] bound to this bus value, so cascaded
    /// events see exactly the subscriptions this dispatch saw.
    ///
    /// Fails with [`DispatchError::UnhandledTopic`] when the topic has no
    /// subscribers; nothing runs in that case and the error is returned
    /// directly rather than through a completion.
    ///
    /// # Panics
    ///
    /// Panics when subscribers exist and no Tokio runtime is available, as
    /// invocations are spawned onto the current runtime.
    pub fn dispatch(&self, event: E) -> Result<Completions, DispatchError> {
        let topic = event.topic();
        let subscribers = self.registry.subscribers(topic);
        if subscribers.is_empty() {
            return Err(DispatchError::UnhandledTopic(topic));
        }

        let dispatch = Dispatch::new(self.clone());
        let completions = subscribers
            .iter()
            .filter_map(|id| self.registry.handler(*id))
            .map(|handler| {
                let composed = self.compose(Arc::clone(handler));
                let event = event.clone();
                let dispatch = dispatch.clone();
                Completion::new(tokio::spawn(async move {
                    composed.call_dyn(event, dispatch).await
                }))
            })
            .collect();
        Ok(completions)
    }

    /// Wraps a handler in the full middleware chain, first middleware
    /// outermost, handler innermost.
    fn compose(&self, handler: Arc<dyn DynHandler<E>>) -> Arc<dyn DynHandler<E>> {
        self.middlewares.iter().rfold(handler, |next, middleware| {
            Arc::new(Wrapped {
                middleware: Arc::clone(middleware),
                next: Next::new(next),
            })
        })
    }
}

impl<E: Event> Default for Bus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Event> Clone for Bus<E> {
    fn clone(&self) -> Self {
        Self {
            middlewares: Arc::clone(&self.middlewares),
            registry: Arc::clone(&self.registry),
        }
    }
}

/// One middleware applied around the rest of a composed chain.
struct Wrapped<E: Event> {
    middleware: Arc<dyn DynMiddleware<E>>,
    next: Next<E>,
}

impl<E: Event> Handler<E> for Wrapped<E> {
    async fn call(&self, event: E, dispatch: Dispatch<E>) -> Result<(), BoxError> {
        self.middleware
            .around_dyn(event, dispatch, self.next.clone())
            .await
    }
}

/// Builds a [`Bus`] with an ordered middleware chain.
///
/// ```rust,ignore
/// let bus = Bus::builder()
///     .middleware(LoggingMiddleware::new())
///     .middleware(CountingMiddleware::new())
///     .build();
/// ```
pub struct BusBuilder<E: Event> {
    middlewares: Vec<Arc<dyn DynMiddleware<E>>>,
}

impl<E: Event> BusBuilder<E> {
    /// Starts with no middleware.
    pub fn new() -> Self {
        Self {
            middlewares: Vec::new(),
        }
    }

    /// Appends a middleware to the chain.
    ///
    /// Chain order is execution order: the first middleware added observes
    /// every event first and hands over to the next through [`Next`].
    pub fn middleware(mut self, middleware: impl Middleware<E>) -> Self {
        self.middlewares.push(Arc::new(middleware));
        self
    }

    /// Finishes the bus with an empty registry.
    pub fn build(self) -> Bus<E> {
        Bus {
            middlewares: self.middlewares.into(),
            registry: Arc::new(Registry::new()),
        }
    }
}

impl<E: Event> Default for BusBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}
