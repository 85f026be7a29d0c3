//! Counting middleware for dispatch statistics.

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};
use tannoy_core::{BoxError, Dispatch, Event, Middleware, Next, Topic};

/// Middleware that counts handler invocations, in total and per topic.
///
/// An invocation is counted when it enters the chain, whether or not inner
/// middleware later truncates it. Counters are shared across clones, so keep
/// one clone outside the bus to read them:
///
/// ```rust,ignore
/// let counter = CountingMiddleware::new();
/// let bus = Bus::builder().middleware(counter.clone()).build();
/// // ... subscribe, dispatch, await ...
/// assert_eq!(counter.total(), 3);
/// ```
pub struct CountingMiddleware {
    total: Arc<AtomicUsize>,
    per_topic: Arc<Mutex<HashMap<Topic, usize>>>,
}

impl CountingMiddleware {
    /// Creates a middleware with zeroed counters.
    pub fn new() -> Self {
        Self {
            total: Arc::new(AtomicUsize::new(0)),
            per_topic: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Total handler invocations observed.
    pub fn total(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }

    /// Handler invocations observed for one topic.
    pub fn count_for(&self, topic: Topic) -> usize {
        self.per_topic
            .lock()
            .unwrap()
            .get(&topic)
            .copied()
            .unwrap_or(0)
    }

    /// Resets all counters to zero.
    pub fn reset(&self) {
        self.total.store(0, Ordering::SeqCst);
        self.per_topic.lock().unwrap().clear();
    }
}

impl Default for CountingMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for CountingMiddleware {
    fn clone(&self) -> Self {
        Self {
            total: Arc::clone(&self.total),
            per_topic: Arc::clone(&self.per_topic),
        }
    }
}

impl<E: Event> Middleware<E> for CountingMiddleware {
    async fn around(
        &self,
        event: E,
        dispatch: Dispatch<E>,
        next: Next<E>,
    ) -> Result<(), BoxError> {
        self.total.fetch_add(1, Ordering::SeqCst);
        *self
            .per_topic
            .lock()
            .unwrap()
            .entry(event.topic())
            .or_insert(0) += 1;
        next.run(event, dispatch).await
    }
}
