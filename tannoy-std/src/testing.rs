//! Testing utilities for Tannoy.
//!
//! Reusable doubles for testing buses, handlers, and middleware.
//!
//! # Features
//!
//! - [`Recorder`]: a shared, ordered label log for cross-double assertions
//! - [`RecordingHandler`]: records every event it receives
//! - [`RecordingMiddleware`]: records a label each time the chain is entered
//! - [`CountingHandler`]: counts invocations
//! - [`FailingHandler`]: always fails with a [`Failure`]
//! - [`PanickingHandler`]: always panics, for panic-containment tests
//! - [`settled`]: awaits a whole dispatch and collects every outcome

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};
use tannoy_core::{BoxError, Completions, Dispatch, Event, Handler, HandlerError, Middleware, Next};
use thiserror::Error;

// ============================================================================
// Recorder
// ============================================================================

/// A shared, ordered log of labels.
///
/// Recording doubles built over the same `Recorder` interleave their labels
/// in invocation order, which is how tests assert cross-cutting order such
/// as "middleware before handler".
#[derive(Clone, Default)]
pub struct Recorder {
    entries: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a label.
    pub fn push(&self, label: impl Into<String>) {
        self.entries.lock().unwrap().push(label.into());
    }

    /// A snapshot of everything recorded so far.
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().unwrap().clone()
    }

    /// Number of recorded labels.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }

    /// Clears the log.
    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }
}

// ============================================================================
// Recording Handler
// ============================================================================

/// A handler that records every event it receives.
///
/// Useful for verifying fan-out and payloads. Clones share storage: keep one
/// clone outside the bus to inspect what the subscribed one saw.
///
/// ```rust,ignore
/// let recorder = RecordingHandler::<AppEvent>::new();
/// let bus = bus.subscribe(Module::new("created", recorder.clone(), AppEvent::Created));
///
/// tannoy_core::join_all(bus.dispatch(AppEvent::Created(7))?).await?;
/// assert_eq!(recorder.events(), vec![AppEvent::Created(7)]);
/// ```
pub struct RecordingHandler<E: Event> {
    events: Arc<Mutex<Vec<E>>>,
    label: Option<(String, Recorder)>,
}

impl<E: Event> RecordingHandler<E> {
    /// Creates a recording handler with its own storage.
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            label: None,
        }
    }

    /// Creates a recording handler that also pushes `label` to a shared
    /// [`Recorder`] on every invocation.
    pub fn labeled(label: impl Into<String>, recorder: &Recorder) -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            label: Some((label.into(), recorder.clone())),
        }
    }

    /// A snapshot of the recorded events.
    pub fn events(&self) -> Vec<E> {
        self.events.lock().unwrap().clone()
    }

    /// Number of recorded events.
    pub fn count(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    /// Clears the recorded events.
    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

impl<E: Event> Default for RecordingHandler<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Event> Clone for RecordingHandler<E> {
    fn clone(&self) -> Self {
        Self {
            events: Arc::clone(&self.events),
            label: self.label.clone(),
        }
    }
}

impl<E: Event> Handler<E> for RecordingHandler<E> {
    async fn call(&self, event: E, _dispatch: Dispatch<E>) -> Result<(), BoxError> {
        if let Some((label, recorder)) = &self.label {
            recorder.push(label.clone());
        }
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}

// ============================================================================
// Recording Middleware
// ============================================================================

/// Middleware that records a label each time the chain is entered, then
/// passes through unchanged.
pub struct RecordingMiddleware {
    label: String,
    recorder: Recorder,
}

impl RecordingMiddleware {
    /// Creates a middleware pushing `label` to the given recorder.
    pub fn new(label: impl Into<String>, recorder: &Recorder) -> Self {
        Self {
            label: label.into(),
            recorder: recorder.clone(),
        }
    }
}

impl<E: Event> Middleware<E> for RecordingMiddleware {
    async fn around(
        &self,
        event: E,
        dispatch: Dispatch<E>,
        next: Next<E>,
    ) -> Result<(), BoxError> {
        self.recorder.push(self.label.clone());
        next.run(event, dispatch).await
    }
}

// ============================================================================
// Counting Handler
// ============================================================================

/// A handler that counts invocations.
///
/// Clones share the counter.
pub struct CountingHandler {
    count: Arc<AtomicUsize>,
}

impl CountingHandler {
    /// Creates a handler with a zeroed counter.
    pub fn new() -> Self {
        Self {
            count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// The current invocation count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Resets the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

impl Default for CountingHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for CountingHandler {
    fn clone(&self) -> Self {
        Self {
            count: Arc::clone(&self.count),
        }
    }
}

impl<E: Event> Handler<E> for CountingHandler {
    async fn call(&self, _event: E, _dispatch: Dispatch<E>) -> Result<(), BoxError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// ============================================================================
// Failing / Panicking Handlers
// ============================================================================

/// The error [`FailingHandler`] fails with.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct Failure(pub String);

/// A handler that always fails with a [`Failure`].
///
/// The message survives inside `HandlerError::Failed` and can be recovered
/// by downcasting the source, which is how tests assert that handler errors
/// pass through the bus untouched.
pub struct FailingHandler {
    message: String,
}

impl FailingHandler {
    /// Creates a handler failing with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl<E: Event> Handler<E> for FailingHandler {
    async fn call(&self, _event: E, _dispatch: Dispatch<E>) -> Result<(), BoxError> {
        Err(Box::new(Failure(self.message.clone())))
    }
}

/// A handler that always panics with its message.
///
/// For asserting that a panicking subscriber surfaces as a failed completion
/// instead of taking the dispatching task down.
pub struct PanickingHandler {
    message: String,
}

impl PanickingHandler {
    /// Creates a handler panicking with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl<E: Event> Handler<E> for PanickingHandler {
    async fn call(&self, _event: E, _dispatch: Dispatch<E>) -> Result<(), BoxError> {
        panic!("{}", self.message)
    }
}

// ============================================================================
// Settling helper
// ============================================================================

/// Awaits every completion of one dispatch and collects all outcomes.
///
/// Unlike [`tannoy_core::join_all`] nothing is discarded: the result holds
/// one entry per subscriber, in invocation order.
pub async fn settled(completions: Completions) -> Vec<Result<(), HandlerError>> {
    futures::future::join_all(completions).await
}
