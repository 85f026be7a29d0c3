//! Logging middleware built on `tracing`.

use tannoy_core::{BoxError, Dispatch, Event, Middleware, Next};

/// Middleware that logs every handler invocation and its outcome.
///
/// Emits a `debug` span-free event before the rest of the chain runs and one
/// after, both tagged with the topic; failures are logged at `warn` with the
/// error and passed along untouched. Observing is all this middleware does;
/// it never alters the outcome.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingMiddleware;

impl LoggingMiddleware {
    /// Creates the middleware.
    pub fn new() -> Self {
        Self
    }
}

impl<E: Event> Middleware<E> for LoggingMiddleware {
    async fn around(
        &self,
        event: E,
        dispatch: Dispatch<E>,
        next: Next<E>,
    ) -> Result<(), BoxError> {
        let topic = event.topic();
        tracing::debug!(%topic, "invoking handler");
        let result = next.run(event, dispatch).await;
        match &result {
            Ok(()) => tracing::debug!(%topic, "handler completed"),
            Err(err) => tracing::warn!(%topic, error = %err, "handler failed"),
        }
        result
    }
}
