//! Filter middleware for conditionally suppressing handlers.

use tannoy_core::{BoxError, Dispatch, Event, Middleware, Next};

/// Middleware that gates the rest of the chain on a predicate.
///
/// When the predicate rejects an event, the remainder of the chain, handler
/// included, is skipped and the completion settles `Ok`. Nothing records
/// the suppression; that silence is the point of chain truncation.
pub struct FilterMiddleware<F> {
    predicate: F,
}

impl<F> FilterMiddleware<F> {
    /// Creates a filter from a predicate.
    pub fn new(predicate: F) -> Self {
        Self { predicate }
    }
}

impl<E, F> Middleware<E> for FilterMiddleware<F>
where
    E: Event,
    F: Fn(&E) -> bool + Send + Sync + 'static,
{
    async fn around(
        &self,
        event: E,
        dispatch: Dispatch<E>,
        next: Next<E>,
    ) -> Result<(), BoxError> {
        if (self.predicate)(&event) {
            next.run(event, dispatch).await
        } else {
            Ok(())
        }
    }
}
