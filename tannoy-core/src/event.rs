//! Event trait for values flowing through the bus.

use crate::topic::Topic;

/// A value that can be dispatched on a [`Bus`].
///
/// Implementors are usually enums whose variants span an application's topic
/// universe, with [`topic`] mapping each variant to its tag. The variant
/// payload is the event's data; coupling between a topic and its payload
/// shape is therefore enforced by the type system, not checked at dispatch.
///
/// ```rust,ignore
/// #[derive(Clone)]
/// enum AppEvent {
///     Created(u64),
///     Deleted(u64),
/// }
///
/// impl Event for AppEvent {
///     fn topic(&self) -> Topic {
///         match self {
///             AppEvent::Created(_) => Topic::new("created"),
///             AppEvent::Deleted(_) => Topic::new("deleted"),
///         }
///     }
/// }
/// ```
///
/// Events must be `Clone` because every subscriber of a topic receives its
/// own copy, and `Send + Sync + 'static` so invocations can run as tasks.
///
/// [`Bus`]: crate::Bus
/// [`topic`]: Event::topic
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid Event",
    label = "must be `Clone + Send + Sync + 'static` and name its topic",
    note = "Implement `Event` by hand or derive it with `#[derive(Event)]`."
)]
pub trait Event: Clone + Send + Sync + 'static {
    /// The tag under which this value is routed.
    fn topic(&self) -> Topic;
}
