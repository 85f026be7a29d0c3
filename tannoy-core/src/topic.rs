//! Topic tags for routing events to subscribers.

use std::fmt;

/// An opaque tag naming one category of events.
///
/// Topics are declared in code, usually inside an [`Event`] implementation or
/// through `#[derive(Event)]`, and compared by name. The bus uses them purely
/// as registry keys; which payload travels under which topic is fixed by the
/// event type itself, so a topic never needs runtime validation.
///
/// [`Event`]: crate::Event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Topic(&'static str);

impl Topic {
    /// Creates a topic with the given name.
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Returns the topic's name.
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl From<&'static str> for Topic {
    fn from(name: &'static str) -> Self {
        Self::new(name)
    }
}
