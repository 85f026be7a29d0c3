// Each test binary uses its own subset of the fixture universe.
#![allow(dead_code)]

use tannoy::{Event, Topic};

// ============================================================================
// Test Event Type
// ============================================================================

/// The shared fixture universe: `a` fans out to `b` and `c`, `b` cascades
/// to `c`, and `c` is a leaf.
#[derive(Clone, Debug, PartialEq)]
pub enum AppEvent {
    A(String),
    B(u32),
    C,
}

impl Event for AppEvent {
    fn topic(&self) -> Topic {
        match self {
            AppEvent::A(_) => TOPIC_A,
            AppEvent::B(_) => TOPIC_B,
            AppEvent::C => TOPIC_C,
        }
    }
}

pub const TOPIC_A: Topic = Topic::new("a");
pub const TOPIC_B: Topic = Topic::new("b");
pub const TOPIC_C: Topic = Topic::new("c");
