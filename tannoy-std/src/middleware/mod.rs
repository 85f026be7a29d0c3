//! Stock middleware implementations.
//!
//! Each of these wraps every handler invocation of the bus it is installed
//! on, in declaration order. They cover the common cross-cutting concerns so
//! handlers don't have to:
//!
//! - [`LoggingMiddleware`] - structured before/after logging via `tracing`
//! - [`CountingMiddleware`] - total and per-topic invocation counts
//! - [`FilterMiddleware`] - predicate gate that suppresses the chain

pub mod counting;
pub mod filter;
pub mod logging;

pub use counting::CountingMiddleware;
pub use filter::FilterMiddleware;
pub use logging::LoggingMiddleware;
