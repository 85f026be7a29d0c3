//! # tannoy-std
//!
//! Stock implementations for the Tannoy event bus.
//!
//! This crate provides:
//! - **Middleware**: [`middleware::LoggingMiddleware`],
//!   [`middleware::CountingMiddleware`], [`middleware::FilterMiddleware`]
//! - **Testing utilities**: the recording and counting doubles in
//!   [`testing`], plus [`testing::settled`] for awaiting a whole dispatch

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core
pub use tannoy_core;

// Modules
pub mod middleware;
pub mod testing;
