//! Error types for Tannoy.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`BusError`] - Top-level error type for all bus operations
//! - [`DispatchError`] - Errors `dispatch` raises synchronously
//! - [`HandlerError`] - Errors a subscriber's completion settles with

use crate::topic::Topic;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all bus operations.
#[derive(Error, Debug)]
pub enum BusError {
    /// Dispatch failed before any handler was started.
    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    /// A subscriber's completion settled with an error.
    #[error("handler error: {0}")]
    Handler(#[from] HandlerError),

    /// A custom error occurred.
    #[error(transparent)]
    Custom(BoxError),
}

/// Errors [`Bus::dispatch`] raises synchronously, before any handler runs.
///
/// [`Bus::dispatch`]: crate::Bus::dispatch
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchError {
    /// The event's topic has no registered subscribers.
    #[error("unhandled topic \"{0}\"")]
    UnhandledTopic(Topic),
}

/// Errors a subscriber's [`Completion`] settles with.
///
/// [`Completion`]: crate::Completion
#[derive(Error, Debug)]
pub enum HandlerError {
    /// The handler, or a middleware around it, returned an error.
    #[error("handler failed")]
    Failed(#[source] BoxError),

    /// The handler panicked during execution.
    #[error("handler panicked: {0}")]
    Panicked(String),

    /// The runtime tore the handler's task down before it settled.
    #[error("handler was cancelled")]
    Cancelled,
}

// Convenience conversions
impl From<BoxError> for BusError {
    fn from(err: BoxError) -> Self {
        BusError::Custom(err)
    }
}

impl From<BoxError> for HandlerError {
    fn from(err: BoxError) -> Self {
        HandlerError::Failed(err)
    }
}
