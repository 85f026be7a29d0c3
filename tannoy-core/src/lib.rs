//! # tannoy-core
//!
//! Core types and dispatch machinery for the Tannoy event bus.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! code that defines events, handlers, or middleware without needing the
//! stock implementations in `tannoy-std`.
//!
//! # Model
//!
//! A [`Bus`] is an immutable value pairing an ordered [`Middleware`] chain
//! with a subscription [`Registry`]. Building on it follows three rules:
//!
//! - [`Bus::subscribe`] consumes a [`Module`] (topic + handler + factory)
//!   and returns a **new** bus; the old value keeps working unchanged.
//! - [`Bus::dispatch`] resolves the event's [`Topic`] to its subscribers,
//!   wraps each [`Handler`] in the full middleware chain, and starts every
//!   composed invocation as its own task. It returns the pending
//!   [`Completions`] without awaiting them, or fails synchronously when the
//!   topic has no subscribers.
//! - Handlers receive a [`Dispatch`] capability bound to the dispatching bus
//!   value, which is how cascades re-enter the bus.
//!
//! Within one topic, the most recently subscribed handler is invoked first.
//!
//! # Error Types
//!
//! - [`BusError`] - Top-level error type
//! - [`DispatchError`] - Synchronous dispatch failures
//! - [`HandlerError`] - What a failed [`Completion`] settles with

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod bus;
mod completion;
mod dispatch;
mod error;
mod event;
mod factory;
mod handler;
mod middleware;
mod module;
mod registry;
mod topic;

// Re-exports
pub use bus::{Bus, BusBuilder};
pub use completion::{Completion, Completions, join_all};
pub use dispatch::{Dispatch, Dispatcher};
pub use error::{BoxError, BusError, DispatchError, HandlerError};
pub use event::Event;
pub use factory::Factory;
pub use handler::{DynHandler, Handler};
pub use middleware::{DynMiddleware, Middleware, Next};
pub use module::Module;
pub use registry::{Registry, SubscriberId};
pub use topic::Topic;
