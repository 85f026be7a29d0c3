//! # tannoy - A strongly-typed, immutable pub/sub event bus
//!
//! `tannoy` dispatches typed events to subscribed handlers inside one
//! process. The bus is an **immutable value**: subscribing returns a new bus
//! and never disturbs the old one, so any piece of code holding a bus knows
//! exactly which subscriptions it will fan out to. Every handler invocation
//! is wrapped in one shared middleware chain, and handlers can cascade
//! further events through the [`Dispatch`] capability they receive.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tannoy::prelude::*;
//!
//! #[derive(Clone, Debug, Event)]
//! enum AppEvent {
//!     #[topic("greeted")]
//!     Greeted(String),
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), BusError> {
//!     let bus = Bus::builder()
//!         .middleware(tannoy::middleware::LoggingMiddleware::new())
//!         .build()
//!         .subscribe(Module::new(
//!             "greeted",
//!             |AppEvent::Greeted(name), _dispatch| async move {
//!                 println!("hello, {name}");
//!                 Ok(())
//!             },
//!             AppEvent::Greeted,
//!         ));
//!
//!     join_all(bus.dispatch(AppEvent::Greeted("world".into()))?).await?;
//!     Ok(())
//! }
//! ```
//!
//! Dispatch starts every subscriber immediately and hands back the pending
//! [`Completions`] without awaiting them; a topic nobody subscribed to fails
//! synchronously instead.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use tannoy_core::{
    // Errors
    BoxError,
    // Bus
    Bus,
    BusBuilder,
    BusError,
    // Completions
    Completion,
    Completions,
    Dispatch,
    DispatchError,
    Dispatcher,
    DynHandler,
    DynMiddleware,
    // Model
    Event,
    Factory,
    // Handler
    Handler,
    HandlerError,
    // Middleware
    Middleware,
    Module,
    Next,
    // Registry
    Registry,
    SubscriberId,
    Topic,
    join_all,
};

/// Stock middleware implementations.
pub mod middleware {
    #![allow(clippy::wildcard_imports)]
    pub use tannoy_std::middleware::*;
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use tannoy_std::testing::*;
}

/// Prelude module - common imports for Tannoy.
///
/// With the `macros` feature enabled (the default), importing [`Event`]
/// from here brings in both the trait and its derive.
///
/// # Usage
///
/// ```rust,ignore
/// use tannoy::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Errors
        BoxError,
        // Bus
        Bus,
        BusBuilder,
        BusError,
        Completions,
        Dispatch,
        DispatchError,
        Dispatcher,
        // Core traits
        Event,
        Handler,
        HandlerError,
        Middleware,
        Module,
        Next,
        Topic,
        join_all,
    };
}

#[cfg(feature = "macros")]
pub use tannoy_macros::Event;
