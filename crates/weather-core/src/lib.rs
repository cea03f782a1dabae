//! Core types and trait definitions for the weather condition store.
//!
//! This crate is free of database dependencies. Storage backends implement
//! [`store::WeatherStore`]; callers depend on the trait, not the backend.

// Native `async fn` in traits; the futures carry explicit `Send` bounds.
#![allow(async_fn_in_trait)]

pub mod cancel;
pub mod condition;
pub mod error;
pub mod live;
pub mod store;

pub use cancel::cancellable;
pub use condition::{WeatherCondition, default_conditions};
pub use error::Cancelled;
pub use live::LiveQuery;
pub use store::WeatherStore;
