//! SQLite backend for the weather condition store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. Commits are observed through SQLite's
//! hooks and fanned out to live queries by [`notify::InvalidationTracker`].

mod encode;
mod schema;
mod store;

pub mod error;
pub mod notify;

pub use error::{Error, Result};
pub use schema::TABLE;
pub use store::{SqliteStore, StoreOptions};
