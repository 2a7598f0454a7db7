//! SQLite backend for the university planner.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. Each operation runs in its own
//! transaction.

mod row;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::{DEFAULT_BUSY_TIMEOUT, SqliteStore, StoreConfig};

#[cfg(test)]
mod tests;
