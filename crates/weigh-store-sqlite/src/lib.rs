//! SQLite backend for the weigh tracker.
//!
//! Owns a single [`rusqlite::Connection`] for the lifetime of the store; each
//! operation runs in its own transaction on it.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
