//! Core types and trait definitions for the weigh tracker.
//!
//! This crate is deliberately free of database and terminal dependencies.
//! The store backend and the CLI both depend on it.

pub mod entry;
pub mod error;
pub mod roster;
pub mod store;
pub mod target;

pub use error::{Error, Result};
