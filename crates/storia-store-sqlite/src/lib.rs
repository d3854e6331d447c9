//! SQLite backend for the Storia event store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! pool without blocking the async runtime.
//!
//! The production database is externally owned; this crate only reads it.
//! The procedure fast path is modelled as optional curated views
//! (`events_public`, `options_*`) the database operator may provide — their
//! absence is a normal condition that routes requests through the
//! client-built fallback queries.

mod decode;
mod query;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
