//! Core types and read-pipeline logic for the Storia timeline service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod event;
pub mod facet;
pub mod lang;
pub mod media;
pub mod pipeline;
pub mod query;
pub mod store;
pub mod temporal;

pub use error::{Error, Result};
