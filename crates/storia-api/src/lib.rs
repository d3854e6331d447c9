//! JSON REST API for Storia.
//!
//! Exposes an axum [`Router`] backed by any [`storia_core::store::EventStore`].
//! Transport and deployment concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", storia_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod events;
pub mod options;
pub mod params;

use std::sync::Arc;

use axum::{Router, routing::get};
use storia_core::store::EventStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: EventStore + 'static,
{
  Router::new()
    .route("/events", get(events::handler::<S>))
    .route("/options", get(options::handler::<S>))
    .with_state(store)
}

// ─── Integration tests ───────────────────────────────────────────────────────
