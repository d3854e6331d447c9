//! The `EventStore` trait — the seam between the read pipeline and a
//! concrete data-store backend.
//!
//! The trait is implemented by storage backends (e.g.
//! `storia-store-sqlite`). The pipeline and the API layer depend on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  event::EventRow,
  facet::{FacetKind, FacetOption, GroupFacetRow, ValueFacet},
  media::MediaAttachment,
  query::{EventQuery, FacetQuery},
};

/// Abstraction over the externally-owned relational store.
///
/// Every read surface comes in two flavours: a `*_via_procedure` fast path
/// backed by optional server-side objects, and a `*_via_query` fallback the
/// client builds itself. A procedure-path error is a normal condition — the
/// pipeline treats it as "use the fallback", never as a request failure.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait EventStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Event listing ─────────────────────────────────────────────────────

  /// Attempt the server-side `events_public` fast path with the full
  /// filter set.
  fn events_via_procedure<'a>(
    &'a self,
    query: &'a EventQuery,
  ) -> impl Future<Output = Result<Vec<EventRow>, Self::Error>> + Send + 'a;

  /// The client-built filtered, ordered, paginated fallback query.
  fn events_via_query<'a>(
    &'a self,
    query: &'a EventQuery,
  ) -> impl Future<Output = Result<Vec<EventRow>, Self::Error>> + Send + 'a;

  // ── Media ─────────────────────────────────────────────────────────────

  /// Batch-fetch every attachment row for the given page of event ids.
  /// Callers skip the call entirely for an empty id list.
  fn attachments_for<'a>(
    &'a self,
    event_ids: &'a [i64],
  ) -> impl Future<Output = Result<Vec<MediaAttachment>, Self::Error>> + Send + 'a;

  // ── Facets ────────────────────────────────────────────────────────────

  /// Attempt the server-side pre-aggregated options for `kind`.
  fn facet_options_via_procedure<'a>(
    &'a self,
    kind: FacetKind,
    query: &'a FacetQuery,
  ) -> impl Future<Output = Result<Vec<FacetOption>, Self::Error>> + Send + 'a;

  /// Fallback fetch of the single facet column, filters applied, capped at
  /// the facet row ceiling. Aggregation happens client-side.
  fn facet_values_via_query<'a>(
    &'a self,
    facet: ValueFacet,
    query: &'a FacetQuery,
  ) -> impl Future<Output = Result<Vec<Option<String>>, Self::Error>> + Send + 'a;

  /// Fallback fetch for the groups facet: both localized name columns plus
  /// the four date columns, filters applied, capped at the row ceiling.
  fn group_rows_via_query<'a>(
    &'a self,
    query: &'a FacetQuery,
  ) -> impl Future<Output = Result<Vec<GroupFacetRow>, Self::Error>> + Send + 'a;
}
