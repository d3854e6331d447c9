//! The read pipeline: source selection, enrichment, media resolution, and
//! the post-fetch range filter.
//!
//! Both entry points follow the same try-primary/else-secondary shape: the
//! server-side procedure is attempted once per call, and any error routes
//! the request through the client-built fallback query. The decision is
//! per-call; no availability state is kept between requests.

use serde::Serialize;

use crate::{
  event::EnrichedEvent,
  facet::{self, FacetKind, FacetOption},
  media::group_attachments,
  query::{EventQuery, FacetQuery},
  store::EventStore,
};

// ─── Output ──────────────────────────────────────────────────────────────────

/// Which path produced a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
  Rpc,
  Fallback,
}

#[derive(Debug, Serialize)]
pub struct EventListing {
  pub rows:   Vec<EnrichedEvent>,
  pub source: Source,
}

#[derive(Debug, Serialize)]
pub struct FacetListing {
  pub rows:   Vec<FacetOption>,
  pub source: Source,
}

// ─── Event listing ───────────────────────────────────────────────────────────

/// Run the full listing pipeline: select a source, project every row
/// through localization and temporal normalization, resolve media for the
/// page, and apply the year-window filter.
///
/// Rows from both sources go through the same enrichment stages. A
/// fallback-query failure propagates to the caller; a media failure does
/// not (the page is served without media).
pub async fn list_events<S: EventStore>(
  store: &S,
  query: &EventQuery,
) -> Result<EventListing, S::Error> {
  let (raw, source) = match store.events_via_procedure(query).await {
    Ok(rows) => (rows, Source::Rpc),
    Err(e) => {
      tracing::debug!(error = %e, "events procedure unavailable, using fallback query");
      (store.events_via_query(query).await?, Source::Fallback)
    }
  };

  let mut rows: Vec<EnrichedEvent> = raw
    .into_iter()
    .map(|row| EnrichedEvent::project(query.lang, row))
    .collect();

  attach_media(store, &mut rows).await;

  if !query.window.is_unbounded() {
    rows.retain(|ev| query.window.admits(ev.span()));
  }

  Ok(EventListing { rows, source })
}

/// Batch-resolve media for a page of events. An empty page skips the
/// lookup entirely; a lookup error degrades to empty media and is only
/// logged — it must never fail the request.
async fn attach_media<S: EventStore>(store: &S, rows: &mut [EnrichedEvent]) {
  let ids: Vec<i64> = rows.iter().map(|ev| ev.id).collect();
  if ids.is_empty() {
    return;
  }

  match store.attachments_for(&ids).await {
    Ok(attachments) => {
      let mut groups = group_attachments(attachments);
      for ev in rows.iter_mut() {
        if let Some(group) = groups.remove(&ev.id) {
          ev.attach_media(group);
        }
      }
    }
    Err(e) => {
      tracing::warn!(error = %e, "media lookup failed, serving page without media");
    }
  }
}

// ─── Facets ──────────────────────────────────────────────────────────────────

/// Resolve the options for one facet kind: procedure first, client-side
/// aggregation on fallback. Groups output is sorted by first year on both
/// paths (unknown years last).
pub async fn facet_options<S: EventStore>(
  store: &S,
  kind: FacetKind,
  query: &FacetQuery,
) -> Result<FacetListing, S::Error> {
  match store.facet_options_via_procedure(kind, query).await {
    Ok(mut rows) => {
      if kind == FacetKind::Groups {
        facet::sort_by_first_year(&mut rows);
      }
      Ok(FacetListing { rows, source: Source::Rpc })
    }
    Err(e) => {
      tracing::debug!(
        facet = kind.as_str(),
        error = %e,
        "options procedure unavailable, aggregating client-side"
      );
      let rows = match kind.value_facet() {
        Some(facet) => {
          facet::aggregate_values(store.facet_values_via_query(facet, query).await?)
        }
        None => facet::aggregate_groups(query.lang, store.group_rows_via_query(query).await?),
      };
      Ok(FacetListing { rows, source: Source::Fallback })
    }
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
