//! Handler for `GET /events`.
//!
//! Query params map onto [`EventQuery`]; numeric params are parsed
//! leniently (see [`crate::params`]).

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
};
use serde::Deserialize;
use storia_core::{
  lang::Lang,
  pipeline::{self, EventListing},
  query::{EventQuery, DEFAULT_LIMIT},
  store::EventStore,
  temporal::YearWindow,
};

use crate::{
  error::ApiError,
  params::{lenient_i32, lenient_u32},
};

#[derive(Debug, Deserialize, Default)]
pub struct EventParams {
  pub lang:       Option<String>,
  /// Free-text search, matched across every localized searchable column.
  pub q:          Option<String>,
  pub continent:  Option<String>,
  pub country:    Option<String>,
  pub location:   Option<String>,
  pub group:      Option<String>,
  pub year_start: Option<String>,
  pub year_end:   Option<String>,
  pub limit:      Option<String>,
  pub offset:     Option<String>,
}

impl EventParams {
  fn into_query(self) -> EventQuery {
    EventQuery {
      lang:      Lang::parse(self.lang.as_deref()),
      text:      self.q,
      continent: self.continent,
      country:   self.country,
      location:  self.location,
      group:     self.group,
      window:    YearWindow {
        start: lenient_i32(self.year_start.as_deref()),
        end:   lenient_i32(self.year_end.as_deref()),
      },
      limit:     lenient_u32(self.limit.as_deref(), DEFAULT_LIMIT),
      offset:    lenient_u32(self.offset.as_deref(), 0),
    }
  }
}

/// `GET /events[?lang=...][&q=...][&continent=...][&year_start=...][&limit=...]`
pub async fn handler<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<EventParams>,
) -> Result<Json<EventListing>, ApiError>
where
  S: EventStore,
{
  let query = params.into_query();
  let listing = pipeline::list_events(store.as_ref(), &query)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(listing))
}
