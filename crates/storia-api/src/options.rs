//! Handler for `GET /options` — the facet value/count listing.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
};
use serde::Deserialize;
use storia_core::{
  facet::FacetKind,
  lang::Lang,
  pipeline::{self, FacetListing},
  query::FacetQuery,
  store::EventStore,
};

use crate::error::ApiError;

#[derive(Debug, Deserialize, Default)]
pub struct OptionParams {
  /// Facet kind: `continents`, `countries`, `locations`, or `groups`.
  /// The one required parameter on this endpoint.
  #[serde(rename = "type")]
  pub kind:      Option<String>,
  pub lang:      Option<String>,
  pub q:         Option<String>,
  pub continent: Option<String>,
  pub country:   Option<String>,
  pub location:  Option<String>,
  pub group:     Option<String>,
}

/// `GET /options?type=<kind>[&lang=...][&q=...][&continent=...]`
pub async fn handler<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<OptionParams>,
) -> Result<Json<FacetListing>, ApiError>
where
  S: EventStore,
{
  let raw_kind = params
    .kind
    .as_deref()
    .ok_or_else(|| ApiError::BadRequest("missing required parameter: type".to_owned()))?;
  let kind = FacetKind::parse(raw_kind)
    .ok_or_else(|| ApiError::BadRequest(format!("unknown facet type: {raw_kind:?}")))?;

  let query = FacetQuery {
    lang:      Lang::parse(params.lang.as_deref()),
    text:      params.q,
    continent: params.continent,
    country:   params.country,
    location:  params.location,
    group:     params.group,
  };

  let listing = pipeline::facet_options(store.as_ref(), kind, &query)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(listing))
}
