//! The client-built fallback query: dynamic filters, chronological
//! ordering, and the pushed-down year-window overlap condition.
//!
//! Conditions and parameters are accumulated in lockstep and bound with
//! plain `?` placeholders, so each builder must push its parameters in the
//! same order it emits its SQL.

use rusqlite::types::Value;
use storia_core::{
  query::{escape_like, EventQuery, FacetQuery},
  temporal::YearWindow,
};

/// Every localized searchable column the free-text filter matches against.
const SEARCH_COLUMNS: [&str; 11] = [
  "title_it",
  "title_en",
  "description_it",
  "description_en",
  "short_description_it",
  "short_description_en",
  "group_name_it",
  "group_name_en",
  "continent",
  "country",
  "location",
];

/// Four-level tie-break: chronological first, insertion order last. `NULLS
/// LAST` keeps undated rows at the end at every level.
pub const EVENT_ORDER: &str = "ORDER BY year_from ASC NULLS LAST, event_year ASC NULLS LAST, \
   exact_date ASC NULLS LAST, created_at ASC NULLS LAST";

/// Derived lower bound, mirroring the `YearSpan::compute` precedence.
/// `strftime` yields NULL for dates it cannot parse (pre-epoch eras), which
/// keeps the SQL condition permissive; the in-memory range filter remains
/// the authority.
const DERIVED_FROM: &str =
  "COALESCE(event_year, year_from, CAST(strftime('%Y', exact_date) AS INTEGER))";

/// Derived upper bound: `year_to` falling back to the derived lower bound.
const DERIVED_TO: &str =
  "COALESCE(year_to, event_year, year_from, CAST(strftime('%Y', exact_date) AS INTEGER))";

// ─── Filter accumulation ─────────────────────────────────────────────────────

#[derive(Default)]
pub struct Filters {
  conds:  Vec<String>,
  params: Vec<Value>,
}

impl Filters {
  /// Equality and pattern filters shared by the listing and the facet
  /// fallback queries.
  pub fn shared(
    text:      Option<&str>,
    continent: Option<&str>,
    country:   Option<&str>,
    location:  Option<&str>,
    group:     Option<&str>,
  ) -> Filters {
    let mut filters = Filters::default();

    for (column, value) in [
      ("continent", continent),
      ("country", country),
      ("location", location),
    ] {
      if let Some(v) = value {
        filters.conds.push(format!("{column} = ?"));
        filters.params.push(Value::Text(v.to_owned()));
      }
    }

    if let Some(g) = group {
      filters
        .conds
        .push("(group_name_it = ? OR group_name_en = ?)".to_owned());
      filters.params.push(Value::Text(g.to_owned()));
      filters.params.push(Value::Text(g.to_owned()));
    }

    if let Some(t) = text {
      let pattern = format!("%{}%", escape_like(t));
      let matches: Vec<String> = SEARCH_COLUMNS
        .iter()
        .map(|column| format!("{column} LIKE ? ESCAPE '\\'"))
        .collect();
      filters.conds.push(format!("({})", matches.join(" OR ")));
      for _ in SEARCH_COLUMNS {
        filters.params.push(Value::Text(pattern.clone()));
      }
    }

    filters
  }

  pub fn for_events(query: &EventQuery) -> Filters {
    let mut filters = Filters::shared(
      query.text.as_deref(),
      query.continent.as_deref(),
      query.country.as_deref(),
      query.location.as_deref(),
      query.group.as_deref(),
    );
    filters.push_window(query.window);
    filters
  }

  pub fn for_facets(query: &FacetQuery) -> Filters {
    Filters::shared(
      query.text.as_deref(),
      query.continent.as_deref(),
      query.country.as_deref(),
      query.location.as_deref(),
      query.group.as_deref(),
    )
  }

  /// Push the inclusive year-window overlap down into the query, so
  /// pagination windows only count rows the range filter would keep.
  /// Rows whose derived bound is NULL always pass.
  fn push_window(&mut self, window: YearWindow) {
    if let Some(end) = window.end {
      self
        .conds
        .push(format!("({DERIVED_FROM} IS NULL OR {DERIVED_FROM} <= ?)"));
      self.params.push(Value::Integer(end as i64));
    }
    if let Some(start) = window.start {
      self
        .conds
        .push(format!("({DERIVED_TO} IS NULL OR {DERIVED_TO} >= ?)"));
      self.params.push(Value::Integer(start as i64));
    }
  }

  pub fn where_clause(&self) -> String {
    if self.conds.is_empty() {
      String::new()
    } else {
      format!("WHERE {}", self.conds.join(" AND "))
    }
  }

  pub fn into_params(self) -> Vec<Value> {
    self.params
  }
}
