//! Request filter types and the pattern-match sanitizer.

use crate::{lang::Lang, temporal::YearWindow};

/// Default page size for the event listing.
pub const DEFAULT_LIMIT: u32 = 1000;

/// Row ceiling for facet fallback fetches; facets expose no pagination.
pub const FACET_ROW_CEILING: u32 = 100_000;

// ─── Sanitizer ───────────────────────────────────────────────────────────────

/// Escape `LIKE` metacharacters in free-text search input.
///
/// Every `%` and `_` is prefixed with a backslash so the caller's text is
/// matched literally; nothing else is altered. The query builder pairs the
/// result with an `ESCAPE '\'` clause.
pub fn escape_like(input: &str) -> String {
  let mut out = String::with_capacity(input.len());
  for ch in input.chars() {
    if ch == '%' || ch == '_' {
      out.push('\\');
    }
    out.push(ch);
  }
  out
}

// ─── Queries ─────────────────────────────────────────────────────────────────

/// Parameters for the event listing.
#[derive(Debug, Clone)]
pub struct EventQuery {
  pub lang:      Lang,
  /// Free-text filter, matched across every localized searchable column.
  pub text:      Option<String>,
  pub continent: Option<String>,
  pub country:   Option<String>,
  pub location:  Option<String>,
  /// Matched by equality against either localized group-name column.
  pub group:     Option<String>,
  pub window:    YearWindow,
  pub limit:     u32,
  pub offset:    u32,
}

impl Default for EventQuery {
  fn default() -> Self {
    EventQuery {
      lang:      Lang::default(),
      text:      None,
      continent: None,
      country:   None,
      location:  None,
      group:     None,
      window:    YearWindow::default(),
      limit:     DEFAULT_LIMIT,
      offset:    0,
    }
  }
}

/// Parameters for the facet/options aggregation.
#[derive(Debug, Clone, Default)]
pub struct FacetQuery {
  pub lang:      Lang,
  pub text:      Option<String>,
  pub continent: Option<String>,
  pub country:   Option<String>,
  pub location:  Option<String>,
  pub group:     Option<String>,
}

impl FacetQuery {
  /// True when the request carries any filter beyond the language.
  pub fn has_filters(&self) -> bool {
    self.text.is_some()
      || self.continent.is_some()
      || self.country.is_some()
      || self.location.is_some()
      || self.group.is_some()
  }
}
