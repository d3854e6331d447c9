//! Temporal normalization and the year-window overlap filter.
//!
//! An event carries four independent date columns (`year_from`, `year_to`,
//! `event_year`, `exact_date`); none is authoritative alone. A fixed
//! precedence derives the single `(from, to)` pair everything downstream
//! (ordering, range filtering, the groups facet) works with.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

// ─── YearSpan ────────────────────────────────────────────────────────────────

/// The derived year range of an event. Either bound may be unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearSpan {
  pub from: Option<i32>,
  pub to:   Option<i32>,
}

impl YearSpan {
  /// Derive the span from the four raw date columns.
  ///
  /// Precedence: `from = event_year ?? year_from ?? year(exact_date)`;
  /// `to = year_to ?? from`.
  pub fn compute(
    event_year: Option<i32>,
    year_from:  Option<i32>,
    year_to:    Option<i32>,
    exact_date: Option<NaiveDate>,
  ) -> YearSpan {
    let exact = exact_date.map(|d| d.year());
    let from = event_year.or(year_from).or(exact);
    let to = year_to.or(from);
    YearSpan { from, to }
  }
}

// ─── YearWindow ──────────────────────────────────────────────────────────────

/// The requested year range. Unset bounds are unconstrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct YearWindow {
  pub start: Option<i32>,
  pub end:   Option<i32>,
}

impl YearWindow {
  pub fn is_unbounded(&self) -> bool {
    self.start.is_none() && self.end.is_none()
  }

  /// Inclusive interval-overlap test between this window and a span.
  ///
  /// An unknown span bound never excludes the row; it behaves like an
  /// open interval on that side.
  pub fn admits(&self, span: YearSpan) -> bool {
    if self.is_unbounded() {
      return true;
    }
    let from_ok = match (self.end, span.from) {
      (Some(end), Some(from)) => from <= end,
      _ => true,
    };
    let to_ok = match (self.start, span.to) {
      (Some(start), Some(to)) => to >= start,
      _ => true,
    };
    from_ok && to_ok
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn date(y: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, 6, 15).unwrap()
  }

  // All 2⁴ presence/absence combinations of (event_year, year_from,
  // year_to, exact_date), checked against the documented precedence.
  #[test]
  fn compute_precedence_exhaustive() {
    let ey = 100;
    let yf = 200;
    let yt = 300;
    let ex = 400;

    for mask in 0u8..16 {
      let event_year = (mask & 1 != 0).then_some(ey);
      let year_from = (mask & 2 != 0).then_some(yf);
      let year_to = (mask & 4 != 0).then_some(yt);
      let exact_date = (mask & 8 != 0).then(|| date(ex));

      let span = YearSpan::compute(event_year, year_from, year_to, exact_date);

      let exact = exact_date.map(|d| d.year());
      let expected_from = event_year.or(year_from).or(exact);
      let expected_to = year_to.or(expected_from);
      assert_eq!(span.from, expected_from, "mask {mask:04b}");
      assert_eq!(span.to, expected_to, "mask {mask:04b}");
    }
  }

  #[test]
  fn compute_is_deterministic() {
    let a = YearSpan::compute(Some(1969), None, Some(1972), Some(date(1970)));
    let b = YearSpan::compute(Some(1969), None, Some(1972), Some(date(1970)));
    assert_eq!(a, b);
    assert_eq!(a, YearSpan { from: Some(1969), to: Some(1972) });
  }

  #[test]
  fn compute_exact_date_is_last_resort_for_from() {
    let span = YearSpan::compute(None, None, None, Some(date(1492)));
    assert_eq!(span, YearSpan { from: Some(1492), to: Some(1492) });
  }

  #[test]
  fn unbounded_window_admits_everything() {
    let w = YearWindow::default();
    assert!(w.admits(YearSpan { from: Some(2050), to: Some(2100) }));
    assert!(w.admits(YearSpan { from: None, to: None }));
  }

  #[test]
  fn window_admits_overlapping_span() {
    let w = YearWindow { start: Some(1900), end: Some(2000) };
    assert!(w.admits(YearSpan { from: Some(1950), to: Some(1980) }));
    // Partial overlaps on either side count too.
    assert!(w.admits(YearSpan { from: Some(1850), to: Some(1910) }));
    assert!(w.admits(YearSpan { from: Some(1990), to: Some(2050) }));
  }

  #[test]
  fn window_excludes_disjoint_span() {
    let w = YearWindow { start: Some(1900), end: Some(2000) };
    assert!(!w.admits(YearSpan { from: Some(2050), to: Some(2060) }));
    assert!(!w.admits(YearSpan { from: Some(1700), to: Some(1800) }));
  }

  #[test]
  fn unknown_span_bounds_never_exclude() {
    let w = YearWindow { start: Some(1900), end: Some(2000) };
    assert!(w.admits(YearSpan { from: None, to: Some(2100) }));
    assert!(w.admits(YearSpan { from: Some(1800), to: None }));
    assert!(w.admits(YearSpan { from: None, to: None }));
  }

  #[test]
  fn half_open_windows() {
    let only_start = YearWindow { start: Some(0), end: None };
    assert!(only_start.admits(YearSpan { from: Some(-500), to: Some(100) }));
    assert!(!only_start.admits(YearSpan { from: Some(-500), to: Some(-100) }));

    let only_end = YearWindow { start: None, end: Some(0) };
    assert!(only_end.admits(YearSpan { from: Some(-500), to: Some(100) }));
    assert!(!only_end.admits(YearSpan { from: Some(100), to: Some(200) }));
  }
}
