//! Facet kinds and the client-side fallback aggregation.
//!
//! The value facets (continents, countries, locations) count distinct
//! non-null column values. The groups facet also tracks the earliest
//! derived year across each group's member events, reusing the same
//! temporal precedence as the listing.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{lang::Lang, temporal::YearSpan};

// ─── Kinds ───────────────────────────────────────────────────────────────────

/// A filterable dimension exposed by `GET /options`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacetKind {
  Continents,
  Countries,
  Locations,
  Groups,
}

impl FacetKind {
  pub fn parse(s: &str) -> Option<FacetKind> {
    match s {
      "continents" => Some(FacetKind::Continents),
      "countries" => Some(FacetKind::Countries),
      "locations" => Some(FacetKind::Locations),
      "groups" => Some(FacetKind::Groups),
      _ => None,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      FacetKind::Continents => "continents",
      FacetKind::Countries => "countries",
      FacetKind::Locations => "locations",
      FacetKind::Groups => "groups",
    }
  }

  /// The single-column facet this kind maps to; `None` for groups, which
  /// need the localized name pair plus the date columns.
  pub fn value_facet(self) -> Option<ValueFacet> {
    match self {
      FacetKind::Continents => Some(ValueFacet::Continents),
      FacetKind::Countries => Some(ValueFacet::Countries),
      FacetKind::Locations => Some(ValueFacet::Locations),
      FacetKind::Groups => None,
    }
  }
}

/// The facet kinds whose fallback aggregation reads exactly one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFacet {
  Continents,
  Countries,
  Locations,
}

// ─── Output ──────────────────────────────────────────────────────────────────

/// One facet entry. `first_year` is only present for the groups facet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetOption {
  pub value: String,
  pub count: u64,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub first_year: Option<i32>,
}

/// The columns the groups fallback aggregation fetches per event.
#[derive(Debug, Clone, Default)]
pub struct GroupFacetRow {
  pub group_name_it: Option<String>,
  pub group_name_en: Option<String>,
  pub year_from:     Option<i32>,
  pub year_to:       Option<i32>,
  pub event_year:    Option<i32>,
  pub exact_date:    Option<NaiveDate>,
}

// ─── Aggregation ─────────────────────────────────────────────────────────────

/// Count non-null occurrences per distinct value, sorted alphabetically.
pub fn aggregate_values(values: Vec<Option<String>>) -> Vec<FacetOption> {
  let mut counts: BTreeMap<String, u64> = BTreeMap::new();
  for value in values.into_iter().flatten() {
    *counts.entry(value).or_insert(0) += 1;
  }
  counts
    .into_iter()
    .map(|(value, count)| FacetOption { value, count, first_year: None })
    .collect()
}

/// Aggregate `{count, first_year}` per localized group name; `first_year`
/// is the running minimum of the derived from-year, with rows that derive
/// no year leaving it unchanged. Output sorted ascending by first year.
pub fn aggregate_groups(lang: Lang, rows: Vec<GroupFacetRow>) -> Vec<FacetOption> {
  let mut groups: HashMap<String, (u64, Option<i32>)> = HashMap::new();

  for row in rows {
    let Some(name) = lang.pick(row.group_name_it.as_deref(), row.group_name_en.as_deref())
    else {
      continue;
    };
    let span = YearSpan::compute(row.event_year, row.year_from, row.year_to, row.exact_date);
    let entry = groups.entry(name).or_insert((0, None));
    entry.0 += 1;
    if let Some(from) = span.from {
      entry.1 = Some(entry.1.map_or(from, |min| min.min(from)));
    }
  }

  let mut options: Vec<FacetOption> = groups
    .into_iter()
    .map(|(value, (count, first_year))| FacetOption { value, count, first_year })
    .collect();
  sort_by_first_year(&mut options);
  options
}

/// Sort ascending by first year, unknown years last; ties break on the
/// value so the order is deterministic. Applied to both the procedure and
/// the fallback output of the groups facet.
pub fn sort_by_first_year(options: &mut [FacetOption]) {
  options.sort_by(|a, b| {
    let ka = a.first_year.unwrap_or(i32::MAX);
    let kb = b.first_year.unwrap_or(i32::MAX);
    ka.cmp(&kb).then_with(|| a.value.cmp(&b.value))
  });
}
