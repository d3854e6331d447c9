//! [`SqliteStore`] — the SQLite implementation of [`EventStore`].

use std::path::Path;

use rusqlite::params_from_iter;
use rusqlite::types::Value;

use storia_core::{
  event::EventRow,
  facet::{FacetKind, FacetOption, GroupFacetRow, ValueFacet},
  media::MediaAttachment,
  query::{EventQuery, FacetQuery, FACET_ROW_CEILING},
  store::EventStore,
};

use crate::{
  decode::{decode_date, RawAttachment, RawEvent, EVENT_COLUMNS, MEDIA_COLUMNS},
  query::{Filters, EVENT_ORDER},
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An event store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run raw statements against the backing database. Intended for
  /// seeding dev fixtures and tests; the service itself never writes.
  pub async fn execute_batch(&self, sql: String) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute_batch(&sql)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run one event select against `relation` — the base table for the
  /// fallback path, the curated `events_public` view for the procedure
  /// path. Both apply the same filters, ordering, and pagination.
  async fn select_events(&self, relation: &str, query: &EventQuery) -> Result<Vec<EventRow>> {
    let filters = Filters::for_events(query);
    let sql = format!(
      "SELECT {EVENT_COLUMNS} FROM {relation} {} {EVENT_ORDER} LIMIT ? OFFSET ?",
      filters.where_clause()
    );
    let mut params = filters.into_params();
    params.push(Value::Integer(query.limit as i64));
    params.push(Value::Integer(query.offset as i64));

    let raws: Vec<RawEvent> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(params_from_iter(params), RawEvent::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawEvent::into_event).collect()
  }
}

// ─── EventStore impl ─────────────────────────────────────────────────────────

impl EventStore for SqliteStore {
  type Error = Error;

  // ── Event listing ─────────────────────────────────────────────────────────

  async fn events_via_procedure(&self, query: &EventQuery) -> Result<Vec<EventRow>> {
    // The curated view is row-shaped like the base table, so the full
    // filter set applies. A missing view errors here and triggers the
    // fallback in the pipeline.
    self.select_events("events_public", query).await
  }

  async fn events_via_query(&self, query: &EventQuery) -> Result<Vec<EventRow>> {
    self.select_events("events", query).await
  }

  // ── Media ─────────────────────────────────────────────────────────────────

  async fn attachments_for(&self, event_ids: &[i64]) -> Result<Vec<MediaAttachment>> {
    if event_ids.is_empty() {
      return Ok(Vec::new());
    }

    let placeholders = vec!["?"; event_ids.len()].join(", ");
    let sql = format!(
      "SELECT {MEDIA_COLUMNS} FROM event_media WHERE event_id IN ({placeholders})"
    );
    let params: Vec<Value> = event_ids.iter().map(|id| Value::Integer(*id)).collect();

    let raws: Vec<RawAttachment> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(params_from_iter(params), RawAttachment::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawAttachment::into_attachment).collect()
  }

  // ── Facets ────────────────────────────────────────────────────────────────

  async fn facet_options_via_procedure(
    &self,
    kind: FacetKind,
    query: &FacetQuery,
  ) -> Result<Vec<FacetOption>> {
    // The options views are pre-aggregated, so per-request filters cannot
    // be applied on top of them; filtered requests use the fallback
    // aggregation instead.
    if query.has_filters() {
      return Err(Error::ProcedureUnavailable(format!(
        "options_{} cannot serve filtered requests",
        kind.as_str()
      )));
    }

    let sql = match kind {
      FacetKind::Groups => {
        "SELECT value, count, first_year FROM options_groups".to_owned()
      }
      other => format!("SELECT value, count FROM options_{}", other.as_str()),
    };
    let with_first_year = kind == FacetKind::Groups;

    let options: Vec<FacetOption> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map([], |row| {
            Ok(FacetOption {
              value:      row.get(0)?,
              count:      row.get::<_, i64>(1)? as u64,
              first_year: if with_first_year { row.get(2)? } else { None },
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(options)
  }

  async fn facet_values_via_query(
    &self,
    facet: ValueFacet,
    query: &FacetQuery,
  ) -> Result<Vec<Option<String>>> {
    let column = match facet {
      ValueFacet::Continents => "continent",
      ValueFacet::Countries => "country",
      ValueFacet::Locations => "location",
    };

    let filters = Filters::for_facets(query);
    let sql = format!(
      "SELECT {column} FROM events {} LIMIT {FACET_ROW_CEILING}",
      filters.where_clause()
    );
    let params = filters.into_params();

    let values: Vec<Option<String>> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(params_from_iter(params), |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(values)
  }

  async fn group_rows_via_query(&self, query: &FacetQuery) -> Result<Vec<GroupFacetRow>> {
    let filters = Filters::for_facets(query);
    let sql = format!(
      "SELECT group_name_it, group_name_en, year_from, year_to, event_year, exact_date \
       FROM events {} LIMIT {FACET_ROW_CEILING}",
      filters.where_clause()
    );
    let params = filters.into_params();

    let raws: Vec<(Option<String>, Option<String>, Option<i32>, Option<i32>, Option<i32>, Option<String>)> =
      self
        .conn
        .call(move |conn| {
          let mut stmt = conn.prepare(&sql)?;
          let rows = stmt
            .query_map(params_from_iter(params), |row| {
              Ok((
                row.get(0)?,
                row.get(1)?,
                row.get(2)?,
                row.get(3)?,
                row.get(4)?,
                row.get(5)?,
              ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
          Ok(rows)
        })
        .await?;

    raws
      .into_iter()
      .map(|(group_name_it, group_name_en, year_from, year_to, event_year, exact_date)| {
        Ok(GroupFacetRow {
          group_name_it,
          group_name_en,
          year_from,
          year_to,
          event_year,
          exact_date: exact_date.as_deref().map(decode_date).transpose()?,
        })
      })
      .collect()
  }
}
