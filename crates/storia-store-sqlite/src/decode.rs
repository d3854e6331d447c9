//! Decoding helpers between the plain-text representations stored in SQLite
//! columns and the Rust domain types.
//!
//! Timestamps are RFC 3339 strings, calendar dates ISO 8601, UUIDs
//! hyphenated lowercase strings, and the free-form metadata columns compact
//! JSON. Raw structs are collected inside the connection closure (they must
//! be `Send + 'static`) and decoded afterwards.

use chrono::{DateTime, NaiveDate, Utc};
use storia_core::{
  event::EventRow,
  media::{MediaAttachment, MediaRole},
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Scalar decoders ─────────────────────────────────────────────────────────

pub fn decode_uuid(s: &str) -> Result<Uuid> {
  Ok(Uuid::parse_str(s)?)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

pub fn decode_json(s: &str) -> Result<serde_json::Value> {
  Ok(serde_json::from_str(s)?)
}

// ─── Events ──────────────────────────────────────────────────────────────────

/// Column order shared by the fallback query and the `events_public` view.
pub const EVENT_COLUMNS: &str = "id, title_it, title_en, description_it, description_en, \
   short_description_it, short_description_en, group_name_it, group_name_en, \
   link_it, link_en, continent, country, location, latitude, longitude, \
   year_from, year_to, event_year, exact_date, created_at, image_url";

pub struct RawEvent {
  pub id:                   i64,
  pub title_it:             Option<String>,
  pub title_en:             Option<String>,
  pub description_it:       Option<String>,
  pub description_en:       Option<String>,
  pub short_description_it: Option<String>,
  pub short_description_en: Option<String>,
  pub group_name_it:        Option<String>,
  pub group_name_en:        Option<String>,
  pub link_it:              Option<String>,
  pub link_en:              Option<String>,
  pub continent:            Option<String>,
  pub country:              Option<String>,
  pub location:             Option<String>,
  pub latitude:             Option<f64>,
  pub longitude:            Option<f64>,
  pub year_from:            Option<i32>,
  pub year_to:              Option<i32>,
  pub event_year:           Option<i32>,
  pub exact_date:           Option<String>,
  pub created_at:           Option<String>,
  pub image_url:            Option<String>,
}

impl RawEvent {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawEvent> {
    Ok(RawEvent {
      id:                   row.get(0)?,
      title_it:             row.get(1)?,
      title_en:             row.get(2)?,
      description_it:       row.get(3)?,
      description_en:       row.get(4)?,
      short_description_it: row.get(5)?,
      short_description_en: row.get(6)?,
      group_name_it:        row.get(7)?,
      group_name_en:        row.get(8)?,
      link_it:              row.get(9)?,
      link_en:              row.get(10)?,
      continent:            row.get(11)?,
      country:              row.get(12)?,
      location:             row.get(13)?,
      latitude:             row.get(14)?,
      longitude:            row.get(15)?,
      year_from:            row.get(16)?,
      year_to:              row.get(17)?,
      event_year:           row.get(18)?,
      exact_date:           row.get(19)?,
      created_at:           row.get(20)?,
      image_url:            row.get(21)?,
    })
  }

  pub fn into_event(self) -> Result<EventRow> {
    Ok(EventRow {
      id:                   self.id,
      title_it:             self.title_it,
      title_en:             self.title_en,
      description_it:       self.description_it,
      description_en:       self.description_en,
      short_description_it: self.short_description_it,
      short_description_en: self.short_description_en,
      group_name_it:        self.group_name_it,
      group_name_en:        self.group_name_en,
      link_it:              self.link_it,
      link_en:              self.link_en,
      continent:            self.continent,
      country:              self.country,
      location:             self.location,
      latitude:             self.latitude,
      longitude:            self.longitude,
      year_from:            self.year_from,
      year_to:              self.year_to,
      event_year:           self.event_year,
      exact_date:           self.exact_date.as_deref().map(decode_date).transpose()?,
      created_at:           self.created_at.as_deref().map(decode_dt).transpose()?,
      image_url:            self.image_url,
    })
  }
}

// ─── Media ───────────────────────────────────────────────────────────────────

/// The fixed projection fetched from the attachments table.
pub const MEDIA_COLUMNS: &str = "id, media_id, event_id, role, is_primary, sort_order, \
   title, caption, alt_text, bucket, path, mime_type, checksum, \
   public_url, preview_url, source_url, width, height, duration_seconds, \
   attachment_metadata, asset_metadata";

pub struct RawAttachment {
  pub id:                  i64,
  pub media_id:            String,
  pub event_id:            i64,
  pub role:                String,
  pub is_primary:          bool,
  pub sort_order:          Option<i64>,
  pub title:               Option<String>,
  pub caption:             Option<String>,
  pub alt_text:            Option<String>,
  pub bucket:              Option<String>,
  pub path:                Option<String>,
  pub mime_type:           Option<String>,
  pub checksum:            Option<String>,
  pub public_url:          Option<String>,
  pub preview_url:         Option<String>,
  pub source_url:          Option<String>,
  pub width:               Option<i64>,
  pub height:              Option<i64>,
  pub duration_seconds:    Option<f64>,
  pub attachment_metadata: Option<String>,
  pub asset_metadata:      Option<String>,
}

impl RawAttachment {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawAttachment> {
    Ok(RawAttachment {
      id:                  row.get(0)?,
      media_id:            row.get(1)?,
      event_id:            row.get(2)?,
      role:                row.get(3)?,
      is_primary:          row.get(4)?,
      sort_order:          row.get(5)?,
      title:               row.get(6)?,
      caption:             row.get(7)?,
      alt_text:            row.get(8)?,
      bucket:              row.get(9)?,
      path:                row.get(10)?,
      mime_type:           row.get(11)?,
      checksum:            row.get(12)?,
      public_url:          row.get(13)?,
      preview_url:         row.get(14)?,
      source_url:          row.get(15)?,
      width:               row.get(16)?,
      height:              row.get(17)?,
      duration_seconds:    row.get(18)?,
      attachment_metadata: row.get(19)?,
      asset_metadata:      row.get(20)?,
    })
  }

  pub fn into_attachment(self) -> Result<MediaAttachment> {
    Ok(MediaAttachment {
      id:                  self.id,
      media_id:            decode_uuid(&self.media_id)?,
      event_id:            self.event_id,
      role:                MediaRole::parse(&self.role)?,
      is_primary:          self.is_primary,
      // A missing sort order counts as 0 for cover and gallery ordering.
      sort_order:          self.sort_order.unwrap_or(0),
      title:               self.title,
      caption:             self.caption,
      alt_text:            self.alt_text,
      bucket:              self.bucket,
      path:                self.path,
      mime_type:           self.mime_type,
      checksum:            self.checksum,
      public_url:          self.public_url,
      preview_url:         self.preview_url,
      source_url:          self.source_url,
      width:               self.width,
      height:              self.height,
      duration_seconds:    self.duration_seconds,
      attachment_metadata: self.attachment_metadata.as_deref().map(decode_json).transpose()?,
      asset_metadata:      self.asset_metadata.as_deref().map(decode_json).transpose()?,
    })
  }
}
