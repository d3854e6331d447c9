//! Event rows and their enriched, per-request projection.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  lang::Lang,
  media::{display_url, MediaGroup},
  temporal::YearSpan,
};

// ─── Raw row ─────────────────────────────────────────────────────────────────

/// One row of the externally-owned `events` table, as fetched.
///
/// Localized text comes in (Italian, English) column pairs; the four date
/// columns are independent and resolved by [`YearSpan::compute`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventRow {
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
  pub exact_date:           Option<NaiveDate>,
  pub created_at:           Option<DateTime<Utc>>,
  /// Legacy single-image column; used when no cover attachment resolves.
  pub image_url:            Option<String>,
}

// ─── Enriched projection ─────────────────────────────────────────────────────

/// The read-model shape returned by the listing API: localized text, the
/// derived year span, and the resolved media projection. Built fresh per
/// request; never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedEvent {
  pub id:          i64,
  pub title:       Option<String>,
  pub description: Option<String>,
  pub group_name:  Option<String>,
  pub link:        Option<String>,
  pub continent:   Option<String>,
  pub country:     Option<String>,
  pub location:    Option<String>,
  pub latitude:    Option<f64>,
  pub longitude:   Option<f64>,
  pub from_year:   Option<i32>,
  pub to_year:     Option<i32>,
  pub created_at:  Option<DateTime<Utc>>,
  /// Resolved cover URL, falling back to the legacy image column.
  pub image_url:   Option<String>,
  /// Display URLs of the gallery items, in gallery order.
  pub images:      Vec<String>,
  pub media:       MediaGroup,
}

impl EnrichedEvent {
  /// Project a raw row through the localization resolver and the temporal
  /// normalizer. Media starts empty; [`attach_media`](Self::attach_media)
  /// fills it in when the batch lookup succeeds.
  pub fn project(lang: Lang, row: EventRow) -> EnrichedEvent {
    let span = YearSpan::compute(row.event_year, row.year_from, row.year_to, row.exact_date);

    // The full description falls back to the short pair only when both
    // full variants are absent.
    let description = lang
      .pick(row.description_it.as_deref(), row.description_en.as_deref())
      .or_else(|| {
        lang.pick(
          row.short_description_it.as_deref(),
          row.short_description_en.as_deref(),
        )
      });

    EnrichedEvent {
      id:         row.id,
      title:      lang.pick(row.title_it.as_deref(), row.title_en.as_deref()),
      description,
      group_name: lang.pick(row.group_name_it.as_deref(), row.group_name_en.as_deref()),
      link:       lang.pick(row.link_it.as_deref(), row.link_en.as_deref()),
      continent:  row.continent,
      country:    row.country,
      location:   row.location,
      latitude:   row.latitude,
      longitude:  row.longitude,
      from_year:  span.from,
      to_year:    span.to,
      created_at: row.created_at,
      image_url:  row.image_url,
      images:     Vec::new(),
      media:      MediaGroup::default(),
    }
  }

  pub fn span(&self) -> YearSpan {
    YearSpan { from: self.from_year, to: self.to_year }
  }

  /// Apply the resolved media group: the cover's display URL overrides the
  /// legacy `image_url` when present, and the gallery URLs (already in
  /// gallery order) become the `images` list.
  pub fn attach_media(&mut self, group: MediaGroup) {
    if let Some(url) = group.cover.as_ref().and_then(display_url) {
      self.image_url = Some(url.to_owned());
    }
    self.images = group
      .gallery
      .iter()
      .filter_map(|a| display_url(a))
      .map(str::to_owned)
      .collect();
    self.media = group;
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::media::{MediaAttachment, MediaRole};
  use uuid::Uuid;

  fn row() -> EventRow {
    EventRow {
      id: 1,
      title_it: Some("Unità d'Italia".into()),
      title_en: Some("Italian unification".into()),
      description_it: Some("descrizione".into()),
      description_en: None,
      group_name_it: Some("Risorgimento".into()),
      event_year: Some(1861),
      image_url: Some("legacy.jpg".into()),
      ..Default::default()
    }
  }

  fn gallery_item(url: &str, sort_order: i64) -> MediaAttachment {
    MediaAttachment {
      id: sort_order,
      media_id: Uuid::new_v4(),
      event_id: 1,
      role: MediaRole::Gallery,
      is_primary: false,
      sort_order,
      title: None,
      caption: None,
      alt_text: None,
      bucket: None,
      path: None,
      mime_type: None,
      checksum: None,
      public_url: if url.is_empty() { None } else { Some(url.into()) },
      preview_url: None,
      source_url: None,
      width: None,
      height: None,
      duration_seconds: None,
      attachment_metadata: None,
      asset_metadata: None,
    }
  }

  #[test]
  fn project_localizes_per_field() {
    let it = EnrichedEvent::project(Lang::It, row());
    assert_eq!(it.title.as_deref(), Some("Unità d'Italia"));
    assert_eq!(it.description.as_deref(), Some("descrizione"));

    let en = EnrichedEvent::project(Lang::En, row());
    assert_eq!(en.title.as_deref(), Some("Italian unification"));
    // English description is absent, so the Italian one wins.
    assert_eq!(en.description.as_deref(), Some("descrizione"));
    // Group name only exists in Italian; both languages resolve it.
    assert_eq!(en.group_name.as_deref(), Some("Risorgimento"));
  }

  #[test]
  fn project_falls_back_to_short_description() {
    let mut r = row();
    r.description_it = None;
    r.description_en = None;
    r.short_description_it = Some("breve".into());
    r.short_description_en = Some("short".into());

    let ev = EnrichedEvent::project(Lang::En, r);
    assert_eq!(ev.description.as_deref(), Some("short"));
  }

  #[test]
  fn project_derives_years_and_keeps_legacy_image() {
    let ev = EnrichedEvent::project(Lang::It, row());
    assert_eq!(ev.from_year, Some(1861));
    assert_eq!(ev.to_year, Some(1861));
    assert_eq!(ev.image_url.as_deref(), Some("legacy.jpg"));
    assert!(ev.images.is_empty());
    assert!(ev.media.cover.is_none());
  }

  #[test]
  fn attach_media_overrides_legacy_image_only_with_a_cover_url() {
    let mut ev = EnrichedEvent::project(Lang::It, row());
    let mut cover = gallery_item("cover.jpg", 0);
    cover.role = MediaRole::Cover;
    ev.attach_media(MediaGroup {
      cover: Some(cover),
      gallery: vec![gallery_item("a.jpg", 0), gallery_item("", 1), gallery_item("b.jpg", 2)],
    });

    assert_eq!(ev.image_url.as_deref(), Some("cover.jpg"));
    // URL-less gallery entries are dropped from the images list.
    assert_eq!(ev.images, vec!["a.jpg".to_string(), "b.jpg".to_string()]);
    assert_eq!(ev.media.gallery.len(), 3);
  }

  #[test]
  fn attach_media_without_cover_keeps_legacy_image() {
    let mut ev = EnrichedEvent::project(Lang::It, row());
    ev.attach_media(MediaGroup { cover: None, gallery: vec![] });
    assert_eq!(ev.image_url.as_deref(), Some("legacy.jpg"));
  }
}
