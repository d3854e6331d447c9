//! Media attachments and the per-event cover/gallery grouping.
//!
//! Attachments are owned by an external assets pipeline; this module only
//! shapes a flat batch of rows into one `MediaGroup` per event. Grouping is
//! a pure function; nothing here touches the store.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Roles ───────────────────────────────────────────────────────────────────

/// The declared role of an attachment. `Gallery` and `Attachment` are
/// treated identically downstream; only `Cover` is special.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaRole {
  Cover,
  Gallery,
  Attachment,
}

impl MediaRole {
  pub fn as_str(self) -> &'static str {
    match self {
      MediaRole::Cover => "cover",
      MediaRole::Gallery => "gallery",
      MediaRole::Attachment => "attachment",
    }
  }

  pub fn parse(s: &str) -> Result<MediaRole> {
    match s {
      "cover" => Ok(MediaRole::Cover),
      "gallery" => Ok(MediaRole::Gallery),
      "attachment" => Ok(MediaRole::Attachment),
      other => Err(Error::UnknownMediaRole(other.to_owned())),
    }
  }
}

// ─── Attachment ──────────────────────────────────────────────────────────────

/// One media row, as stored in the attachments view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaAttachment {
  pub id:                  i64,
  pub media_id:            Uuid,
  pub event_id:            i64,
  pub role:                MediaRole,
  pub is_primary:          bool,
  pub sort_order:          i64,
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
  pub attachment_metadata: Option<serde_json::Value>,
  pub asset_metadata:      Option<serde_json::Value>,
}

/// The best displayable URL for an attachment: public, then preview, then
/// source. Empty strings count as missing.
pub fn display_url(a: &MediaAttachment) -> Option<&str> {
  [&a.public_url, &a.preview_url, &a.source_url]
    .into_iter()
    .filter_map(|u| u.as_deref())
    .find(|u| !u.is_empty())
}

// ─── Grouping ────────────────────────────────────────────────────────────────

/// The resolved media projection for one event.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MediaGroup {
  pub cover:   Option<MediaAttachment>,
  pub gallery: Vec<MediaAttachment>,
}

/// True when `candidate` should replace `best` as the cover.
///
/// Primary candidates beat non-primary ones; among equally-primary
/// candidates, a strictly lower sort order wins. Equal pairs keep the
/// incumbent, so selection is independent of input order.
fn better_cover(best: &MediaAttachment, candidate: &MediaAttachment) -> bool {
  let best_score = best.is_primary as u8;
  let candidate_score = candidate.is_primary as u8;
  candidate_score > best_score
    || (candidate_score == best_score && candidate.sort_order < best.sort_order)
}

/// Group a flat batch of attachment rows by event id, selecting one cover
/// per event and sorting each gallery by `(sort_order asc, primary first)`.
pub fn group_attachments(rows: Vec<MediaAttachment>) -> HashMap<i64, MediaGroup> {
  let mut groups: HashMap<i64, MediaGroup> = HashMap::new();

  for row in rows {
    let group = groups.entry(row.event_id).or_default();
    if row.role == MediaRole::Cover {
      match &group.cover {
        Some(best) if !better_cover(best, &row) => {}
        _ => group.cover = Some(row),
      }
    } else {
      group.gallery.push(row);
    }
  }

  for group in groups.values_mut() {
    group
      .gallery
      .sort_by_key(|a| (a.sort_order, !a.is_primary));
  }

  groups
}

#[cfg(test)]
mod tests {
  use super::*;

  fn attachment(event_id: i64, role: MediaRole, is_primary: bool, sort_order: i64) -> MediaAttachment {
    MediaAttachment {
      id: sort_order * 10 + is_primary as i64,
      media_id: Uuid::new_v4(),
      event_id,
      role,
      is_primary,
      sort_order,
      title: None,
      caption: None,
      alt_text: None,
      bucket: None,
      path: None,
      mime_type: None,
      checksum: None,
      public_url: None,
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
  fn role_round_trip() {
    for role in [MediaRole::Cover, MediaRole::Gallery, MediaRole::Attachment] {
      assert_eq!(MediaRole::parse(role.as_str()).unwrap(), role);
    }
    assert!(MediaRole::parse("thumbnail").is_err());
  }

  #[test]
  fn display_url_prefers_public_then_preview_then_source() {
    let mut a = attachment(1, MediaRole::Gallery, false, 0);
    a.public_url = Some("pub".into());
    a.preview_url = Some("prev".into());
    a.source_url = Some("src".into());
    assert_eq!(display_url(&a), Some("pub"));

    a.public_url = None;
    assert_eq!(display_url(&a), Some("prev"));

    a.preview_url = Some(String::new());
    assert_eq!(display_url(&a), Some("src"));

    a.source_url = None;
    assert_eq!(display_url(&a), None);
  }

  #[test]
  fn cover_selection_is_order_independent() {
    // Expected winner: primary with the lowest sort order (id 31).
    let candidates = [
      attachment(7, MediaRole::Cover, false, 0),
      attachment(7, MediaRole::Cover, true, 3),
      attachment(7, MediaRole::Cover, true, 5),
      attachment(7, MediaRole::Cover, false, 1),
    ];

    // Check every rotation of the input; a full permutation sweep adds
    // nothing over the pairwise comparisons these already cover.
    for shift in 0..candidates.len() {
      let mut rows: Vec<_> = candidates.to_vec();
      rows.rotate_left(shift);
      let groups = group_attachments(rows);
      let cover = groups[&7].cover.as_ref().unwrap();
      assert!(cover.is_primary, "shift {shift}");
      assert_eq!(cover.sort_order, 3, "shift {shift}");
    }
  }

  #[test]
  fn non_primary_cover_wins_only_on_lower_sort_order() {
    let rows = vec![
      attachment(1, MediaRole::Cover, false, 4),
      attachment(1, MediaRole::Cover, false, 2),
    ];
    let groups = group_attachments(rows);
    assert_eq!(groups[&1].cover.as_ref().unwrap().sort_order, 2);
  }

  #[test]
  fn event_without_cover_role_gets_none() {
    let rows = vec![attachment(1, MediaRole::Gallery, true, 0)];
    let groups = group_attachments(rows);
    assert!(groups[&1].cover.is_none());
    assert_eq!(groups[&1].gallery.len(), 1);
  }

  #[test]
  fn gallery_sorted_by_sort_order_then_primary_first() {
    let rows = vec![
      attachment(1, MediaRole::Attachment, false, 2),
      attachment(1, MediaRole::Gallery, false, 1),
      attachment(1, MediaRole::Gallery, true, 1),
      attachment(1, MediaRole::Attachment, true, 0),
    ];
    let groups = group_attachments(rows);
    let order: Vec<(i64, bool)> = groups[&1]
      .gallery
      .iter()
      .map(|a| (a.sort_order, a.is_primary))
      .collect();
    assert_eq!(order, vec![(0, true), (1, true), (1, false), (2, false)]);
  }

  #[test]
  fn gallery_sort_is_permutation_invariant() {
    let base = vec![
      attachment(1, MediaRole::Gallery, true, 1),
      attachment(1, MediaRole::Gallery, false, 0),
      attachment(1, MediaRole::Attachment, false, 3),
      attachment(1, MediaRole::Attachment, true, 0),
    ];
    let reference: Vec<i64> = group_attachments(base.clone())[&1]
      .gallery
      .iter()
      .map(|a| a.id)
      .collect();

    for shift in 1..base.len() {
      let mut rows = base.clone();
      rows.rotate_left(shift);
      let ids: Vec<i64> = group_attachments(rows)[&1]
        .gallery
        .iter()
        .map(|a| a.id)
        .collect();
      assert_eq!(ids, reference, "shift {shift}");
    }
  }

  #[test]
  fn rows_are_grouped_per_event() {
    let rows = vec![
      attachment(1, MediaRole::Cover, true, 0),
      attachment(2, MediaRole::Gallery, false, 0),
      attachment(1, MediaRole::Gallery, false, 1),
    ];
    let groups = group_attachments(rows);
    assert_eq!(groups.len(), 2);
    assert!(groups[&1].cover.is_some());
    assert_eq!(groups[&1].gallery.len(), 1);
    assert!(groups[&2].cover.is_none());
  }
}
