//! Language selection and localization fallback.
//!
//! Every localized field in the store is a (primary = Italian,
//! secondary = English) pair of nullable columns. Resolution prefers the
//! requested language and falls back to the other variant when the
//! preferred one is absent.

use serde::Serialize;

/// The requested response language.
///
/// Parsed case-insensitively; anything other than `"it"` resolves as
/// English, and a missing parameter defaults to Italian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
  #[default]
  It,
  En,
}

impl Lang {
  pub fn parse(code: Option<&str>) -> Lang {
    match code {
      None => Lang::It,
      Some(c) if c.eq_ignore_ascii_case("it") => Lang::It,
      Some(_) => Lang::En,
    }
  }

  /// Resolve one localized field pair: the requested variant wins, the
  /// other is the fallback. `None` only when both variants are absent.
  pub fn pick(self, it: Option<&str>, en: Option<&str>) -> Option<String> {
    let resolved = match self {
      Lang::It => it.or(en),
      Lang::En => en.or(it),
    };
    resolved.map(str::to_owned)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_is_case_insensitive_and_defaults_to_italian() {
    assert_eq!(Lang::parse(Some("it")), Lang::It);
    assert_eq!(Lang::parse(Some("IT")), Lang::It);
    assert_eq!(Lang::parse(Some("It")), Lang::It);
    assert_eq!(Lang::parse(Some("en")), Lang::En);
    assert_eq!(Lang::parse(Some("fr")), Lang::En);
    assert_eq!(Lang::parse(None), Lang::It);
  }

  #[test]
  fn pick_prefers_requested_language() {
    assert_eq!(Lang::It.pick(Some("ciao"), Some("hello")), Some("ciao".into()));
    assert_eq!(Lang::En.pick(Some("ciao"), Some("hello")), Some("hello".into()));
  }

  #[test]
  fn pick_falls_back_when_preferred_variant_is_absent() {
    assert_eq!(Lang::It.pick(None, Some("hello")), Some("hello".into()));
    assert_eq!(Lang::En.pick(Some("ciao"), None), Some("ciao".into()));
  }

  #[test]
  fn pick_returns_none_when_both_variants_are_absent() {
    assert_eq!(Lang::It.pick(None, None), None);
    assert_eq!(Lang::En.pick(None, None), None);
  }
}
