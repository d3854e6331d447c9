//! Lenient query-parameter parsing.
//!
//! Numeric parameters arrive as raw strings and fall back silently when
//! unparseable — a malformed `limit` or `year_start` degrades to its
//! default instead of rejecting the request.

pub fn lenient_i32(value: Option<&str>) -> Option<i32> {
  value.and_then(|s| s.trim().parse().ok())
}

pub fn lenient_u32(value: Option<&str>, default: u32) -> u32 {
  value.and_then(|s| s.trim().parse().ok()).unwrap_or(default)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_signed_years() {
    assert_eq!(lenient_i32(Some("-500")), Some(-500));
    assert_eq!(lenient_i32(Some(" 1969 ")), Some(1969));
  }

  #[test]
  fn malformed_input_falls_back_silently() {
    assert_eq!(lenient_i32(Some("soon")), None);
    assert_eq!(lenient_i32(Some("")), None);
    assert_eq!(lenient_i32(None), None);
    assert_eq!(lenient_u32(Some("abc"), 1000), 1000);
    assert_eq!(lenient_u32(Some("-5"), 0), 0);
    assert_eq!(lenient_u32(None, 1000), 1000);
  }

  #[test]
  fn valid_input_wins_over_the_default() {
    assert_eq!(lenient_u32(Some("25"), 1000), 25);
  }
}
