use serde::Deserialize;
use validator::Validate;

use crate::types::validation::is_not_blank;

#[derive(Debug, Deserialize, Validate)]
pub struct SearchQuery {
  #[validate(
    length(min = 1, max = 200),
    with = "is_not_blank",
    error = "Search query must not be blank or longer than 200 characters"
  )]
  pub query: String,
}

impl SearchQuery {
  /// Builds a `LIKE`/`ILIKE` pattern matching the query anywhere in
  /// a column. Wildcards typed by the user are matched literally.
  #[must_use]
  pub fn like_pattern(&self) -> String {
    let mut pattern = String::with_capacity(self.query.len() + 2);
    pattern.push('%');
    for c in self.query.trim().chars() {
      if matches!(c, '%' | '_' | '\\') {
        pattern.push('\\');
      }
      pattern.push(c);
    }
    pattern.push('%');
    pattern
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::validation::SEARCH_QUERY_MAX;

  fn query(value: &str) -> SearchQuery {
    SearchQuery {
      query: value.to_string(),
    }
  }

  #[test]
  fn test_like_pattern_escapes_wildcards() {
    assert_eq!(query("python").like_pattern(), "%python%");
    assert_eq!(query(" 100% ").like_pattern(), r"%100\%%");
    assert_eq!(query(r"a_b\c").like_pattern(), r"%a\_b\\c%");
  }

  #[test]
  fn test_validation() {
    assert!(query("データベース").validate().is_ok());
    assert!(query("   ").validate().is_err());
    assert!(query(&"x".repeat(SEARCH_QUERY_MAX + 1)).validate().is_err());
  }
}
