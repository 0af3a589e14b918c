use once_cell::sync::Lazy;
use regex::Regex;
use validator::{extras::validate_length, ValidateError};

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
  #[allow(clippy::unwrap_used)]
  Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9-]+(?:\.[a-zA-Z0-9-]+)*$").unwrap()
});

// ISBN-10 or ISBN-13, hyphens and spaces are allowed between digit groups
static ISBN_REGEX: Lazy<Regex> = Lazy::new(|| {
  #[allow(clippy::unwrap_used)]
  Regex::new(r"^(?:\d[\- ]?){9}[\dXx]$|^(?:\d[\- ]?){12}\d$").unwrap()
});

pub const EMAIL_MAX: usize = 254;
pub const NAME_MAX: usize = 100;
pub const BIO_MAX: usize = 1000;
pub const URL_MAX: usize = 2048;
pub const AUTHOR_MAX: usize = 200;
pub const REVIEW_MAX: usize = 10_000;
pub const SEARCH_QUERY_MAX: usize = 200;

pub fn is_valid_email(email: &str) -> bool {
  EMAIL_REGEX.is_match(email) && email.len() <= EMAIL_MAX
}

pub fn is_valid_isbn(isbn: &str) -> bool {
  ISBN_REGEX.is_match(isbn)
}

/// Drops the separators of a valid ISBN so every spelling of the
/// same number is stored the same way.
pub fn normalize_isbn(isbn: &str) -> String {
  isbn
    .chars()
    .filter(|c| !matches!(c, '-' | ' '))
    .map(|c| c.to_ascii_uppercase())
    .collect()
}

pub fn is_not_blank(value: &str) -> bool {
  !value.trim().is_empty()
}

/// Same rule as the derived `length(min = 1, max = ...)` and
/// `with = "is_not_blank"` checks, for forms that validate by hand.
pub fn check_required_text(value: &str, max: usize, message: &'static str) -> ValidateError {
  let mut msg = ValidateError::msg_builder();
  if !validate_length(value, Some(1), Some(max), None) || !is_not_blank(value) {
    msg.insert(message);
  }
  msg.build()
}

pub fn check_url(url: &str) -> ValidateError {
  let mut msg = ValidateError::msg_builder();
  if !validate_length(url, None, Some(URL_MAX), None) || !validator::extras::validate_http_url(url) {
    msg.insert("Invalid URL");
  }
  msg.build()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_is_valid_email() {
    assert!(is_valid_email("reader@example.com"));
    assert!(is_valid_email("first.last+books@mail.example.org"));
    assert!(!is_valid_email("nada_neutho"));
    assert!(!is_valid_email("two@@example.com"));
  }

  #[test]
  fn test_is_valid_isbn() {
    assert!(is_valid_isbn("978-1234567890"));
    assert!(is_valid_isbn("9781234567890"));
    assert!(is_valid_isbn("0-306-40615-2"));
    assert!(is_valid_isbn("080442957X"));
    assert!(!is_valid_isbn("12345"));
    assert!(!is_valid_isbn("isbn-978-123"));
  }

  #[test]
  fn test_normalize_isbn() {
    assert_eq!(normalize_isbn("978-0441013593"), "9780441013593");
    assert_eq!(normalize_isbn("978 0 441 01359 3"), "9780441013593");
    assert_eq!(normalize_isbn("0-8044-2957-x"), "080442957X");

    // a separator between every digit is still a valid ISBN, and
    // fits in the column once normalized
    let spaced = "9-7-8-1-2-3-4-5-6-7-8-9-0";
    assert_eq!(spaced.len(), 25);
    assert!(is_valid_isbn(spaced));
    assert_eq!(normalize_isbn(spaced), "9781234567890");
  }

  #[test]
  fn test_check_required_text() {
    assert!(check_required_text("Dune", NAME_MAX, "Invalid name").is_empty());
    assert!(!check_required_text("", NAME_MAX, "Invalid name").is_empty());
    assert!(!check_required_text("   ", NAME_MAX, "Invalid name").is_empty());
    assert!(!check_required_text(&"a".repeat(NAME_MAX + 1), NAME_MAX, "Invalid name").is_empty());
  }

  #[test]
  fn test_check_url() {
    assert!(check_url("https://example.com/a.png").is_empty());
    assert!(!check_url("javascript:alert(1)").is_empty());
    assert!(!check_url(&format!("https://example.com/{}", "a".repeat(URL_MAX))).is_empty());
  }
}
