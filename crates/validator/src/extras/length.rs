use crate::HasLength;

/// Checks the length (in characters for strings) of a value.
///
/// `equal` takes precedence over `min` and `max` if given.
#[must_use]
pub fn validate_length<T: HasLength + ?Sized>(
  value: &T,
  min: Option<usize>,
  max: Option<usize>,
  equal: Option<usize>,
) -> bool {
  let length = value.length();
  if let Some(equal) = equal {
    return length == equal;
  }
  if min.is_some_and(|min| length < min) {
    return false;
  }
  if max.is_some_and(|max| length > max) {
    return false;
  }
  true
}

#[cfg(test)]
mod tests {
  use super::validate_length;

  #[test]
  fn test_validate_length() {
    assert!(validate_length("Dune", Some(1), Some(10), None));
    assert!(!validate_length("", Some(1), None, None));
    assert!(!validate_length("War and Peace", None, Some(5), None));
    assert!(validate_length("abc", Some(10), None, Some(3)));

    // multi-byte characters count once
    assert!(validate_length("銀河鉄道の夜", None, Some(6), None));
  }
}
