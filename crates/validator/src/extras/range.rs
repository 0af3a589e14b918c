/// Checks that a value lies within the inclusive bounds given.
#[must_use]
pub fn validate_range<T: PartialOrd>(value: &T, min: Option<T>, max: Option<T>) -> bool {
  if min.is_some_and(|min| *value < min) {
    return false;
  }
  if max.is_some_and(|max| *value > max) {
    return false;
  }
  true
}
