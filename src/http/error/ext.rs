use super::{Error, Result};
use crate::types;

/// Turns a missing row into the matching API error.
pub trait OptionExt<T> {
  fn or_not_found(self, detail: &'static str) -> Result<T>;
  fn or_bad_request(self, detail: &'static str) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
  fn or_not_found(self, detail: &'static str) -> Result<T> {
    self.ok_or_else(|| Error::from_type(types::Error::not_found(detail)))
  }

  fn or_bad_request(self, detail: &'static str) -> Result<T> {
    self.ok_or_else(|| Error::from_type(types::Error::bad_request(detail)))
  }
}

#[cfg(test)]
mod tests {
  // controllers reach the trait through `crate::http`
  use crate::{http::OptionExt, types};

  #[test]
  fn test_option_ext() {
    assert_eq!(Some(3).or_not_found("Book not found").unwrap(), 3);

    let error = None::<u8>.or_not_found("Book not found").unwrap_err();
    assert_eq!(error.as_type(), &types::Error::not_found("Book not found"));

    let error = None::<u8>.or_bad_request("Already following").unwrap_err();
    assert_eq!(error.as_type(), &types::Error::bad_request("Already following"));
  }
}
