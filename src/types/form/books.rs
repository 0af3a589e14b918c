use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::validation::{is_not_blank, is_valid_isbn, normalize_isbn};

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreateBook {
  #[validate(
    length(min = 1, max = 100),
    with = "is_not_blank",
    error = "Name must not be blank or longer than 100 characters"
  )]
  pub name: String,
  #[validate(
    length(max = 2048),
    with = "validator::extras::validate_http_url",
    error = "Invalid URL",
    optional
  )]
  pub url: Option<String>,
  #[validate(
    length(min = 1, max = 200),
    with = "is_not_blank",
    error = "Author must not be blank or longer than 200 characters",
    optional
  )]
  pub author: Option<String>,
  #[validate(with = "is_valid_isbn", error = "Invalid ISBN", optional)]
  pub isbn: Option<String>,
}

impl CreateBook {
  /// ISBN in the form it is stored and compared in.
  #[must_use]
  pub fn normalized_isbn(&self) -> Option<String> {
    self.isbn.as_deref().map(normalize_isbn)
  }
}
