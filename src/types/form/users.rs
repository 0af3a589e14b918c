use serde::{Deserialize, Serialize};
use validator::{Validate, ValidateError};

use crate::types::validation::{
  check_required_text, check_url, is_not_blank, is_valid_email, BIO_MAX, NAME_MAX,
};

const INVALID_NAME: &str = "Name must not be blank or longer than 100 characters";
const INVALID_BIO: &str = "Bio must not be blank or longer than 1000 characters";

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreateUser {
  #[validate(
    length(min = 1, max = 100),
    with = "is_not_blank",
    error = "Name must not be blank or longer than 100 characters"
  )]
  pub name: String,
  #[validate(with = "is_valid_email", error = "Invalid e-mail address")]
  pub email: String,
  #[validate(
    length(min = 1, max = 1000),
    with = "is_not_blank",
    error = "Bio must not be blank or longer than 1000 characters",
    optional
  )]
  pub bio: Option<String>,
  #[validate(
    length(max = 2048),
    with = "validator::extras::validate_http_url",
    error = "Invalid URL",
    optional
  )]
  pub profile_image_url: Option<String>,
}

/// Fields of a user profile that can be overwritten.
///
/// A missing field is left untouched while an explicit `null`
/// clears the optional ones.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UserPatch {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  #[serde(
    default,
    deserialize_with = "crate::util::double_option",
    skip_serializing_if = "Option::is_none"
  )]
  pub bio: Option<Option<String>>,
  #[serde(
    default,
    deserialize_with = "crate::util::double_option",
    skip_serializing_if = "Option::is_none"
  )]
  pub profile_image_url: Option<Option<String>>,
}

// Validated by hand: an explicit `null` is a valid value for the
// nullable fields, which the derive has no notion of.
impl Validate for UserPatch {
  fn validate(&self) -> Result<(), ValidateError> {
    let mut fields = ValidateError::field_builder();
    if let Some(name) = self.name.as_deref() {
      fields.insert("name", check_required_text(name, NAME_MAX, INVALID_NAME));
    }
    if let Some(Some(bio)) = self.bio.as_ref() {
      fields.insert("bio", check_required_text(bio, BIO_MAX, INVALID_BIO));
    }
    if let Some(Some(url)) = self.profile_image_url.as_ref() {
      fields.insert("profile_image_url", check_url(url));
    }
    fields.build().into_result()
  }
}
