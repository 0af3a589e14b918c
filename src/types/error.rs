use serde::{Deserialize, Serialize};
use std::{borrow::Cow, fmt::Display};

/// Errors exposed to API clients, serialized as JSON objects
/// tagged by their `type` field.
#[derive(Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Error {
  Internal,
  ReadonlyMode,
  InvalidFormBody(validator::ValidateError),
  Unauthorized,
  NotFound { detail: Cow<'static, str> },
  BadRequest { detail: Cow<'static, str> },
}

impl Error {
  #[must_use]
  pub fn not_found(detail: impl Into<Cow<'static, str>>) -> Self {
    Self::NotFound {
      detail: detail.into(),
    }
  }

  #[must_use]
  pub fn bad_request(detail: impl Into<Cow<'static, str>>) -> Self {
    Self::BadRequest {
      detail: detail.into(),
    }
  }
}

impl Display for Error {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Error::Internal => f.write_str("Failed to perform request"),
      Error::ReadonlyMode => f.write_str("Attempt to write read-only database"),
      Error::InvalidFormBody(..) => f.write_str("User performed request with invalid body"),
      Error::Unauthorized => f.write_str("Request requires a current user"),
      Error::NotFound { detail } | Error::BadRequest { detail } => f.write_str(detail),
    }
  }
}
