use serde::Deserialize;
use validator::Validate;

/// `?skip=&limit=` query parameters shared by every listing endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Validate)]
pub struct Pagination {
  #[serde(default)]
  pub skip: u32,
  #[serde(default = "Pagination::default_limit")]
  #[validate(ranges(min = 1, max = 100), error = "Limit must be between 1 and 100")]
  pub limit: u32,
}

impl Pagination {
  pub const DEFAULT_LIMIT: u32 = 100;
  pub const MAX_LIMIT: u32 = 100;

  const fn default_limit() -> u32 {
    Self::DEFAULT_LIMIT
  }

  #[must_use]
  pub fn offset(&self) -> i64 {
    i64::from(self.skip)
  }

  #[must_use]
  pub fn limit(&self) -> i64 {
    i64::from(self.limit)
  }
}

impl Default for Pagination {
  fn default() -> Self {
    Self {
      skip: 0,
      limit: Self::DEFAULT_LIMIT,
    }
  }
}
