use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::{
  id::{marker::BookMarker, Id},
  validation::is_not_blank,
};

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreateReview {
  pub book_id: Id<BookMarker>,
  #[validate(
    length(min = 1, max = 10000),
    with = "is_not_blank",
    error = "Review must not be blank or longer than 10000 characters"
  )]
  pub content: String,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct UpdateReview {
  #[validate(
    length(min = 1, max = 10000),
    with = "is_not_blank",
    error = "Review must not be blank or longer than 10000 characters"
  )]
  pub content: String,
}
