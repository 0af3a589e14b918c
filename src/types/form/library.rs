use serde::{Deserialize, Serialize};

use crate::types::id::{marker::BookMarker, Id};

#[derive(Debug, Deserialize, Serialize)]
pub struct AddBook {
  pub book_id: Id<BookMarker>,
  #[serde(default)]
  pub is_favorite: bool,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SetFavorite {
  pub is_favorite: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct LibraryFilter {
  #[serde(default)]
  pub favorites_only: bool,
}
