use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

use crate::{
  database::{Connection, ErrorExt, Result},
  types::id::{
    marker::{BookMarker, UserBookMarker, UserMarker},
    Id,
  },
};

/// A book kept in the personal library of a user.
#[derive(Debug, FromRow, PartialEq, Eq, Serialize)]
pub struct UserBook {
  pub id: Id<UserBookMarker>,
  pub user_id: Id<UserMarker>,
  pub book_id: Id<BookMarker>,
  pub is_favorite: bool,
  pub created_at: NaiveDateTime,
}

impl UserBook {
  /// Returns `None` if the book is already in the library.
  #[tracing::instrument(skip(conn))]
  pub async fn add(
    conn: &mut Connection,
    user_id: Id<UserMarker>,
    book_id: Id<BookMarker>,
    is_favorite: bool,
  ) -> Result<Option<Self>> {
    sqlx::query_as::<_, Self>(
      r#"INSERT INTO "user_books" (user_id, book_id, is_favorite)
      VALUES ($1, $2, $3)
      ON CONFLICT (user_id, book_id) DO NOTHING
      RETURNING *"#,
    )
    .bind(user_id)
    .bind(book_id)
    .bind(is_favorite)
    .fetch_optional(conn)
    .await
    .into_db_error()
  }

  #[tracing::instrument(skip(conn))]
  pub async fn set_favorite(
    conn: &mut Connection,
    user_id: Id<UserMarker>,
    book_id: Id<BookMarker>,
    is_favorite: bool,
  ) -> Result<Option<Self>> {
    sqlx::query_as::<_, Self>(
      r#"UPDATE "user_books" SET is_favorite = $3
      WHERE user_id = $1 AND book_id = $2
      RETURNING *"#,
    )
    .bind(user_id)
    .bind(book_id)
    .bind(is_favorite)
    .fetch_optional(conn)
    .await
    .into_db_error()
  }
}
