use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

use crate::{
  database::{Connection, ErrorExt, Result},
  types::{
    form::{books::CreateBook, Pagination},
    id::{
      marker::{BookMarker, UserMarker},
      Id,
    },
  },
};

#[derive(Debug, FromRow, PartialEq, Eq, Serialize)]
pub struct Book {
  pub id: Id<BookMarker>,
  pub name: String,
  pub url: Option<String>,
  pub author: Option<String>,
  pub isbn: Option<String>,
  pub created_at: NaiveDateTime,
}

impl Book {
  #[tracing::instrument(skip(conn))]
  pub async fn by_id(conn: &mut Connection, id: Id<BookMarker>) -> Result<Option<Self>> {
    sqlx::query_as::<_, Self>(r#"SELECT * FROM "books" WHERE id = $1"#)
      .bind(id)
      .fetch_optional(conn)
      .await
      .into_db_error()
  }

  #[tracing::instrument(skip(conn))]
  pub async fn list(conn: &mut Connection, page: Pagination) -> Result<Vec<Self>> {
    sqlx::query_as::<_, Self>(r#"SELECT * FROM "books" ORDER BY id OFFSET $1 LIMIT $2"#)
      .bind(page.offset())
      .bind(page.limit())
      .fetch_all(conn)
      .await
      .into_db_error()
  }

  /// Returns `None` if another book already has the same ISBN,
  /// compared without separators.
  #[tracing::instrument(skip(conn))]
  pub async fn create(conn: &mut Connection, form: &CreateBook) -> Result<Option<Self>> {
    sqlx::query_as::<_, Self>(
      r#"INSERT INTO "books" (name, url, author, isbn)
      VALUES ($1, $2, $3, $4)
      ON CONFLICT (isbn) DO NOTHING
      RETURNING *"#,
    )
    .bind(form.name.trim())
    .bind(form.url.as_deref())
    .bind(form.author.as_deref())
    .bind(form.normalized_isbn())
    .fetch_optional(conn)
    .await
    .into_db_error()
  }

  /// Case-insensitive match of an escaped `ILIKE` pattern against
  /// the name, author and ISBN.
  #[tracing::instrument(skip(conn))]
  pub async fn search(conn: &mut Connection, pattern: &str, page: Pagination) -> Result<Vec<Self>> {
    sqlx::query_as::<_, Self>(
      r#"SELECT * FROM "books"
      WHERE name ILIKE $1 OR author ILIKE $1 OR isbn ILIKE $1
      ORDER BY id
      OFFSET $2 LIMIT $3"#,
    )
    .bind(pattern)
    .bind(page.offset())
    .bind(page.limit())
    .fetch_all(conn)
    .await
    .into_db_error()
  }

  /// Books in the personal library of a user.
  #[tracing::instrument(skip(conn))]
  pub async fn in_library(
    conn: &mut Connection,
    user_id: Id<UserMarker>,
    favorites_only: bool,
    page: Pagination,
  ) -> Result<Vec<Self>> {
    sqlx::query_as::<_, Self>(
      r#"SELECT b.* FROM "books" b
      JOIN "user_books" ub ON ub.book_id = b.id
      WHERE ub.user_id = $1 AND (NOT $2 OR ub.is_favorite)
      ORDER BY ub.id
      OFFSET $3 LIMIT $4"#,
    )
    .bind(user_id)
    .bind(favorites_only)
    .bind(page.offset())
    .bind(page.limit())
    .fetch_all(conn)
    .await
    .into_db_error()
  }
}
