use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

use crate::{
  database::{Connection, ErrorExt, Result},
  types::{
    form::{reviews::CreateReview, Pagination},
    id::{
      marker::{BookMarker, ReviewMarker, UserMarker},
      Id,
    },
  },
};

#[derive(Debug, FromRow, PartialEq, Eq, Serialize)]
pub struct Review {
  pub id: Id<ReviewMarker>,
  pub user_id: Id<UserMarker>,
  pub book_id: Id<BookMarker>,
  pub content: String,
  pub created_at: NaiveDateTime,
  pub updated_at: NaiveDateTime,
}

impl Review {
  #[tracing::instrument(skip(conn))]
  pub async fn by_id(conn: &mut Connection, id: Id<ReviewMarker>) -> Result<Option<Self>> {
    sqlx::query_as::<_, Self>(r#"SELECT * FROM "reviews" WHERE id = $1"#)
      .bind(id)
      .fetch_optional(conn)
      .await
      .into_db_error()
  }

  #[tracing::instrument(skip(conn))]
  pub async fn list(conn: &mut Connection, page: Pagination) -> Result<Vec<Self>> {
    sqlx::query_as::<_, Self>(r#"SELECT * FROM "reviews" ORDER BY id OFFSET $1 LIMIT $2"#)
      .bind(page.offset())
      .bind(page.limit())
      .fetch_all(conn)
      .await
      .into_db_error()
  }

  /// Fails with a foreign key violation if either the author or
  /// the book does not exist.
  #[tracing::instrument(skip(conn, form), fields(book_id = %form.book_id))]
  pub async fn create(
    conn: &mut Connection,
    author: Id<UserMarker>,
    form: &CreateReview,
  ) -> Result<Self> {
    sqlx::query_as::<_, Self>(
      r#"INSERT INTO "reviews" (user_id, book_id, content)
      VALUES ($1, $2, $3)
      RETURNING *"#,
    )
    .bind(author)
    .bind(form.book_id)
    .bind(&form.content)
    .fetch_one(conn)
    .await
    .into_db_error()
  }

  /// Rewrites the content of a review written by `author`. Reviews
  /// of other users are left alone and yield `None`.
  #[tracing::instrument(skip(conn, content))]
  pub async fn update_content(
    conn: &mut Connection,
    id: Id<ReviewMarker>,
    author: Id<UserMarker>,
    content: &str,
  ) -> Result<Option<Self>> {
    sqlx::query_as::<_, Self>(
      r#"UPDATE "reviews"
      SET content = $3, updated_at = (now() AT TIME ZONE 'utc')
      WHERE id = $1 AND user_id = $2
      RETURNING *"#,
    )
    .bind(id)
    .bind(author)
    .bind(content)
    .fetch_optional(conn)
    .await
    .into_db_error()
  }

  #[tracing::instrument(skip(conn))]
  pub async fn search(conn: &mut Connection, pattern: &str, page: Pagination) -> Result<Vec<Self>> {
    sqlx::query_as::<_, Self>(
      r#"SELECT * FROM "reviews"
      WHERE content ILIKE $1
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
}
