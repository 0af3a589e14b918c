use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

use crate::{
  database::{Connection, ErrorExt, Result},
  types::{
    form::{users::CreateUser, users::UserPatch, Pagination},
    id::{marker::UserMarker, Id},
  },
};

#[derive(Debug, FromRow, PartialEq, Eq, Serialize)]
pub struct User {
  pub id: Id<UserMarker>,
  pub name: String,
  pub email: String,
  pub bio: Option<String>,
  pub profile_image_url: Option<String>,
  pub created_at: NaiveDateTime,
  pub updated_at: NaiveDateTime,
}

impl User {
  #[tracing::instrument(skip(conn))]
  pub async fn by_id(conn: &mut Connection, id: Id<UserMarker>) -> Result<Option<Self>> {
    sqlx::query_as::<_, Self>(r#"SELECT * FROM "users" WHERE id = $1"#)
      .bind(id)
      .fetch_optional(conn)
      .await
      .into_db_error()
  }

  #[tracing::instrument(skip(conn))]
  pub async fn list(conn: &mut Connection, page: Pagination) -> Result<Vec<Self>> {
    sqlx::query_as::<_, Self>(r#"SELECT * FROM "users" ORDER BY id OFFSET $1 LIMIT $2"#)
      .bind(page.offset())
      .bind(page.limit())
      .fetch_all(conn)
      .await
      .into_db_error()
  }

  /// Returns `None` if the e-mail address is already registered.
  #[tracing::instrument(skip_all)]
  pub async fn create(conn: &mut Connection, form: &CreateUser) -> Result<Option<Self>> {
    sqlx::query_as::<_, Self>(
      r#"INSERT INTO "users" (name, email, bio, profile_image_url)
      VALUES ($1, $2, $3, $4)
      ON CONFLICT (email) DO NOTHING
      RETURNING *"#,
    )
    .bind(form.name.trim())
    .bind(&form.email)
    .bind(form.bio.as_deref())
    .bind(form.profile_image_url.as_deref())
    .fetch_optional(conn)
    .await
    .into_db_error()
  }

  /// Writes the fields present in the patch and bumps `updated_at`.
  /// Returns `None` if there is no such user.
  #[tracing::instrument(skip(conn, patch))]
  pub async fn update(
    conn: &mut Connection,
    id: Id<UserMarker>,
    patch: &UserPatch,
  ) -> Result<Option<Self>> {
    let mut query = sqlx::QueryBuilder::<sqlx::Postgres>::new(
      r#"UPDATE "users" SET updated_at = (now() AT TIME ZONE 'utc')"#,
    );
    if let Some(name) = patch.name.as_deref() {
      query.push(", name = ").push_bind(name.trim());
    }
    if let Some(bio) = patch.bio.as_ref() {
      query.push(", bio = ").push_bind(bio.as_deref());
    }
    if let Some(url) = patch.profile_image_url.as_ref() {
      query.push(", profile_image_url = ").push_bind(url.as_deref());
    }
    query.push(" WHERE id = ").push_bind(id).push(" RETURNING *");

    query
      .build_query_as::<Self>()
      .fetch_optional(conn)
      .await
      .into_db_error()
  }

  /// Users following `id`.
  #[tracing::instrument(skip(conn))]
  pub async fn followers(
    conn: &mut Connection,
    id: Id<UserMarker>,
    page: Pagination,
  ) -> Result<Vec<Self>> {
    sqlx::query_as::<_, Self>(
      r#"SELECT u.* FROM "users" u
      JOIN "follows" f ON f.follower_id = u.id
      WHERE f.following_id = $1
      ORDER BY f.id
      OFFSET $2 LIMIT $3"#,
    )
    .bind(id)
    .bind(page.offset())
    .bind(page.limit())
    .fetch_all(conn)
    .await
    .into_db_error()
  }

  /// Users that `id` follows.
  #[tracing::instrument(skip(conn))]
  pub async fn following(
    conn: &mut Connection,
    id: Id<UserMarker>,
    page: Pagination,
  ) -> Result<Vec<Self>> {
    sqlx::query_as::<_, Self>(
      r#"SELECT u.* FROM "users" u
      JOIN "follows" f ON f.following_id = u.id
      WHERE f.follower_id = $1
      ORDER BY f.id
      OFFSET $2 LIMIT $3"#,
    )
    .bind(id)
    .bind(page.offset())
    .bind(page.limit())
    .fetch_all(conn)
    .await
    .into_db_error()
  }
}
