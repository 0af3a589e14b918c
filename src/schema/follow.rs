use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

use crate::{
  database::{Connection, ErrorExt, Result},
  types::id::{
    marker::{FollowMarker, UserMarker},
    Id,
  },
};

#[derive(Debug, FromRow, PartialEq, Eq, Serialize)]
pub struct Follow {
  pub id: Id<FollowMarker>,
  pub follower_id: Id<UserMarker>,
  pub following_id: Id<UserMarker>,
  pub created_at: NaiveDateTime,
}

impl Follow {
  /// Returns `None` if `follower_id` already follows `following_id`.
  #[tracing::instrument(skip(conn))]
  pub async fn create(
    conn: &mut Connection,
    follower_id: Id<UserMarker>,
    following_id: Id<UserMarker>,
  ) -> Result<Option<Self>> {
    sqlx::query_as::<_, Self>(
      r#"INSERT INTO "follows" (follower_id, following_id)
      VALUES ($1, $2)
      ON CONFLICT (follower_id, following_id) DO NOTHING
      RETURNING *"#,
    )
    .bind(follower_id)
    .bind(following_id)
    .fetch_optional(conn)
    .await
    .into_db_error()
  }

  #[tracing::instrument(skip(conn))]
  pub async fn delete(
    conn: &mut Connection,
    follower_id: Id<UserMarker>,
    following_id: Id<UserMarker>,
  ) -> Result<Option<Self>> {
    sqlx::query_as::<_, Self>(
      r#"DELETE FROM "follows"
      WHERE follower_id = $1 AND following_id = $2
      RETURNING *"#,
    )
    .bind(follower_id)
    .bind(following_id)
    .fetch_optional(conn)
    .await
    .into_db_error()
  }
}
