use chrono::{NaiveDateTime, Utc};
use error_stack::ResultExt;
use serde::Serialize;
use sqlx::FromRow;

use crate::{
  database::{Connection, ErrorExt, Pool, Result},
  stats,
  types::id::{marker::UserMarker, Id},
};

/// Denormalized activity counters of a user.
///
/// Rows are created lazily and only ever overwritten by
/// [`stats::recompute`], so they may lag behind the tables they
/// summarize until the next recomputation.
#[derive(Debug, Clone, FromRow, PartialEq, Eq, Serialize)]
pub struct UserStats {
  pub user_id: Id<UserMarker>,
  pub books_count: i64,
  pub reviews_count: i64,
  pub following_count: i64,
  pub followers_count: i64,
  pub received_goods_count: i64,
  pub received_bads_count: i64,
  pub calculated_at: NaiveDateTime,
}

impl UserStats {
  /// All counters at zero, not persisted yet.
  #[must_use]
  pub fn empty(user_id: Id<UserMarker>) -> Self {
    Self {
      user_id,
      books_count: 0,
      reviews_count: 0,
      following_count: 0,
      followers_count: 0,
      received_goods_count: 0,
      received_bads_count: 0,
      calculated_at: Utc::now().naive_utc(),
    }
  }

  #[tracing::instrument(skip(conn))]
  pub async fn by_user_id(conn: &mut Connection, user_id: Id<UserMarker>) -> Result<Option<Self>> {
    sqlx::query_as::<_, Self>(r#"SELECT * FROM "user_stats" WHERE user_id = $1"#)
      .bind(user_id)
      .fetch_optional(conn)
      .await
      .into_db_error()
  }

  /// Inserts the row or overwrites every column of the existing one.
  #[tracing::instrument(skip(self, conn), fields(user_id = %self.user_id))]
  pub async fn upsert(&self, conn: &mut Connection) -> Result<Self> {
    sqlx::query_as::<_, Self>(
      r#"INSERT INTO "user_stats" (
        user_id, books_count, reviews_count, following_count,
        followers_count, received_goods_count, received_bads_count,
        calculated_at
      )
      VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
      ON CONFLICT (user_id) DO UPDATE SET
        books_count = EXCLUDED.books_count,
        reviews_count = EXCLUDED.reviews_count,
        following_count = EXCLUDED.following_count,
        followers_count = EXCLUDED.followers_count,
        received_goods_count = EXCLUDED.received_goods_count,
        received_bads_count = EXCLUDED.received_bads_count,
        calculated_at = EXCLUDED.calculated_at
      RETURNING *"#,
    )
    .bind(self.user_id)
    .bind(self.books_count)
    .bind(self.reviews_count)
    .bind(self.following_count)
    .bind(self.followers_count)
    .bind(self.received_goods_count)
    .bind(self.received_bads_count)
    .bind(self.calculated_at)
    .fetch_one(conn)
    .await
    .into_db_error()
  }

  /// Recomputes the counters of a user from one consistent snapshot
  /// and commits them. Nothing is written if any step fails.
  #[tracing::instrument(skip(pool))]
  pub async fn recompute(pool: &Pool, user_id: Id<UserMarker>) -> Result<Self> {
    let mut transaction = pool.begin().await?;
    sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ")
      .execute(&mut *transaction)
      .await
      .into_db_error()?;

    let stats = stats::recompute(&mut *transaction, user_id).await?;
    transaction
      .commit()
      .await
      .into_db_error()
      .attach_printable_lazy(|| format!("could not commit stats of user {user_id}"))?;

    Ok(stats)
  }
}
