use super::StatsStore;
use crate::{
  database::{Connection, ErrorExt, Result},
  schema::{ReactionType, UserStats},
  types::id::{marker::UserMarker, Id},
};

async fn count_by_user(
  conn: &mut Connection,
  sql: &'static str,
  user_id: Id<UserMarker>,
) -> Result<i64> {
  sqlx::query_scalar::<_, i64>(sql)
    .bind(user_id)
    .fetch_one(conn)
    .await
    .into_db_error()
}

impl StatsStore for Connection {
  async fn find_stats(&mut self, user_id: Id<UserMarker>) -> Result<Option<UserStats>> {
    UserStats::by_user_id(self, user_id).await
  }

  async fn count_library_books(&mut self, user_id: Id<UserMarker>) -> Result<i64> {
    count_by_user(
      self,
      r#"SELECT COUNT(*) FROM "user_books" WHERE user_id = $1"#,
      user_id,
    )
    .await
  }

  async fn count_reviews(&mut self, user_id: Id<UserMarker>) -> Result<i64> {
    count_by_user(
      self,
      r#"SELECT COUNT(*) FROM "reviews" WHERE user_id = $1"#,
      user_id,
    )
    .await
  }

  async fn count_following(&mut self, user_id: Id<UserMarker>) -> Result<i64> {
    count_by_user(
      self,
      r#"SELECT COUNT(*) FROM "follows" WHERE follower_id = $1"#,
      user_id,
    )
    .await
  }

  async fn count_followers(&mut self, user_id: Id<UserMarker>) -> Result<i64> {
    count_by_user(
      self,
      r#"SELECT COUNT(*) FROM "follows" WHERE following_id = $1"#,
      user_id,
    )
    .await
  }

  async fn count_received_reactions(
    &mut self,
    user_id: Id<UserMarker>,
    reaction_type: ReactionType,
  ) -> Result<i64> {
    sqlx::query_scalar::<_, i64>(
      r#"SELECT COUNT(*) FROM "review_reactions" rr
      JOIN "reviews" r ON r.id = rr.review_id
      WHERE r.user_id = $1 AND rr.reaction_type = $2"#,
    )
    .bind(user_id)
    .bind(reaction_type)
    .fetch_one(self)
    .await
    .into_db_error()
  }

  async fn save_stats(&mut self, stats: &UserStats) -> Result<UserStats> {
    stats.upsert(self).await
  }
}
