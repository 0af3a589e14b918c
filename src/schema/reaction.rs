use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::{
  database::{Connection, ErrorExt, Result},
  types::id::{
    marker::{ReactionMarker, ReviewMarker, UserMarker},
    Id,
  },
};

/// Verdict of a reader on a review, stored as the `reaction_type`
/// Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "reaction_type", rename_all = "lowercase")]
pub enum ReactionType {
  Good,
  Bad,
}

#[derive(Debug, FromRow, PartialEq, Eq, Serialize)]
pub struct ReviewReaction {
  pub id: Id<ReactionMarker>,
  pub user_id: Id<UserMarker>,
  pub review_id: Id<ReviewMarker>,
  pub reaction_type: ReactionType,
  pub created_at: NaiveDateTime,
}

impl ReviewReaction {
  /// Returns `None` if the user already reacted to the review.
  #[tracing::instrument(skip(conn))]
  pub async fn create(
    conn: &mut Connection,
    user_id: Id<UserMarker>,
    review_id: Id<ReviewMarker>,
    reaction_type: ReactionType,
  ) -> Result<Option<Self>> {
    sqlx::query_as::<_, Self>(
      r#"INSERT INTO "review_reactions" (user_id, review_id, reaction_type)
      VALUES ($1, $2, $3)
      ON CONFLICT (user_id, review_id) DO NOTHING
      RETURNING *"#,
    )
    .bind(user_id)
    .bind(review_id)
    .bind(reaction_type)
    .fetch_optional(conn)
    .await
    .into_db_error()
  }

  /// Removes the reaction of `user_id` on a review, returning it.
  #[tracing::instrument(skip(conn))]
  pub async fn delete(
    conn: &mut Connection,
    user_id: Id<UserMarker>,
    review_id: Id<ReviewMarker>,
  ) -> Result<Option<Self>> {
    sqlx::query_as::<_, Self>(
      r#"DELETE FROM "review_reactions"
      WHERE user_id = $1 AND review_id = $2
      RETURNING *"#,
    )
    .bind(user_id)
    .bind(review_id)
    .fetch_optional(conn)
    .await
    .into_db_error()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_test::Token;

  #[test]
  fn test_reaction_type_serde() {
    serde_test::assert_tokens(
      &ReactionType::Good,
      &[Token::UnitVariant {
        name: "ReactionType",
        variant: "good",
      }],
    );
    serde_test::assert_tokens(
      &ReactionType::Bad,
      &[Token::UnitVariant {
        name: "ReactionType",
        variant: "bad",
      }],
    );
  }
}
