//! Recalculation of the per-user activity counters kept in
//! [`UserStats`].
//!
//! The algorithm only talks to a [`StatsStore`], so it reads the same
//! whether it runs against a Postgres transaction or anything else
//! that can count rows.
use chrono::Utc;

use crate::{
  database::Result,
  schema::{ReactionType, UserStats},
  types::id::{marker::UserMarker, Id},
};

mod activity;
mod postgres;

pub use activity::Activity;

/// Row counting and stats persistence needed by [`recompute`].
///
/// Every count filters on a single user and must come from the same
/// snapshot as the others for the result to be consistent.
#[allow(async_fn_in_trait)]
pub trait StatsStore {
  async fn find_stats(&mut self, user_id: Id<UserMarker>) -> Result<Option<UserStats>>;

  /// Entries in the personal library of the user.
  async fn count_library_books(&mut self, user_id: Id<UserMarker>) -> Result<i64>;

  /// Reviews written by the user.
  async fn count_reviews(&mut self, user_id: Id<UserMarker>) -> Result<i64>;

  /// Users followed by the user.
  async fn count_following(&mut self, user_id: Id<UserMarker>) -> Result<i64>;

  /// Users following the user.
  async fn count_followers(&mut self, user_id: Id<UserMarker>) -> Result<i64>;

  /// Reactions of the given type left by anyone on reviews written
  /// by the user.
  async fn count_received_reactions(
    &mut self,
    user_id: Id<UserMarker>,
    reaction_type: ReactionType,
  ) -> Result<i64>;

  /// Inserts or overwrites the stats row of `stats.user_id`.
  async fn save_stats(&mut self, stats: &UserStats) -> Result<UserStats>;
}

/// Recounts every counter of a user from scratch and saves them.
///
/// The user itself is not looked up. A user without any activity
/// (or without a row at all) gets zeroes, and it is up to the store
/// to refuse saving stats of someone who does not exist.
#[tracing::instrument(skip(store))]
pub async fn recompute<S: StatsStore>(store: &mut S, user_id: Id<UserMarker>) -> Result<UserStats> {
  let mut stats = store
    .find_stats(user_id)
    .await?
    .unwrap_or_else(|| UserStats::empty(user_id));

  stats.books_count = store.count_library_books(user_id).await?;
  stats.reviews_count = store.count_reviews(user_id).await?;
  stats.following_count = store.count_following(user_id).await?;
  stats.followers_count = store.count_followers(user_id).await?;
  stats.received_goods_count = store
    .count_received_reactions(user_id, ReactionType::Good)
    .await?;
  stats.received_bads_count = store
    .count_received_reactions(user_id, ReactionType::Bad)
    .await?;
  stats.calculated_at = Utc::now().naive_utc();

  let stats = store.save_stats(&stats).await?;
  tracing::debug!(?stats, "recomputed user stats");

  Ok(stats)
}

#[cfg(test)]
#[allow(clippy::cast_possible_wrap)]
mod tests {
  use super::*;
  use crate::database::Error;
  use error_stack::Report;
  use std::collections::HashMap;

  type UserId = Id<UserMarker>;

  struct Review {
    id: u64,
    author: UserId,
  }

  #[derive(Default)]
  struct MemoryStore {
    stats: HashMap<UserId, UserStats>,
    library: Vec<(UserId, u64, bool)>,
    reviews: Vec<Review>,
    follows: Vec<(UserId, UserId)>,
    reactions: Vec<(UserId, u64, ReactionType)>,
    reject_saves: bool,
  }

  impl MemoryStore {
    fn add_book(&mut self, user: UserId, book: u64, is_favorite: bool) {
      self.library.push((user, book, is_favorite));
    }

    fn write_review(&mut self, author: UserId) -> u64 {
      let id = self.reviews.len() as u64 + 1;
      self.reviews.push(Review { id, author });
      id
    }

    fn follow(&mut self, follower: UserId, following: UserId) {
      self.follows.push((follower, following));
    }

    fn react(&mut self, user: UserId, review: u64, reaction_type: ReactionType) {
      self.reactions.push((user, review, reaction_type));
    }
  }

  impl StatsStore for MemoryStore {
    async fn find_stats(&mut self, user_id: UserId) -> Result<Option<UserStats>> {
      Ok(self.stats.get(&user_id).cloned())
    }

    async fn count_library_books(&mut self, user_id: UserId) -> Result<i64> {
      Ok(self.library.iter().filter(|(user, ..)| *user == user_id).count() as i64)
    }

    async fn count_reviews(&mut self, user_id: UserId) -> Result<i64> {
      Ok(self.reviews.iter().filter(|r| r.author == user_id).count() as i64)
    }

    async fn count_following(&mut self, user_id: UserId) -> Result<i64> {
      Ok(self.follows.iter().filter(|(from, _)| *from == user_id).count() as i64)
    }

    async fn count_followers(&mut self, user_id: UserId) -> Result<i64> {
      Ok(self.follows.iter().filter(|(_, to)| *to == user_id).count() as i64)
    }

    async fn count_received_reactions(
      &mut self,
      user_id: UserId,
      reaction_type: ReactionType,
    ) -> Result<i64> {
      let count = self
        .reactions
        .iter()
        .filter(|(_, _, kind)| *kind == reaction_type)
        .filter(|(_, review, _)| {
          self
            .reviews
            .iter()
            .any(|r| r.id == *review && r.author == user_id)
        })
        .count();
      Ok(count as i64)
    }

    async fn save_stats(&mut self, stats: &UserStats) -> Result<UserStats> {
      if self.reject_saves {
        return Err(Report::new(Error::UnhealthyPool));
      }
      self.stats.insert(stats.user_id, stats.clone());
      Ok(stats.clone())
    }
  }

  fn user(n: u64) -> UserId {
    Id::new(n)
  }

  fn counts(stats: &UserStats) -> [i64; 6] {
    [
      stats.books_count,
      stats.reviews_count,
      stats.following_count,
      stats.followers_count,
      stats.received_goods_count,
      stats.received_bads_count,
    ]
  }

  #[tokio::test]
  async fn test_no_activity_gives_zeroes() {
    let mut store = MemoryStore::default();
    let stats = recompute(&mut store, user(1)).await.unwrap();
    assert_eq!(counts(&stats), [0; 6]);
    assert_eq!(store.stats.get(&user(1)), Some(&stats));
  }

  #[tokio::test]
  async fn test_reader_scenario() {
    let mut store = MemoryStore::default();
    let reader = user(1);

    store.add_book(reader, 1, true);
    store.add_book(reader, 2, false);
    store.add_book(reader, 3, false);
    store.add_book(reader, 4, false);
    store.add_book(user(2), 1, false);

    let first = store.write_review(reader);
    let second = store.write_review(reader);
    let others = store.write_review(user(2));

    store.follow(reader, user(2));
    store.follow(reader, user(3));
    store.follow(reader, user(4));
    store.follow(user(5), reader);

    store.react(user(2), first, ReactionType::Good);
    store.react(user(3), second, ReactionType::Bad);
    store.react(reader, others, ReactionType::Good);

    let stats = recompute(&mut store, reader).await.unwrap();
    assert_eq!(counts(&stats), [4, 2, 3, 1, 1, 1]);
  }

  #[tokio::test]
  async fn test_recompute_is_idempotent() {
    let mut store = MemoryStore::default();
    store.add_book(user(1), 1, false);
    store.follow(user(2), user(1));

    let first = recompute(&mut store, user(1)).await.unwrap();
    let second = recompute(&mut store, user(1)).await.unwrap();
    assert_eq!(counts(&first), counts(&second));
    assert!(second.calculated_at >= first.calculated_at);
    assert_eq!(store.stats.len(), 1);
  }

  #[tokio::test]
  async fn test_one_more_book_only_moves_books_count() {
    let mut store = MemoryStore::default();
    store.add_book(user(1), 1, false);
    store.write_review(user(1));
    let before = recompute(&mut store, user(1)).await.unwrap();

    store.add_book(user(1), 2, true);
    let after = recompute(&mut store, user(1)).await.unwrap();

    assert_eq!(after.books_count, before.books_count + 1);
    assert_eq!(counts(&after)[1..], counts(&before)[1..]);
  }

  #[tokio::test]
  async fn test_follow_counts_on_both_sides() {
    let mut store = MemoryStore::default();
    store.follow(user(1), user(2));

    let follower = recompute(&mut store, user(1)).await.unwrap();
    let followed = recompute(&mut store, user(2)).await.unwrap();
    assert_eq!((follower.following_count, follower.followers_count), (1, 0));
    assert_eq!((followed.following_count, followed.followers_count), (0, 1));
  }

  #[tokio::test]
  async fn test_reactions_belong_to_review_author() {
    let mut store = MemoryStore::default();
    let review = store.write_review(user(1));
    store.react(user(2), review, ReactionType::Good);

    let author = recompute(&mut store, user(1)).await.unwrap();
    let reactor = recompute(&mut store, user(2)).await.unwrap();
    assert_eq!(author.received_goods_count, 1);
    assert_eq!(reactor.received_goods_count, 0);
    assert_eq!(reactor.received_bads_count, 0);
  }

  #[tokio::test]
  async fn test_failed_save_keeps_previous_row() {
    let mut store = MemoryStore::default();
    let saved = recompute(&mut store, user(1)).await.unwrap();

    store.add_book(user(1), 1, false);
    store.write_review(user(1));
    store.reject_saves = true;

    let error = recompute(&mut store, user(1)).await.unwrap_err();
    assert!(matches!(error.current_context(), Error::UnhealthyPool));
    assert_eq!(store.stats.get(&user(1)), Some(&saved));
  }
}
