use crate::types::id::{marker::UserMarker, Id};

/// A change in the catalog that moves someone's counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
  /// A book entered the library of `reader`.
  BookAdded { reader: Id<UserMarker> },
  ReviewWritten { author: Id<UserMarker> },
  /// `follower` started or stopped following `following`.
  FollowChanged {
    follower: Id<UserMarker>,
    following: Id<UserMarker>,
  },
  /// `reactor` left or took back a reaction on a review of
  /// `review_author`.
  ReactionChanged {
    reactor: Id<UserMarker>,
    review_author: Id<UserMarker>,
  },
}

impl Activity {
  /// Users whose stats are stale after this activity.
  #[must_use]
  pub fn affected_users(self) -> Vec<Id<UserMarker>> {
    match self {
      Activity::BookAdded { reader } => vec![reader],
      Activity::ReviewWritten { author } => vec![author],
      Activity::FollowChanged {
        follower,
        following,
      } => vec![follower, following],
      // received reactions are counted for the author, the reactor
      // keeps the same counts
      Activity::ReactionChanged { review_author, .. } => vec![review_author],
    }
  }
}
