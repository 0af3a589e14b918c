use serde::{Deserialize, Serialize};

use crate::schema::ReactionType;

#[derive(Debug, Deserialize, Serialize)]
pub struct CreateReaction {
  pub reaction_type: ReactionType,
}
