mod book;
mod follow;
mod reaction;
mod review;
mod user;
mod user_book;
mod user_stats;

pub use book::*;
pub use follow::*;
pub use reaction::*;
pub use review::*;
pub use user::*;
pub use user_book::*;
pub use user_stats::*;
