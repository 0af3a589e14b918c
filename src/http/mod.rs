pub mod controllers;
pub mod current_user;
pub mod error;
pub mod util;

pub use current_user::CurrentUser;
pub use error::{Error, OptionExt, Result};
