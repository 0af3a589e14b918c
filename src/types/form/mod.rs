pub mod books;
pub mod library;
pub mod pagination;
pub mod reactions;
pub mod reviews;
pub mod search;
pub mod users;

pub use pagination::Pagination;
