#![allow(dead_code)]
use bookshelf::{
  database::Connection,
  schema::{Book, Review, User},
  types::form::{books::CreateBook, reviews::CreateReview, users::CreateUser},
};

pub async fn user(conn: &mut Connection, name: &str) -> User {
  let form = CreateUser {
    name: name.to_string(),
    email: format!("{}@example.com", name.to_lowercase()),
    bio: None,
    profile_image_url: None,
  };
  User::create(conn, &form).await.unwrap().unwrap()
}

pub async fn book(conn: &mut Connection, name: &str, isbn: Option<&str>) -> Book {
  let form = CreateBook {
    name: name.to_string(),
    url: None,
    author: Some("Someone".into()),
    isbn: isbn.map(str::to_string),
  };
  Book::create(conn, &form).await.unwrap().unwrap()
}

pub async fn review(conn: &mut Connection, author: &User, book: &Book, content: &str) -> Review {
  let form = CreateReview {
    book_id: book.id,
    content: content.to_string(),
  };
  Review::create(conn, author.id, &form).await.unwrap()
}
