use bookshelf::{
  database,
  schema::{Book, Follow, ReactionType, Review, ReviewReaction, User, UserBook},
  types::form::{search::SearchQuery, users::CreateUser, users::UserPatch, Pagination},
};
use sqlx::PgPool;

mod common;

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a running Postgres database (DATABASE_URL)"]
async fn duplicates_are_reported_as_none(pool: PgPool) {
  let mut conn = pool.acquire().await.unwrap();
  let hanako = common::user(&mut conn, "Hanako").await;
  let taro = common::user(&mut conn, "Taro").await;

  let form = CreateUser {
    name: "Another Hanako".into(),
    email: hanako.email.clone(),
    bio: None,
    profile_image_url: None,
  };
  assert!(User::create(&mut conn, &form).await.unwrap().is_none());

  let book = common::book(&mut conn, "Dune", Some("978-0441013593")).await;
  let form = bookshelf::types::form::books::CreateBook {
    name: "Dune (reprint)".into(),
    url: None,
    author: None,
    isbn: Some("978 0441013593".into()),
  };
  assert!(Book::create(&mut conn, &form).await.unwrap().is_none());

  assert!(Follow::create(&mut conn, hanako.id, taro.id).await.unwrap().is_some());
  assert!(Follow::create(&mut conn, hanako.id, taro.id).await.unwrap().is_none());

  assert!(UserBook::add(&mut conn, hanako.id, book.id, false).await.unwrap().is_some());
  assert!(UserBook::add(&mut conn, hanako.id, book.id, true).await.unwrap().is_none());

  let review = common::review(&mut conn, &taro, &book, "Spice").await;
  let reaction = ReviewReaction::create(&mut conn, hanako.id, review.id, ReactionType::Good).await;
  assert!(reaction.unwrap().is_some());
  let reaction = ReviewReaction::create(&mut conn, hanako.id, review.id, ReactionType::Bad).await;
  assert!(reaction.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a running Postgres database (DATABASE_URL)"]
async fn isbn_is_stored_without_separators(pool: PgPool) {
  let mut conn = pool.acquire().await.unwrap();
  let book = common::book(&mut conn, "Rust入門", Some("9-7-8-1-2-3-4-5-6-7-8-9-0")).await;
  assert_eq!(book.isbn.as_deref(), Some("9781234567890"));

  let form = bookshelf::types::form::books::CreateBook {
    name: "Rust入門 (2nd)".into(),
    url: None,
    author: None,
    isbn: Some("978-1234567890".into()),
  };
  assert!(Book::create(&mut conn, &form).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a running Postgres database (DATABASE_URL)"]
async fn self_follow_violates_check(pool: PgPool) {
  let mut conn = pool.acquire().await.unwrap();
  let hanako = common::user(&mut conn, "Hanako").await;

  let error = Follow::create(&mut conn, hanako.id, hanako.id).await.unwrap_err();
  assert!(matches!(error.current_context(), database::Error::Internal(..)));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a running Postgres database (DATABASE_URL)"]
async fn patch_only_touches_given_fields(pool: PgPool) {
  let mut conn = pool.acquire().await.unwrap();
  let user = common::user(&mut conn, "Hanako").await;

  let patch: UserPatch = serde_json::from_str(r#"{ "bio": "Reads at night" }"#).unwrap();
  let updated = User::update(&mut conn, user.id, &patch).await.unwrap().unwrap();
  assert_eq!(updated.name, "Hanako");
  assert_eq!(updated.bio.as_deref(), Some("Reads at night"));
  assert!(updated.updated_at >= user.updated_at);

  let patch: UserPatch = serde_json::from_str(r#"{ "name": "Hana", "bio": null }"#).unwrap();
  let updated = User::update(&mut conn, user.id, &patch).await.unwrap().unwrap();
  assert_eq!(updated.name, "Hana");
  assert_eq!(updated.bio, None);
  assert_eq!(updated.email, user.email);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a running Postgres database (DATABASE_URL)"]
async fn only_the_author_edits_a_review(pool: PgPool) {
  let mut conn = pool.acquire().await.unwrap();
  let author = common::user(&mut conn, "Hanako").await;
  let other = common::user(&mut conn, "Taro").await;
  let book = common::book(&mut conn, "Emma", None).await;
  let review = common::review(&mut conn, &author, &book, "Charming").await;

  let denied = Review::update_content(&mut conn, review.id, other.id, "Boring").await;
  assert!(denied.unwrap().is_none());

  let edited = Review::update_content(&mut conn, review.id, author.id, "Still charming")
    .await
    .unwrap()
    .unwrap();
  assert_eq!(edited.content, "Still charming");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a running Postgres database (DATABASE_URL)"]
async fn review_of_unknown_book_names_the_book(pool: PgPool) {
  let mut conn = pool.acquire().await.unwrap();
  let author = common::user(&mut conn, "Hanako").await;

  let form = bookshelf::types::form::reviews::CreateReview {
    book_id: bookshelf::types::id::Id::new(999),
    content: "Phantom".into(),
  };
  let error = Review::create(&mut conn, author.id, &form).await.unwrap_err();
  let database::Error::ForeignKeyViolation(Some(constraint)) = error.current_context() else {
    panic!("unexpected error: {error:?}");
  };
  assert_eq!(constraint, "reviews_book_id_fkey");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a running Postgres database (DATABASE_URL)"]
async fn library_and_follow_lists(pool: PgPool) {
  let mut conn = pool.acquire().await.unwrap();
  let hanako = common::user(&mut conn, "Hanako").await;
  let taro = common::user(&mut conn, "Taro").await;
  let dune = common::book(&mut conn, "Dune", None).await;
  let emma = common::book(&mut conn, "Emma", None).await;

  UserBook::add(&mut conn, hanako.id, dune.id, false).await.unwrap().unwrap();
  UserBook::add(&mut conn, hanako.id, emma.id, false).await.unwrap().unwrap();
  UserBook::set_favorite(&mut conn, hanako.id, emma.id, true)
    .await
    .unwrap()
    .unwrap();
  assert!(UserBook::set_favorite(&mut conn, taro.id, emma.id, true)
    .await
    .unwrap()
    .is_none());

  let page = Pagination::default();
  let all = Book::in_library(&mut conn, hanako.id, false, page).await.unwrap();
  assert_eq!(all.len(), 2);
  let favorites = Book::in_library(&mut conn, hanako.id, true, page).await.unwrap();
  assert_eq!(favorites, vec![emma]);

  Follow::create(&mut conn, taro.id, hanako.id).await.unwrap().unwrap();
  let followers = User::followers(&mut conn, hanako.id, page).await.unwrap();
  assert_eq!(followers.iter().map(|u| u.id).collect::<Vec<_>>(), [taro.id]);
  let following = User::following(&mut conn, taro.id, page).await.unwrap();
  assert_eq!(following.iter().map(|u| u.id).collect::<Vec<_>>(), [hanako.id]);

  assert!(Follow::delete(&mut conn, taro.id, hanako.id).await.unwrap().is_some());
  assert!(Follow::delete(&mut conn, taro.id, hanako.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a running Postgres database (DATABASE_URL)"]
async fn search_matches_literally(pool: PgPool) {
  let mut conn = pool.acquire().await.unwrap();
  let author = common::user(&mut conn, "Hanako").await;
  let python = common::book(&mut conn, "Python入門", Some("978-1234567890")).await;
  let percent = common::book(&mut conn, "100% Rust", None).await;
  common::review(&mut conn, &author, &python, "Great for BEGINNERS").await;

  let page = Pagination::default();
  let query = |q: &str| SearchQuery { query: q.into() }.like_pattern();

  let found = Book::search(&mut conn, &query("python"), page).await.unwrap();
  assert_eq!(found, vec![python]);

  let found = Book::search(&mut conn, &query("1234567"), page).await.unwrap();
  assert_eq!(found.len(), 1);

  let found = Book::search(&mut conn, &query("%"), page).await.unwrap();
  assert_eq!(found, vec![percent]);

  let found = Review::search(&mut conn, &query("beginners"), page).await.unwrap();
  assert_eq!(found.len(), 1);
}
