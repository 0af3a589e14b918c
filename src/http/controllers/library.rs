use actix_web::{
  web::{self, Json, Query},
  HttpResponse,
};
use serde_json::json;
use validator::Validate;

use crate::{
  http::{util::path_id, CurrentUser, OptionExt, Result},
  schema::{Book, UserBook},
  stats::Activity,
  types::form::{
    library::{AddBook, LibraryFilter, SetFavorite},
    Pagination,
  },
  App,
};

#[tracing::instrument(skip(app))]
pub async fn add(
  app: web::Data<App>,
  user: CurrentUser,
  form: Json<AddBook>,
) -> Result<HttpResponse> {
  let mut conn = app.db_write().await?;
  let book = Book::by_id(&mut conn, form.book_id)
    .await?
    .or_not_found("Book not found")?;

  UserBook::add(&mut conn, user.id(), book.id, form.is_favorite)
    .await?
    .or_bad_request("Book already added")?;
  drop(conn);

  app.schedule_stats_refresh(Activity::BookAdded { reader: user.id() });
  Ok(HttpResponse::Ok().json(book))
}

#[tracing::instrument(skip(app))]
pub async fn set_favorite(
  app: web::Data<App>,
  path: web::Path<u64>,
  user: CurrentUser,
  form: Json<SetFavorite>,
) -> Result<HttpResponse> {
  let book_id = path_id(path.into_inner(), "Book not found in user's library")?;

  let mut conn = app.db_write().await?;
  UserBook::set_favorite(&mut conn, user.id(), book_id, form.is_favorite)
    .await?
    .or_not_found("Book not found in user's library")?;

  Ok(HttpResponse::Ok().json(json!({ "status": "success" })))
}

#[tracing::instrument(skip(app))]
pub async fn books_of(
  app: web::Data<App>,
  path: web::Path<u64>,
  page: Query<Pagination>,
  filter: Query<LibraryFilter>,
) -> Result<HttpResponse> {
  let user_id = path_id(path.into_inner(), "User not found")?;
  page.validate()?;

  let mut conn = app.db_read().await?;
  let books = Book::in_library(&mut conn, user_id, filter.favorites_only, *page).await?;
  Ok(HttpResponse::Ok().json(books))
}
