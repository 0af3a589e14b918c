use actix_web::{
  web::{self, Query},
  HttpResponse,
};
use validator::Validate;

use crate::{
  http::Result,
  schema::{Book, Review},
  types::form::{search::SearchQuery, Pagination},
  App,
};

#[tracing::instrument(skip(app))]
pub async fn books(
  app: web::Data<App>,
  query: Query<SearchQuery>,
  page: Query<Pagination>,
) -> Result<HttpResponse> {
  query.validate()?;
  page.validate()?;

  let mut conn = app.db_read().await?;
  let books = Book::search(&mut conn, &query.like_pattern(), *page).await?;
  Ok(HttpResponse::Ok().json(books))
}

#[tracing::instrument(skip(app))]
pub async fn reviews(
  app: web::Data<App>,
  query: Query<SearchQuery>,
  page: Query<Pagination>,
) -> Result<HttpResponse> {
  query.validate()?;
  page.validate()?;

  let mut conn = app.db_read().await?;
  let reviews = Review::search(&mut conn, &query.like_pattern(), *page).await?;
  Ok(HttpResponse::Ok().json(reviews))
}
