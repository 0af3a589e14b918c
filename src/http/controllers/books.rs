use actix_web::{
  web::{self, Json, Query},
  HttpResponse,
};
use validator::Validate;

use crate::{
  http::{util::path_id, OptionExt, Result},
  schema::Book,
  types::form::{books::CreateBook, Pagination},
  App,
};

#[tracing::instrument(skip(app))]
pub async fn create(app: web::Data<App>, form: Json<CreateBook>) -> Result<HttpResponse> {
  form.validate()?;

  let mut conn = app.db_write().await?;
  let book = Book::create(&mut conn, &form)
    .await?
    .or_bad_request("ISBN already registered")?;

  Ok(HttpResponse::Ok().json(book))
}

#[tracing::instrument(skip(app))]
pub async fn list(app: web::Data<App>, page: Query<Pagination>) -> Result<HttpResponse> {
  page.validate()?;

  let mut conn = app.db_read().await?;
  let books = Book::list(&mut conn, *page).await?;
  Ok(HttpResponse::Ok().json(books))
}

#[tracing::instrument(skip(app))]
pub async fn get(app: web::Data<App>, path: web::Path<u64>) -> Result<HttpResponse> {
  let id = path_id(path.into_inner(), "Book not found")?;

  let mut conn = app.db_read().await?;
  let book = Book::by_id(&mut conn, id).await?.or_not_found("Book not found")?;
  Ok(HttpResponse::Ok().json(book))
}

#[cfg(test)]
mod tests {
  use crate::http::controllers::tests::{call, json_request};
  use actix_web::{http::StatusCode, test::TestRequest};
  use serde_json::json;

  #[actix_web::test]
  async fn test_create_rejects_bad_isbn() {
    let req = json_request(
      TestRequest::post().uri("/books/"),
      json!({ "name": "Rust in Action", "isbn": "12-34" }),
    );
    let (status, body) = call(req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["isbn"]["_errors"][0], "Invalid ISBN");
  }

  #[actix_web::test]
  async fn test_non_numeric_id_is_bad_request() {
    let (status, body) = call(TestRequest::get().uri("/books/dune")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["type"], "bad_request");
  }
}
