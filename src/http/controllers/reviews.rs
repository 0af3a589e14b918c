use actix_web::{
  web::{self, Json, Query},
  HttpResponse,
};
use validator::Validate;

use crate::{
  http::{util::path_id, CurrentUser, OptionExt, Result},
  schema::Review,
  stats::Activity,
  types::form::{
    reviews::{CreateReview, UpdateReview},
    Pagination,
  },
  App,
};

#[tracing::instrument(skip(app, form))]
pub async fn create(
  app: web::Data<App>,
  user: CurrentUser,
  form: Json<CreateReview>,
) -> Result<HttpResponse> {
  form.validate()?;

  let mut conn = app.db_write().await?;
  let review = Review::create(&mut conn, user.id(), &form).await?;
  drop(conn);

  app.schedule_stats_refresh(Activity::ReviewWritten {
    author: review.user_id,
  });
  Ok(HttpResponse::Ok().json(review))
}

#[tracing::instrument(skip(app))]
pub async fn list(app: web::Data<App>, page: Query<Pagination>) -> Result<HttpResponse> {
  page.validate()?;

  let mut conn = app.db_read().await?;
  let reviews = Review::list(&mut conn, *page).await?;
  Ok(HttpResponse::Ok().json(reviews))
}

#[tracing::instrument(skip(app))]
pub async fn get(app: web::Data<App>, path: web::Path<u64>) -> Result<HttpResponse> {
  let id = path_id(path.into_inner(), "Review not found")?;

  let mut conn = app.db_read().await?;
  let review = Review::by_id(&mut conn, id)
    .await?
    .or_not_found("Review not found")?;

  Ok(HttpResponse::Ok().json(review))
}

/// Only the author may edit a review. Someone else's review is
/// reported as missing.
#[tracing::instrument(skip(app, form))]
pub async fn update(
  app: web::Data<App>,
  path: web::Path<u64>,
  user: CurrentUser,
  form: Json<UpdateReview>,
) -> Result<HttpResponse> {
  let id = path_id(path.into_inner(), "Review not found")?;
  form.validate()?;

  let mut conn = app.db_write().await?;
  let review = Review::update_content(&mut conn, id, user.id(), &form.content)
    .await?
    .or_not_found("Review not found")?;

  Ok(HttpResponse::Ok().json(review))
}

#[cfg(test)]
mod tests {
  use crate::http::controllers::tests::{call, json_request};
  use actix_web::{http::StatusCode, test::TestRequest};
  use serde_json::json;

  #[actix_web::test]
  async fn test_create_requires_current_user() {
    let req = json_request(
      TestRequest::post().uri("/reviews/"),
      json!({ "book_id": "1", "content": "Great read" }),
    );
    let (status, body) = call(req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["type"], "unauthorized");
  }

  #[actix_web::test]
  async fn test_update_rejects_blank_content() {
    let req = json_request(
      TestRequest::put().uri("/reviews/3?current_user_id=1"),
      json!({ "content": "   " }),
    );
    let (status, body) = call(req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("content").is_some());
  }
}
