use actix_web::{web, HttpResponse};

use crate::{
  http::{util::path_id, OptionExt, Result},
  schema::UserStats,
  App,
};

#[tracing::instrument(skip(app))]
pub async fn get(app: web::Data<App>, path: web::Path<u64>) -> Result<HttpResponse> {
  let user_id = path_id(path.into_inner(), "Stats not found")?;

  let mut conn = app.db_read().await?;
  let stats = UserStats::by_user_id(&mut conn, user_id)
    .await?
    .or_not_found("Stats not found")?;

  Ok(HttpResponse::Ok().json(stats))
}

/// Recomputes the stats right away instead of waiting for the next
/// background refresh.
#[tracing::instrument(skip(app))]
pub async fn recompute(app: web::Data<App>, path: web::Path<u64>) -> Result<HttpResponse> {
  let user_id = path_id(path.into_inner(), "User not found")?;
  let stats = UserStats::recompute(&app.primary_db, user_id).await?;
  Ok(HttpResponse::Ok().json(stats))
}

#[cfg(test)]
mod tests {
  use crate::http::controllers::tests::call;
  use actix_web::{http::StatusCode, test::TestRequest};

  #[actix_web::test]
  async fn test_stats_of_user_zero() {
    let (status, body) = call(TestRequest::get().uri("/users/0/stats")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Stats not found");

    let (status, body) = call(TestRequest::post().uri("/users/0/stats")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "User not found");
  }
}
