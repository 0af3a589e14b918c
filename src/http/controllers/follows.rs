use actix_web::{
  web::{self, Query},
  HttpResponse,
};
use serde_json::json;
use validator::Validate;

use crate::{
  http::{util::path_id, CurrentUser, OptionExt, Result},
  schema::{Follow, User},
  stats::Activity,
  types::{form::Pagination, Error as ErrorType},
  App,
};

#[tracing::instrument(skip(app))]
pub async fn follow(
  app: web::Data<App>,
  path: web::Path<u64>,
  user: CurrentUser,
) -> Result<HttpResponse> {
  let target = path_id(path.into_inner(), "User not found")?;
  if target == user.id() {
    return Err(crate::http::Error::from_type(ErrorType::bad_request(
      "Cannot follow yourself",
    )));
  }

  let mut conn = app.db_write().await?;
  User::by_id(&mut conn, target).await?.or_not_found("User not found")?;
  Follow::create(&mut conn, user.id(), target)
    .await?
    .or_bad_request("Already following")?;
  drop(conn);

  app.schedule_stats_refresh(Activity::FollowChanged {
    follower: user.id(),
    following: target,
  });
  Ok(HttpResponse::Created().json(json!({ "status": "success" })))
}

#[tracing::instrument(skip(app))]
pub async fn unfollow(
  app: web::Data<App>,
  path: web::Path<u64>,
  user: CurrentUser,
) -> Result<HttpResponse> {
  let target = path_id(path.into_inner(), "Follow relationship not found")?;

  let mut conn = app.db_write().await?;
  Follow::delete(&mut conn, user.id(), target)
    .await?
    .or_not_found("Follow relationship not found")?;
  drop(conn);

  app.schedule_stats_refresh(Activity::FollowChanged {
    follower: user.id(),
    following: target,
  });
  Ok(HttpResponse::NoContent().finish())
}

#[tracing::instrument(skip(app))]
pub async fn followers(
  app: web::Data<App>,
  path: web::Path<u64>,
  page: Query<Pagination>,
) -> Result<HttpResponse> {
  let id = path_id(path.into_inner(), "User not found")?;
  page.validate()?;

  let mut conn = app.db_read().await?;
  let users = User::followers(&mut conn, id, *page).await?;
  Ok(HttpResponse::Ok().json(users))
}

#[tracing::instrument(skip(app))]
pub async fn following(
  app: web::Data<App>,
  path: web::Path<u64>,
  page: Query<Pagination>,
) -> Result<HttpResponse> {
  let id = path_id(path.into_inner(), "User not found")?;
  page.validate()?;

  let mut conn = app.db_read().await?;
  let users = User::following(&mut conn, id, *page).await?;
  Ok(HttpResponse::Ok().json(users))
}

#[cfg(test)]
mod tests {
  use crate::http::controllers::tests::call;
  use actix_web::{http::StatusCode, test::TestRequest};

  #[actix_web::test]
  async fn test_cannot_follow_yourself() {
    let req = TestRequest::post().uri("/users/5/follow?current_user_id=5");
    let (status, body) = call(req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Cannot follow yourself");
  }

  #[actix_web::test]
  async fn test_follow_requires_current_user() {
    let (status, body) = call(TestRequest::post().uri("/users/5/follow")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["type"], "unauthorized");
  }
}
