use actix_web::{
  web::{self, Json},
  HttpResponse,
};

use crate::{
  http::{util::path_id, CurrentUser, OptionExt, Result},
  schema::{Review, ReviewReaction},
  stats::Activity,
  types::form::reactions::CreateReaction,
  App,
};

#[tracing::instrument(skip(app))]
pub async fn create(
  app: web::Data<App>,
  path: web::Path<u64>,
  user: CurrentUser,
  form: Json<CreateReaction>,
) -> Result<HttpResponse> {
  let review_id = path_id(path.into_inner(), "Review not found")?;

  let mut conn = app.db_write().await?;
  let review = Review::by_id(&mut conn, review_id)
    .await?
    .or_not_found("Review not found")?;

  let reaction = ReviewReaction::create(&mut conn, user.id(), review.id, form.reaction_type)
    .await?
    .or_bad_request("Reaction already exists")?;
  drop(conn);

  app.schedule_stats_refresh(Activity::ReactionChanged {
    reactor: user.id(),
    review_author: review.user_id,
  });
  Ok(HttpResponse::Ok().json(reaction))
}

#[tracing::instrument(skip(app))]
pub async fn delete(
  app: web::Data<App>,
  path: web::Path<u64>,
  user: CurrentUser,
) -> Result<HttpResponse> {
  let review_id = path_id(path.into_inner(), "Reaction not found")?;

  let mut conn = app.db_write().await?;
  ReviewReaction::delete(&mut conn, user.id(), review_id)
    .await?
    .or_not_found("Reaction not found")?;

  let review = Review::by_id(&mut conn, review_id).await?;
  drop(conn);

  if let Some(review) = review {
    app.schedule_stats_refresh(Activity::ReactionChanged {
      reactor: user.id(),
      review_author: review.user_id,
    });
  }
  Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
  use crate::http::controllers::tests::{call, json_request};
  use actix_web::{http::StatusCode, test::TestRequest};
  use serde_json::json;

  #[actix_web::test]
  async fn test_unknown_reaction_type() {
    let req = json_request(
      TestRequest::post().uri("/reviews/1/reactions?current_user_id=2"),
      json!({ "reaction_type": "meh" }),
    );
    let (status, body) = call(req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["type"], "bad_request");
  }

  #[actix_web::test]
  async fn test_delete_requires_current_user() {
    let (status, _) = call(TestRequest::delete().uri("/reviews/1/reactions")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
  }
}
