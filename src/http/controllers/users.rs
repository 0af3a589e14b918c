use actix_web::{
  web::{self, Json, Query},
  HttpResponse,
};
use validator::Validate;

use crate::{
  http::{util::path_id, OptionExt, Result},
  schema::User,
  types::form::{
    users::{CreateUser, UserPatch},
    Pagination,
  },
  App,
};

#[tracing::instrument(skip_all)]
pub async fn create(app: web::Data<App>, form: Json<CreateUser>) -> Result<HttpResponse> {
  form.validate()?;

  let mut conn = app.db_write().await?;
  let user = User::create(&mut conn, &form)
    .await?
    .or_bad_request("Email already registered")?;

  tracing::info!(id = %user.id, "Registered a new user");
  Ok(HttpResponse::Ok().json(user))
}

#[tracing::instrument(skip(app))]
pub async fn list(app: web::Data<App>, page: Query<Pagination>) -> Result<HttpResponse> {
  page.validate()?;

  let mut conn = app.db_read().await?;
  let users = User::list(&mut conn, *page).await?;
  Ok(HttpResponse::Ok().json(users))
}

#[tracing::instrument(skip(app))]
pub async fn get(app: web::Data<App>, path: web::Path<u64>) -> Result<HttpResponse> {
  let id = path_id(path.into_inner(), "User not found")?;

  let mut conn = app.db_read().await?;
  let user = User::by_id(&mut conn, id).await?.or_not_found("User not found")?;
  Ok(HttpResponse::Ok().json(user))
}

#[tracing::instrument(skip(app, patch))]
pub async fn update(
  app: web::Data<App>,
  path: web::Path<u64>,
  patch: Json<UserPatch>,
) -> Result<HttpResponse> {
  let id = path_id(path.into_inner(), "User not found")?;
  patch.validate()?;

  let mut conn = app.db_write().await?;
  let user = User::update(&mut conn, id, &patch)
    .await?
    .or_not_found("User not found")?;

  Ok(HttpResponse::Ok().json(user))
}
