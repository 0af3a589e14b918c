use actix_web::web;

use super::util;

pub mod books;
pub mod follows;
pub mod library;
pub mod reactions;
pub mod reviews;
pub mod search;
pub mod stats;
pub mod users;

pub fn configure(cfg: &mut web::ServiceConfig) {
  cfg
    .app_data(util::json_config())
    .app_data(util::query_config())
    .app_data(util::path_config());

  // `/books/` must be registered before `/{user_id}`
  cfg.service(
    web::scope("/users")
      .service(
        web::resource("/")
          .route(web::post().to(users::create))
          .route(web::get().to(users::list)),
      )
      .route("/books/", web::post().to(library::add))
      .route("/books/{book_id}/favorite", web::put().to(library::set_favorite))
      .service(
        web::resource("/{user_id}")
          .route(web::get().to(users::get))
          .route(web::put().to(users::update)),
      )
      .service(
        web::resource("/{user_id}/follow")
          .route(web::post().to(follows::follow))
          .route(web::delete().to(follows::unfollow)),
      )
      .route("/{user_id}/followers", web::get().to(follows::followers))
      .route("/{user_id}/following", web::get().to(follows::following))
      .route("/{user_id}/books", web::get().to(library::books_of))
      .service(
        web::resource("/{user_id}/stats")
          .route(web::get().to(stats::get))
          .route(web::post().to(stats::recompute)),
      ),
  );

  cfg.service(
    web::scope("/books")
      .service(
        web::resource("/")
          .route(web::post().to(books::create))
          .route(web::get().to(books::list)),
      )
      .route("/{book_id}", web::get().to(books::get)),
  );

  cfg.service(
    web::scope("/reviews")
      .service(
        web::resource("/")
          .route(web::post().to(reviews::create))
          .route(web::get().to(reviews::list)),
      )
      .service(
        web::resource("/{review_id}")
          .route(web::get().to(reviews::get))
          .route(web::put().to(reviews::update)),
      )
      .service(
        web::resource("/{review_id}/reactions")
          .route(web::post().to(reactions::create))
          .route(web::delete().to(reactions::delete)),
      ),
  );

  cfg.service(
    web::scope("/search")
      .route("/books", web::get().to(search::books))
      .route("/reviews", web::get().to(search::reviews)),
  );
}

#[cfg(test)]
pub(crate) mod tests {
  use actix_web::{
    http::StatusCode,
    test::{call_service, init_service, read_body, TestRequest},
    web,
  };

  use crate::app::tests::lazy_app;

  pub(crate) fn json_request(req: TestRequest, body: serde_json::Value) -> TestRequest {
    req.set_json(body)
  }

  /// Sends a request to the routes of the app, backed by a database
  /// that is never connected to. Only requests rejected before any
  /// query is made make sense here.
  pub(crate) async fn call(req: TestRequest) -> (StatusCode, serde_json::Value) {
    let app = init_service(
      actix_web::App::new()
        .app_data(web::Data::new(lazy_app()))
        .configure(super::configure),
    )
    .await;

    let response = call_service(&app, req.to_request()).await;
    let status = response.status();
    let body = read_body(response).await;
    let body = if body.is_empty() {
      serde_json::Value::Null
    } else {
      serde_json::from_slice(&body).unwrap()
    };
    (status, body)
  }

  #[actix_web::test]
  async fn test_unknown_route() {
    let (status, _) = call(TestRequest::get().uri("/authors/")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }
}
