use actix_web::{web, FromRequest};
use futures::future::{ready, Ready};
use serde::Deserialize;
use thiserror::Error;

use super::Error;
use crate::types::id::{marker::UserMarker, Id};

/// The user a request acts on behalf of, taken as is from the
/// `current_user_id` query parameter.
///
/// Nobody checks that the caller is really that user. Requests
/// without a valid id are rejected as unauthorized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(pub Id<UserMarker>);

impl CurrentUser {
  #[must_use]
  pub fn id(self) -> Id<UserMarker> {
    self.0
  }
}

impl FromRequest for CurrentUser {
  type Error = Error;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(
    req: &actix_web::HttpRequest,
    _payload: &mut actix_web::dev::Payload,
  ) -> Self::Future {
    #[derive(Deserialize)]
    struct Params {
      current_user_id: Option<Id<UserMarker>>,
    }

    #[derive(Debug, Error)]
    #[error("Attempt to access a route that acts as a user")]
    struct Unauthorized;

    let params = web::Query::<Params>::from_query(req.query_string()).ok();
    let result = match params.and_then(|p| p.into_inner().current_user_id) {
      Some(id) => Ok(Self(id)),
      None => Err(Error::from_context(
        crate::types::Error::Unauthorized,
        Unauthorized,
      )),
    };
    ready(result)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use actix_web::test::TestRequest;

  async fn extract(uri: &str) -> Result<CurrentUser, Error> {
    let req = TestRequest::with_uri(uri).to_http_request();
    CurrentUser::extract(&req).await
  }

  #[actix_web::test]
  async fn test_reads_query_parameter() {
    let user = extract("/reviews/?current_user_id=12&limit=5").await.unwrap();
    assert_eq!(user.id(), Id::new(12));
  }

  #[actix_web::test]
  async fn test_missing_or_invalid_id_is_unauthorized() {
    for uri in ["/reviews/", "/reviews/?current_user_id=0", "/reviews/?current_user_id=abc"] {
      let error = extract(uri).await.unwrap_err();
      assert_eq!(error.as_type(), &crate::types::Error::Unauthorized);
    }
  }
}
