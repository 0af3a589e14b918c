//! Request plumbing shared by every route: extractor settings that
//! answer malformed requests with JSON error bodies, and CORS.
use actix_cors::Cors;
use actix_web::{error::PathError, error::QueryPayloadError, web, HttpRequest};

use super::Error;
use crate::{
  config,
  types::{
    self,
    id::{marker::Marker, Id},
  },
};

pub fn json_config() -> web::JsonConfig {
  web::JsonConfig::default().error_handler(|error, _req: &HttpRequest| {
    Error::from_type(types::Error::bad_request(format!("Invalid request body: {error}"))).into()
  })
}

pub fn query_config() -> web::QueryConfig {
  web::QueryConfig::default().error_handler(|error: QueryPayloadError, _req: &HttpRequest| {
    Error::from_type(types::Error::bad_request(format!("Invalid query string: {error}"))).into()
  })
}

pub fn path_config() -> web::PathConfig {
  web::PathConfig::default().error_handler(|error: PathError, _req: &HttpRequest| {
    Error::from_type(types::Error::bad_request(format!("Invalid path: {error}"))).into()
  })
}

/// Row ids start from 1, so a zero in the path cannot point to
/// anything.
pub fn path_id<M: Marker>(value: u64, missing: &'static str) -> super::Result<Id<M>> {
  Id::new_checked(value).ok_or_else(|| Error::from_type(types::Error::not_found(missing)))
}

/// Allows the configured origins (`*` for any) to call the API
/// with any method and header, cookies included.
pub fn cors(config: &config::Http) -> Cors {
  let mut cors = Cors::default()
    .allow_any_method()
    .allow_any_header()
    .supports_credentials()
    .max_age(3600);

  for origin in &config.cors_origins {
    cors = if origin == "*" {
      cors.allow_any_origin()
    } else {
      cors.allowed_origin(origin)
    };
  }
  cors
}
