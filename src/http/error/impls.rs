use actix_web::{body::BoxBody, http::StatusCode, HttpResponse};
use error_stack::Report;

use super::Error;
use crate::{database, types::Error as ErrorType};

impl actix_web::ResponseError for Error {
  fn status_code(&self) -> StatusCode {
    match self.error_type {
      ErrorType::Internal => StatusCode::INTERNAL_SERVER_ERROR,
      ErrorType::ReadonlyMode => StatusCode::SERVICE_UNAVAILABLE,
      ErrorType::InvalidFormBody(..) | ErrorType::BadRequest { .. } => StatusCode::BAD_REQUEST,
      ErrorType::Unauthorized => StatusCode::UNAUTHORIZED,
      ErrorType::NotFound { .. } => StatusCode::NOT_FOUND,
    }
  }

  fn error_response(&self) -> HttpResponse<BoxBody> {
    HttpResponse::build(self.status_code()).json(&self.error_type)
  }
}

/// Which row was missing, judging by the name of the violated
/// foreign key (`<table>_<column>_fkey` unless named otherwise).
fn missing_reference(constraint: Option<&str>) -> &'static str {
  let Some(constraint) = constraint else {
    return "Referenced resource not found";
  };

  if constraint.ends_with("book_id_fkey") {
    "Book not found"
  } else if constraint.ends_with("review_id_fkey") {
    "Review not found"
  } else if constraint.ends_with("user_id_fkey")
    || constraint.ends_with("follower_id_fkey")
    || constraint.ends_with("following_id_fkey")
  {
    "User not found"
  } else {
    "Referenced resource not found"
  }
}

impl From<Report<database::Error>> for Error {
  fn from(value: Report<database::Error>) -> Self {
    let error_type = match value.current_context() {
      database::Error::Readonly => ErrorType::ReadonlyMode,
      database::Error::UniqueViolation => ErrorType::bad_request("Resource already exists"),
      database::Error::ForeignKeyViolation(constraint) => {
        ErrorType::not_found(missing_reference(constraint.as_deref()))
      },
      _ => ErrorType::Internal,
    };
    Error::from_report(error_type, value)
  }
}

impl From<validator::ValidateError> for Error {
  fn from(value: validator::ValidateError) -> Self {
    #[derive(Debug, thiserror::Error)]
    #[error("Validation error occurred")]
    struct ValidateError;
    Error::from_context(ErrorType::InvalidFormBody(value), ValidateError)
  }
}
