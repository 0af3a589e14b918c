use crate::types;
use error_stack::{Context, Report};
use thiserror::Error;
use tracing_error::SpanTrace;

mod impls;

pub mod ext;
pub use ext::*;

pub type Result<T> = std::result::Result<T, Error>;

/// Context every report of a failed request ends up with.
#[derive(Debug, Error)]
#[error("Failed to handle request")]
pub struct RequestError;

/// Error returned by request handlers.
///
/// The [API error](types::Error) is what the client gets back. The
/// report and the span trace stay on the server for logging.
pub struct Error {
  error_type: types::Error,
  report: Report<RequestError>,
  trace: SpanTrace,
}

impl Error {
  /// Error without any underlying failure, such as a missing row.
  #[must_use]
  pub fn from_type(error_type: types::Error) -> Self {
    let report = Report::new(RequestError).attach_printable(error_type.to_string());
    Self {
      error_type,
      report,
      trace: SpanTrace::capture(),
    }
  }

  #[must_use]
  pub fn from_context(error_type: types::Error, context: impl Context) -> Self {
    Self::from_report(error_type, Report::new(context))
  }

  #[must_use]
  pub fn from_report(error_type: types::Error, report: Report<impl Context>) -> Self {
    Self {
      error_type,
      report: report.change_context(RequestError),
      trace: SpanTrace::capture(),
    }
  }
}

impl Error {
  #[must_use]
  pub fn as_type(&self) -> &types::Error {
    &self.error_type
  }

  #[must_use]
  pub fn downcast_ref<F: Context>(&self) -> Option<&F> {
    self.report.downcast_ref::<F>()
  }
}

impl std::fmt::Debug for Error {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Error")
      .field("type", &self.error_type)
      .field("report", &self.report)
      .field("trace", &self.trace)
      .finish()
  }
}

impl std::fmt::Display for Error {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}: ", &self.error_type)?;
    writeln!(f, "{:?}", self.report)?;
    std::fmt::Display::fmt(&self.trace, f)
  }
}
