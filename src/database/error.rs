use error_stack::Report;
use thiserror::Error;

/// Database related errors
#[derive(Debug, Error)]
pub enum Error {
  /// An error caused by an invalid Postgres connection
  /// url for either the primary or the replica pool.
  #[error("invalid connection url")]
  InvalidUrl,
  /// An error caused by an [`sqlx`] error.
  #[error("received a pool error: {0}")]
  Internal(sqlx::Error),
  /// The bundled schema could not be applied.
  #[error("failed to apply database migrations")]
  Migration,
  /// The database pool (primary) is currently in read mode
  /// (most likely due to maintenance) and should not perform
  /// any writes.
  #[error("database is currently in read mode")]
  Readonly,
  /// A row refers to another row that does not exist. Holds the
  /// name of the violated constraint if Postgres reported it.
  #[error("foreign key constraint {} violated", .0.as_deref().unwrap_or("<unknown>"))]
  ForeignKeyViolation(Option<String>),
  /// A row with the same unique key already exists.
  #[error("unique constraint violated")]
  UniqueViolation,
  /// Either the primary or replica database pools do not
  /// have reliable connection to transact to the database.
  #[error("unhealthy database pool")]
  UnhealthyPool,
}

/// Converts from a generic [sqlx] result into a [database compatible error](Error).
pub trait ErrorExt<T> {
  fn into_db_error(self) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, sqlx::Error> {
  fn into_db_error(self) -> Result<T> {
    self.map_err(|e| {
      let context = match &e {
        sqlx::Error::Database(err) if err.message().ends_with("read-only transaction") => {
          Error::Readonly
        },
        sqlx::Error::Database(err) if err.is_unique_violation() => Error::UniqueViolation,
        sqlx::Error::Database(err) if err.is_foreign_key_violation() => {
          Error::ForeignKeyViolation(err.constraint().map(str::to_string))
        },
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => Error::UnhealthyPool,
        _ => return Report::new(Error::Internal(e)),
      };
      Report::new(e).change_context(context)
    })
  }
}

/// Lazily typed [`std::result::Result`] but the error generic
/// is filled up with [a database error](Error).
pub type Result<T> = error_stack::Result<T, Error>;

/// This trait deals with `error_stack::Report<Error>` because it is
/// annoying to match against the current context every time:
///
/// ```rust,ignore
/// match pool.get().await {
///   Err(err) if err.is_unhealthy() => { /* fallback */ }
///   ...
/// }
/// ```
pub trait ErrorExt2 {
  fn is_unhealthy(&self) -> bool;
  fn is_readonly(&self) -> bool;
}

impl ErrorExt2 for Report<Error> {
  fn is_unhealthy(&self) -> bool {
    matches!(self.current_context(), Error::UnhealthyPool)
  }

  fn is_readonly(&self) -> bool {
    matches!(self.current_context(), Error::Readonly)
  }
}
