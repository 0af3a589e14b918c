use error_stack::{Report, ResultExt};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use std::{str::FromStr, time::Duration};

use crate::config;

mod error;
pub use error::*;

pub type Transaction<'a> = sqlx::Transaction<'a, sqlx::Postgres>;
pub type PoolConnection = sqlx::pool::PoolConnection<sqlx::Postgres>;
pub type Connection = sqlx::PgConnection;

/// Schema of the catalog, embedded from the `migrations` directory.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

#[derive(Clone)]
pub struct Pool {
  pool: sqlx::PgPool,
  readonly: bool,
}

impl Pool {
  pub(crate) async fn new(
    global_cfg: &config::Database,
    pool_cfg: &config::DbPoolConfig,
  ) -> Result<Self> {
    let pool = Self::new_lazy(global_cfg, pool_cfg)?;
    match pool.wait_until_healthy().await {
      Ok(..) => {},
      Err(err) if err.is_unhealthy() => {
        tracing::warn!("Database pool is not healthy yet, continuing anyway");
      },
      Err(err) => return Err(err),
    }
    Ok(pool)
  }

  /// Builds the pool without establishing any connection. The
  /// first query made with it is the one that connects.
  pub(crate) fn new_lazy(
    global_cfg: &config::Database,
    pool_cfg: &config::DbPoolConfig,
  ) -> Result<Self> {
    let mut pool_opts = PgPoolOptions::new()
      .acquire_timeout(Duration::from_secs(global_cfg.timeout_secs.get()))
      .max_connections(pool_cfg.pool_size.get());

    if let Some(min_idle) = pool_cfg.min_idle {
      pool_opts = pool_opts.min_connections(min_idle.get());
    }

    Ok(Self {
      pool: pool_opts.connect_lazy_with(Self::connect_options(global_cfg, pool_cfg)?),
      readonly: pool_cfg.readonly,
    })
  }

  fn connect_options(
    global_cfg: &config::Database,
    pool_cfg: &config::DbPoolConfig,
  ) -> Result<PgConnectOptions> {
    let mut connect_opts =
      PgConnectOptions::from_str(pool_cfg.url.as_str()).change_context(Error::InvalidUrl)?;

    if global_cfg.enforce_tls {
      connect_opts = connect_opts.ssl_mode(PgSslMode::Require);
    }

    if pool_cfg.readonly {
      connect_opts = connect_opts.options([("default_transaction_read_only", "on")]);
    }

    Ok(connect_opts)
  }
}

impl From<sqlx::PgPool> for Pool {
  fn from(pool: sqlx::PgPool) -> Self {
    Self {
      pool,
      readonly: false,
    }
  }
}

impl std::fmt::Debug for Pool {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    self.pool.fmt(f)
  }
}

impl Pool {
  #[inline(always)]
  pub fn connections(&self) -> u32 {
    self.pool.size()
  }

  #[inline(always)]
  pub fn is_healthy(&self) -> bool {
    self.connections() > 0
  }

  #[inline(always)]
  pub fn is_readonly(&self) -> bool {
    self.readonly
  }

  #[tracing::instrument(name = "db.transaction", skip(self))]
  pub async fn begin(&self) -> Result<Transaction<'static>> {
    if self.readonly {
      return Err(Report::new(Error::Readonly));
    }
    self.pool.begin().await.into_db_error()
  }

  #[tracing::instrument(name = "db.connect", skip(self))]
  pub async fn get(&self) -> Result<PoolConnection> {
    if let Some(inner) = self.pool.try_acquire() {
      Ok(inner)
    } else {
      self.pool.acquire().await.into_db_error()
    }
  }

  #[tracing::instrument(skip(self))]
  pub async fn wait_until_healthy(&self) -> Result<()> {
    match self.pool.acquire().await {
      Ok(..) => Ok(()),
      Err(e) if !self.is_healthy() => Err(Report::new(e).change_context(Error::UnhealthyPool)),
      Err(err) => Err(Report::new(Error::Internal(err))),
    }
  }

  /// Applies every pending migration of [`MIGRATOR`].
  #[tracing::instrument(name = "db.migrate", skip(self))]
  pub async fn migrate(&self) -> Result<()> {
    MIGRATOR
      .run(&self.pool)
      .await
      .change_context(Error::Migration)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn database_config(enforce_tls: bool) -> config::Database {
    serde_json::from_value(serde_json::json!({
      "primary": { "url": "postgres://localhost/bookshelf?sslmode=disable" },
      "enforce_tls": enforce_tls,
    }))
    .unwrap()
  }

  #[test]
  fn test_enforce_tls_requires_encryption() {
    let config = database_config(true);
    let options = Pool::connect_options(&config, &config.primary).unwrap();
    assert!(matches!(options.get_ssl_mode(), PgSslMode::Require));

    let config = database_config(false);
    let options = Pool::connect_options(&config, &config.primary).unwrap();
    assert!(matches!(options.get_ssl_mode(), PgSslMode::Disable));
  }
}
