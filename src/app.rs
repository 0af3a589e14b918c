use error_stack::{Result, ResultExt};
use std::{sync::Arc, time::Duration};
use thiserror::Error;
use tracing::Instrument;

use crate::{
  config,
  database::{self, ErrorExt2},
  schema::UserStats,
  stats::Activity,
};

#[derive(Debug, Clone)]
pub struct App {
  pub config: Arc<config::Server>,
  pub primary_db: database::Pool,
  pub replica_db: Option<database::Pool>,
}

#[derive(Debug, Error)]
#[error("Failed to initialize App struct")]
pub struct Error;

impl App {
  #[tracing::instrument(skip_all)]
  pub async fn new(cfg: config::Server) -> Result<Self, Error> {
    let primary_db = database::Pool::new(&cfg.db, &cfg.db.primary)
      .await
      .change_context(Error)?;

    let replica_db = if let Some(replica) = cfg.db.replica.as_ref() {
      let pool = database::Pool::new(&cfg.db, replica)
        .await
        .change_context(Error)?;

      Some(pool)
    } else {
      None
    };

    if cfg.db.run_migrations {
      primary_db.migrate().await.change_context(Error)?;
      tracing::info!("Database schema is up to date");
    }

    let app = Self {
      config: Arc::new(cfg),
      primary_db,
      replica_db,
    };

    Ok(app)
  }

  /// Builds the app without connecting to any database nor running
  /// migrations. Connections are made on first use.
  pub fn new_lazy(cfg: config::Server) -> Result<Self, Error> {
    let primary_db = database::Pool::new_lazy(&cfg.db, &cfg.db.primary).change_context(Error)?;
    let replica_db = cfg
      .db
      .replica
      .as_ref()
      .map(|replica| database::Pool::new_lazy(&cfg.db, replica))
      .transpose()
      .change_context(Error)?;

    Ok(Self {
      config: Arc::new(cfg),
      primary_db,
      replica_db,
    })
  }
}

impl App {
  #[tracing::instrument(skip_all)]
  pub async fn db_write(&self) -> Result<database::PoolConnection, database::Error> {
    self.primary_db.get().await
  }

  #[tracing::instrument(skip_all)]
  pub async fn db_read(&self) -> Result<database::PoolConnection, database::Error> {
    if let Some(replica) = self.replica_db.as_ref() {
      match replica.get().await {
        Ok(conn) => return Ok(conn),
        // fallback
        Err(err) if err.is_unhealthy() => {},
        Err(err) => return Err(err),
      }
    }
    self.primary_db.get().await
  }

  #[tracing::instrument(skip_all)]
  pub async fn db_read_prefer_primary(
    &self,
  ) -> Result<database::PoolConnection, database::Error> {
    match (self.primary_db.get().await, self.replica_db.as_ref()) {
      (Ok(conn), ..) => Ok(conn),
      (Err(e), Some(readonly_replica)) if e.is_unhealthy() => readonly_replica.get().await,
      (Err(e), ..) => Err(e),
    }
  }
}

impl App {
  /// Recomputes in the background the stats of every user affected
  /// by the activity.
  ///
  /// Each recomputation runs on its own task under the configured
  /// deadline. Failures are logged and never retried, the request
  /// that scheduled them has already been answered by then.
  #[tracing::instrument(skip(self))]
  pub fn schedule_stats_refresh(&self, activity: Activity) {
    let timeout = Duration::from_secs(self.config.stats.timeout_secs.get());
    for user_id in activity.affected_users() {
      let pool = self.primary_db.clone();
      let task = async move {
        match tokio::time::timeout(timeout, UserStats::recompute(&pool, user_id)).await {
          Ok(Ok(stats)) => tracing::debug!(?stats, "Refreshed user stats"),
          Ok(Err(error)) => tracing::warn!(?error, "Failed to refresh user stats"),
          Err(..) => tracing::warn!(?timeout, "Refreshing user stats took too long"),
        }
      };
      actix_web::rt::spawn(task.instrument(tracing::info_span!("stats.refresh", %user_id)));
    }
  }
}

#[cfg(test)]
pub(crate) mod tests {
  use super::*;

  /// App pointing at a database that is never connected to.
  pub(crate) fn lazy_app() -> App {
    let cfg: config::Server = serde_json::from_value(serde_json::json!({
      "db": {
        "primary": { "url": "postgres://bookshelf@localhost:5432/bookshelf" },
        "timeout_secs": 1,
      },
    }))
    .unwrap();

    App::new_lazy(cfg).unwrap()
  }

  #[actix_web::test]
  async fn test_new_lazy_uses_config() {
    let app = lazy_app();
    assert!(app.replica_db.is_none());
    assert!(!app.primary_db.is_readonly());
    assert_eq!(app.primary_db.connections(), 0);
    assert!(app.config.db.run_migrations);
  }
}
