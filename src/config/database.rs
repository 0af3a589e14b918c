use serde::Deserialize;
use std::num::{NonZeroU32, NonZeroU64};
use validator::{Validate, ValidateError};

use crate::util::Sensitive;

#[derive(Debug, Deserialize, Validate)]
pub struct Database {
    /// Writable primary database.
    #[validate(nested)]
    pub primary: DbPoolConfig,
    /// A read-only replica database used for accessing the data
    /// without interacting with the main database.
    #[validate(nested, optional)]
    pub replica: Option<DbPoolConfig>,
    /// Refuses to connect to any database that cannot encrypt the
    /// connection with TLS. If disabled, the `sslmode` of the
    /// connection URL applies (TLS only when the server offers it,
    /// by default).
    ///
    /// **Environment variables**:
    /// - `BOOKSHELF_DB_ENFORCE_TLS`
    #[serde(default = "Database::default_enforce_tls")]
    pub enforce_tls: bool,
    /// How long this server can wait until its time limit where the
    /// database connection takes a while to acknowledge or
    /// successfully established.
    ///
    /// **Environment variables**:
    /// - `BOOKSHELF_DB_TIMEOUT_SECS`
    #[serde(default = "Database::default_timeout_secs")]
    pub timeout_secs: NonZeroU64,
    /// Applies the bundled schema to the primary database before
    /// the server starts accepting requests.
    ///
    /// **Environment variables**:
    /// - `BOOKSHELF_DB_RUN_MIGRATIONS`
    #[serde(default = "Database::default_run_migrations")]
    pub run_migrations: bool,
}

impl Database {
    const DEFAULT_TIMEOUT_SECS: u64 = 5;

    const fn default_enforce_tls() -> bool {
        true
    }

    const fn default_run_migrations() -> bool {
        true
    }

    const fn default_timeout_secs() -> NonZeroU64 {
        match NonZeroU64::new(Self::DEFAULT_TIMEOUT_SECS) {
            Some(n) => n,
            None => panic!("DEFAULT_TIMEOUT_SECS is accidentally set to 0"),
        }
    }
}

/// Configuration for connecting to any Postgres database
#[derive(Debug, Deserialize)]
pub struct DbPoolConfig {
    /// Database pool must be in read-only mode.
    ///
    /// **Environment variables**:
    /// - `BOOKSHELF_DB_PRIMARY_READONLY`
    /// - `BOOKSHELF_DB_REPLICA_READONLY`
    #[serde(default)]
    pub readonly: bool,
    /// Minimum idle database connections just to avoid wasting
    /// hardware resources from the database server.
    ///
    /// **Environment variables**:
    /// - `BOOKSHELF_DB_PRIMARY_MIN_IDLE`
    /// - `BOOKSHELF_DB_REPLICA_MIN_IDLE`
    pub min_idle: Option<NonZeroU32>,
    /// Maximum amount of pool size that database can handle
    ///
    /// **Environment variables**:
    /// - `BOOKSHELF_DB_PRIMARY_POOL_SIZE`
    /// - `BOOKSHELF_DB_REPLICA_POOL_SIZE`
    #[serde(default = "DbPoolConfig::default_pool_size")]
    pub pool_size: NonZeroU32,
    /// Connection URL connecting to the Postgres database.
    ///
    /// **Environment variables**:
    /// - `BOOKSHELF_DB_PRIMARY_URL` or `DATABASE_URL`
    /// - `BOOKSHELF_DB_REPLICA_URL`
    pub url: Sensitive<String>,
}

impl DbPoolConfig {
    const DEFAULT_POOL_SIZE: u32 = 5;

    // Required by serde
    const fn default_pool_size() -> NonZeroU32 {
        match NonZeroU32::new(Self::DEFAULT_POOL_SIZE) {
            Some(n) => n,
            None => panic!("DEFAULT_POOL_SIZE is accidentally set to 0"),
        }
    }
}

// `min_idle` is checked against `pool_size`, which the derive
// cannot express.
impl Validate for DbPoolConfig {
    fn validate(&self) -> Result<(), ValidateError> {
        let mut fields = ValidateError::field_builder();
        if !validator::extras::validate_url(self.url.as_str()) {
            fields.insert_message("url", "Invalid Postgres connection URL");
        }
        if self
            .min_idle
            .is_some_and(|min_idle| min_idle > self.pool_size)
        {
            fields.insert_message("min_idle", "Minimum idle connections exceed the pool size");
        }
        fields.build().into_result()
    }
}
