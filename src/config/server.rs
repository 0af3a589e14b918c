use error_stack::{Report, Result, ResultExt};
use serde::Deserialize;
use std::num::NonZeroU64;
use validator::Validate;

use super::ParseError;
use crate::util::{figment::FigmentErrorAttachable, validator::IntoValidatorReport};

#[derive(Debug, Deserialize, Validate)]
pub struct Server {
    #[validate(nested)]
    pub db: super::Database,
    #[serde(default)]
    #[validate(nested)]
    pub http: super::Http,
    #[serde(default)]
    pub log: super::Logging,
    #[serde(default)]
    pub stats: Stats,
}

/// Settings for the background recalculation of user statistics.
#[derive(Debug, Deserialize)]
pub struct Stats {
    /// Deadline of one recalculation (all counts and the final
    /// write). A recalculation that runs over it is rolled back.
    ///
    /// **Environment variables**:
    /// - `BOOKSHELF_STATS_TIMEOUT_SECS`
    #[serde(default = "Stats::default_timeout_secs")]
    pub timeout_secs: NonZeroU64,
}

impl Stats {
    const DEFAULT_TIMEOUT_SECS: u64 = 10;

    const fn default_timeout_secs() -> NonZeroU64 {
        match NonZeroU64::new(Self::DEFAULT_TIMEOUT_SECS) {
            Some(n) => n,
            None => panic!("DEFAULT_TIMEOUT_SECS is accidentally set to 0"),
        }
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            timeout_secs: Self::default_timeout_secs(),
        }
    }
}

impl Server {
    pub fn load() -> Result<Self, ParseError> {
        dotenvy::dotenv().ok();

        let config = Self::figment()
            .extract::<Self>()
            .map_err(|e| Report::new(ParseError).attach_figment_error(e))?;

        config
            .validate()
            .into_validator_report()
            .change_context(ParseError)?;

        Ok(config)
    }
}

impl Server {
    const DEFAULT_CONFIG_FILE: &'static str = "bookshelf.toml";

    /// Creates a default [`Figment`] object to load server
    /// configuration. This function is there for implementing
    /// [`Server::load`] and testing.
    ///
    /// [`Figment`]: figment::Figment
    pub(crate) fn figment() -> figment::Figment {
        use figment::{
            providers::{Env, Format, Toml},
            Figment,
        };

        Figment::new()
            .merge(Toml::file(Self::DEFAULT_CONFIG_FILE))
            // Fields with underscores in their names must be mapped
            // explicitly, otherwise they become nested keys.
            .merge(Env::prefixed("BOOKSHELF_").map(|v| match v.as_str() {
                "DB_PRIMARY_MIN_IDLE" => "db.primary.min_idle".into(),
                "DB_PRIMARY_POOL_SIZE" => "db.primary.pool_size".into(),

                "DB_REPLICA_MIN_IDLE" => "db.replica.min_idle".into(),
                "DB_REPLICA_POOL_SIZE" => "db.replica.pool_size".into(),

                "DB_ENFORCE_TLS" => "db.enforce_tls".into(),
                "DB_TIMEOUT_SECS" => "db.timeout_secs".into(),
                "DB_RUN_MIGRATIONS" => "db.run_migrations".into(),

                "HTTP_CORS_ORIGINS" => "http.cors_origins".into(),
                "STATS_TIMEOUT_SECS" => "stats.timeout_secs".into(),

                _ => v.as_str().replace('_', ".").into(),
            }))
            // Environment variable aliases
            .merge(Env::raw().only(&["DATABASE_URL"]).map(|_| "db.primary.url".into()))
    }
}
