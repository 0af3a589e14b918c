use error_stack::{Result, ResultExt};
use thiserror::Error;
use tracing::{level_filters::LevelFilter, Subscriber};
use tracing_error::ErrorLayer;
use tracing_subscriber::{layer::SubscriberExt, registry::LookupSpan, EnvFilter, Layer};

use crate::config::{Logging, LoggingStyle};

#[derive(Debug, Error)]
#[error("Failed to initialize tracing")]
pub struct TracingInitError;

/// Installs the global subscriber. `RUST_LOG` takes precedence over
/// the targets from the configuration.
pub fn init(config: &Logging) -> Result<(), TracingInitError> {
    let env_targets = std::env::var("RUST_LOG").ok();
    let targets = env_targets.as_deref().unwrap_or(&config.targets);

    let registry = tracing_subscriber::Registry::default()
        .with(fmt_layer(config.style, targets))
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(registry)
        .change_context(TracingInitError)
        .attach_printable("already initialized tracing")?;

    if env_targets.is_some() {
        tracing::debug!("Using logging targets from `RUST_LOG`");
    }

    Ok(())
}

pub fn init_for_tests() {
    let targets = std::env::var("RUST_LOG").unwrap_or_default();
    let layer = tracing_subscriber::fmt::layer()
        .with_test_writer()
        .with_filter(make_env_filter(&targets));

    let registry = tracing_subscriber::Registry::default()
        .with(layer)
        .with(ErrorLayer::default());

    // every test calls this, only the first one wins
    _ = tracing::subscriber::set_global_default(registry);
}

fn fmt_layer<S>(style: LoggingStyle, targets: &str) -> Box<dyn Layer<S> + Send + Sync + 'static>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let layer = tracing_subscriber::fmt::layer();
    let filter = make_env_filter(targets);
    match style {
        LoggingStyle::Compact => layer.compact().with_filter(filter).boxed(),
        LoggingStyle::Full => layer.with_filter(filter).boxed(),
        LoggingStyle::Pretty => layer.pretty().with_filter(filter).boxed(),
    }
}

fn make_env_filter(targets: &str) -> EnvFilter {
    let default_level = if cfg!(debug_assertions) {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    EnvFilter::builder()
        .with_default_directive(default_level.into())
        .parse_lossy(targets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_env_filter() {
        let filter = make_env_filter("bookshelf=trace,sqlx=warn");
        let directives = filter.to_string();
        assert!(directives.contains("bookshelf=trace"));
        assert!(directives.contains("sqlx=warn"));
    }
}
