use serde::Deserialize;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoggingStyle {
    Compact,
    #[default]
    Full,
    Pretty,
}

#[derive(Debug, Deserialize)]
pub struct Logging {
    /// **Environment variables**:
    /// - `BOOKSHELF_LOG_STYLE`
    #[serde(default)]
    pub style: LoggingStyle,
    /// Filter directives in `tracing_subscriber::EnvFilter` syntax.
    /// `RUST_LOG` wins over this value if both are set.
    ///
    /// **Environment variables**:
    /// - `BOOKSHELF_LOG_TARGETS`
    #[serde(default = "Logging::default_targets")]
    pub targets: String,
}

impl Logging {
    fn default_targets() -> String {
        "info".into()
    }
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            style: LoggingStyle::default(),
            targets: Self::default_targets(),
        }
    }
}
