use serde::Deserialize;
use std::num::NonZeroUsize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct Http {
    /// **Environment variables**:
    /// - `BOOKSHELF_HTTP_HOST`
    #[serde(default = "Http::default_host")]
    pub host: String,
    /// **Environment variables**:
    /// - `BOOKSHELF_HTTP_PORT`
    #[serde(default = "Http::default_port")]
    pub port: u16,
    /// Amount of actix workers, defaults to the number of
    /// physical CPU cores if not set.
    ///
    /// **Environment variables**:
    /// - `BOOKSHELF_HTTP_WORKERS`
    pub workers: Option<NonZeroUsize>,
    /// Origins allowed to call the API from a browser.
    ///
    /// **Environment variables**:
    /// - `BOOKSHELF_HTTP_CORS_ORIGINS` (`["http://localhost:3000"]`)
    #[serde(default = "Http::default_cors_origins")]
    #[validate(with = "Http::are_valid_cors_origins", error = "Invalid CORS origin")]
    pub cors_origins: Vec<String>,
}

impl Http {
    fn default_host() -> String {
        "127.0.0.1".into()
    }

    const fn default_port() -> u16 {
        8000
    }

    /// Every origin must be `*` or an absolute `http(s)` URL.
    fn are_valid_cors_origins(origins: &[String]) -> bool {
        origins
            .iter()
            .all(|origin| origin == "*" || validator::extras::validate_http_url(origin))
    }

    fn default_cors_origins() -> Vec<String> {
        vec![
            "http://localhost:3000".into(),
            "http://127.0.0.1:3000".into(),
        ]
    }
}

impl Default for Http {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            workers: None,
            cors_origins: Self::default_cors_origins(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cors_origins_must_be_urls() {
        let mut config = Http::default();
        assert!(config.validate().is_ok());

        config.cors_origins = vec!["*".into()];
        assert!(config.validate().is_ok());

        config.cors_origins = vec!["https://books.example.com".into(), "localhost".into()];
        let error = config.validate().unwrap_err();
        assert_eq!(
            format!("{error:?}"),
            r#"{"cors_origins": {"_errors": ["Invalid CORS origin"]}}"#
        );
    }
}
