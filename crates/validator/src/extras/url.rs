use url::Url;

#[must_use]
pub fn validate_url(url: &str) -> bool {
  Url::parse(url).is_ok()
}

/// Like [`validate_url`] but only accepts `http` and `https` links,
/// which is what gets shown to people as clickable links.
#[must_use]
pub fn validate_http_url(url: &str) -> bool {
  Url::parse(url).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
}
