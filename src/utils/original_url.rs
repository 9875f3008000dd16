//! Validation of short-link target URLs.

use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum UrlError {
    #[error("invalid URL: {0}")]
    Parse(#[from] url::ParseError),

    #[error("unsupported scheme '{0}', expected http or https")]
    UnsupportedScheme(String),
}

/// Checks that a short-link target is an absolute http(s) URL and returns
/// it in serialized form.
pub fn validate_original_url(raw: &str) -> Result<String, UrlError> {
    let parsed = Url::parse(raw)?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed.to_string()),
        other => Err(UrlError::UnsupportedScheme(other.to_string())),
    }
}
