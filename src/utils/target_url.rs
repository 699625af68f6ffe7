//! Validation of redirect targets.
//!
//! Targets are stored exactly as submitted (minus surrounding whitespace) so
//! a redirect returns the same string the owner shortened.

use url::Url;

/// Longest target URL accepted, in bytes.
pub const MAX_URL_LENGTH: usize = 2048;

/// Reasons a submitted target URL is rejected.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TargetUrlError {
    #[error("URL must not be empty")]
    Empty,

    #[error("URL is longer than {MAX_URL_LENGTH} characters")]
    TooLong,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,
}

/// Checks that `input` is an absolute `http`/`https` URL with a host and
/// returns the trimmed original string.
///
/// Rejects schemes such as `javascript:`, `data:` and `file:`.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(validate_target_url(" https://example.com ").unwrap(), "https://example.com");
/// assert!(validate_target_url("ftp://example.com").is_err());
/// ```
pub fn validate_target_url(input: &str) -> Result<String, TargetUrlError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(TargetUrlError::Empty);
    }
    if trimmed.len() > MAX_URL_LENGTH {
        return Err(TargetUrlError::TooLong);
    }

    let url = Url::parse(trimmed).map_err(|e| TargetUrlError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(TargetUrlError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(TargetUrlError::MissingHost);
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_https() {
        assert_eq!(
            validate_target_url("https://example.com").unwrap(),
            "https://example.com"
        );
    }

    #[test]
    fn test_keeps_url_verbatim() {
        let url = "https://Example.com:443/Path?q=1#frag";
        assert_eq!(validate_target_url(url).unwrap(), url);
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(
            validate_target_url("  http://example.com/a  ").unwrap(),
            "http://example.com/a"
        );
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(validate_target_url("   "), Err(TargetUrlError::Empty));
    }

    #[test]
    fn test_rejects_relative() {
        assert!(matches!(
            validate_target_url("example.com/path"),
            Err(TargetUrlError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_rejects_dangerous_schemes() {
        for url in [
            "javascript:alert(1)",
            "data:text/html,hi",
            "file:///etc/passwd",
            "ftp://example.com",
        ] {
            assert_eq!(
                validate_target_url(url),
                Err(TargetUrlError::UnsupportedProtocol),
                "{url}"
            );
        }
    }

    #[test]
    fn test_rejects_too_long() {
        let url = format!("https://example.com/{}", "a".repeat(MAX_URL_LENGTH));
        assert_eq!(validate_target_url(&url), Err(TargetUrlError::TooLong));
    }
}
