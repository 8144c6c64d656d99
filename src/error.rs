//! Error types for fetching and configuration.
//!
//! Library code returns these typed errors; the binary folds them into
//! `Box<dyn Error>` at its boundary.

use thiserror::Error;

/// A failed network call or an unusable response.
///
/// Raised by [`crate::scrapers::xwlb::NewsScraper::fetch_news_list`] and
/// [`crate::scrapers::xwlb::NewsScraper::fetch_news_content`]. Nothing in the
/// crate retries on it.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Connection failure, timeout, or an undecodable body.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status code.
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// The body arrived but did not have the expected shape.
    #[error("could not parse {url}: {reason}")]
    Parse { url: String, reason: String },
}

impl FetchError {
    pub fn parse(url: impl Into<String>, reason: impl Into<String>) -> Self {
        FetchError::Parse {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

/// Problems loading or validating [`crate::config::ScraperConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML in config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message() {
        let e = FetchError::Status {
            url: "https://tv.cctv.com/lm/xwlb/day/20251105.shtml".to_string(),
            status: 404,
        };
        assert_eq!(
            e.to_string(),
            "https://tv.cctv.com/lm/xwlb/day/20251105.shtml returned HTTP 404"
        );
    }

    #[test]
    fn test_parse_helper() {
        let e = FetchError::parse("https://example.com/a", "no #content_area");
        assert!(matches!(e, FetchError::Parse { .. }));
        assert!(e.to_string().contains("no #content_area"));
    }

    #[test]
    fn test_config_error_from_yaml() {
        let yaml_err = serde_yaml::from_str::<Vec<u32>>("{not: [a list").unwrap_err();
        let e: ConfigError = yaml_err.into();
        assert!(e.to_string().starts_with("invalid YAML in config"));
    }
}
