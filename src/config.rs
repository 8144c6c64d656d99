//! Scraper configuration.
//!
//! Settings come from an optional YAML file; every field has a default, so a
//! file only needs the keys it wants to change. CLI flags are applied on top
//! in `main`.
//!
//! ```yaml
//! base_url: "https://tv.cctv.com/lm/xwlb/day/"
//! link_filter: "cctv.com"
//! list_timeout_secs: 20
//! detail_timeout_secs: 10
//! delay_min_secs: 1.0
//! delay_max_secs: 3.0
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, instrument};

pub const DEFAULT_BASE_URL: &str = "https://tv.cctv.com/lm/xwlb/day/";
pub const DEFAULT_LINK_FILTER: &str = "cctv.com";
/// Upper limit for either delay bound. An hour between requests is already
/// far past any sensible pacing.
pub const MAX_DELAY_SECS: f64 = 3600.0;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Runtime settings for [`crate::scrapers::xwlb::NewsScraper`].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Listing endpoint prefix; the date page is `{base_url}{YYYYMMDD}.shtml`.
    pub base_url: String,
    /// Substring an `<a href>` must contain to count as a news item link.
    pub link_filter: String,
    pub user_agent: String,
    /// Client-wide timeout, also used for the listing request.
    pub list_timeout_secs: u64,
    /// Per-request timeout for article detail pages.
    pub detail_timeout_secs: u64,
    pub delay_min_secs: f64,
    pub delay_max_secs: f64,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            link_filter: DEFAULT_LINK_FILTER.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            list_timeout_secs: 20,
            detail_timeout_secs: 10,
            delay_min_secs: 1.0,
            delay_max_secs: 3.0,
        }
    }
}

impl ScraperConfig {
    /// Load and validate a YAML config file.
    #[instrument(level = "info", skip_all, fields(%path))]
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        let config = Self::from_yaml(&raw)?;
        info!(base_url = %config.base_url, "Loaded scraper configuration");
        Ok(config)
    }

    pub fn from_yaml(raw: &str) -> Result<Self, ConfigError> {
        // An empty file deserializes to `null`, which means "all defaults".
        let config: ScraperConfig = if raw.trim().is_empty() {
            ScraperConfig::default()
        } else {
            serde_yaml::from_str(raw)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("base_url must not be empty".into()));
        }
        if url::Url::parse(&self.base_url).is_err() {
            return Err(ConfigError::Invalid(format!(
                "base_url is not an absolute URL: {}",
                self.base_url
            )));
        }
        if self.link_filter.is_empty() {
            return Err(ConfigError::Invalid("link_filter must not be empty".into()));
        }
        if self.list_timeout_secs == 0 || self.detail_timeout_secs == 0 {
            return Err(ConfigError::Invalid("timeouts must be at least 1 second".into()));
        }
        if !self.delay_min_secs.is_finite()
            || !self.delay_max_secs.is_finite()
            || self.delay_min_secs < 0.0
        {
            return Err(ConfigError::Invalid(
                "delay bounds must be finite and non-negative".into(),
            ));
        }
        if self.delay_max_secs > MAX_DELAY_SECS {
            return Err(ConfigError::Invalid(format!(
                "delay_max_secs ({}) exceeds the {} second limit",
                self.delay_max_secs, MAX_DELAY_SECS
            )));
        }
        if self.delay_min_secs > self.delay_max_secs {
            return Err(ConfigError::Invalid(format!(
                "delay_min_secs ({}) exceeds delay_max_secs ({})",
                self.delay_min_secs, self.delay_max_secs
            )));
        }
        Ok(())
    }

    pub fn list_timeout(&self) -> Duration {
        Duration::from_secs(self.list_timeout_secs)
    }

    pub fn detail_timeout(&self) -> Duration {
        Duration::from_secs(self.detail_timeout_secs)
    }

    /// Delay bounds as durations.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] when either bound is negative, not finite, or
    /// too large for a [`Duration`]. A config that passed [`Self::validate`]
    /// never fails here.
    pub fn delay_bounds(&self) -> Result<(Duration, Duration), ConfigError> {
        let to_duration = |name: &str, secs: f64| {
            Duration::try_from_secs_f64(secs)
                .map_err(|e| ConfigError::Invalid(format!("{name} ({secs}): {e}")))
        };
        Ok((
            to_duration("delay_min_secs", self.delay_min_secs)?,
            to_duration("delay_max_secs", self.delay_max_secs)?,
        ))
    }
}
