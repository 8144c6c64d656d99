//! Helpers for logging, dates, and output directories.

use crate::error::ConfigError;
use chrono::{Days, NaiveDate};
use std::io;
use std::path::Path;
use tokio::fs;
use tracing::{debug, instrument};

/// Truncate a string for logging purposes.
///
/// Keeps at most `max` characters and appends `"…(+N bytes)"` with the
/// number of bytes cut off. Cuts on a character boundary, so multi-byte text
/// is safe.
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}…(+{} bytes)", &s[..cut], s.len() - cut),
    }
}

/// Every date from `start` to `end`, both included. Empty when `start > end`.
pub fn date_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|d| *d <= end).collect()
}

/// The `days` most recent dates ending at `today`, oldest first.
///
/// # Arguments
///
/// * `today` - Last date of the window, included
/// * `days` - Window length; `0` yields an empty list
///
/// # Errors
///
/// [`ConfigError::Invalid`] when the window would start before the earliest
/// representable date.
pub fn recent_days(today: NaiveDate, days: u32) -> Result<Vec<NaiveDate>, ConfigError> {
    if days == 0 {
        return Ok(Vec::new());
    }
    let start = today
        .checked_sub_days(Days::new(u64::from(days) - 1))
        .ok_or_else(|| ConfigError::Invalid(format!("{days} days before {today} is out of range")))?;
    Ok(date_range(start, today))
}

/// Create `path` if missing and check that files can be written in it.
///
/// The check writes an empty marker file and removes it again, so a
/// read-only mount or missing permission surfaces before any scraping.
#[instrument(level = "info", skip_all, fields(%path))]
pub async fn ensure_writable_dir(path: &str) -> io::Result<()> {
    fs::create_dir_all(path).await?;
    let marker = Path::new(path).join(format!(".lumina_news_write_check_{}", std::process::id()));
    fs::write(&marker, b"").await?;
    fs::remove_file(&marker).await?;
    debug!("Output directory is writable");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_truncate_for_log_short_string() {
        assert_eq!(truncate_for_log("Hello, world!", 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_multibyte() {
        // 3 bytes per character
        let result = truncate_for_log("新闻联播正文", 2);
        assert_eq!(result, "新闻…(+12 bytes)");
    }

    #[test]
    fn test_date_range_inclusive() {
        let days = date_range(d(2024, 2, 27), d(2024, 3, 1));
        assert_eq!(days, vec![d(2024, 2, 27), d(2024, 2, 28), d(2024, 2, 29), d(2024, 3, 1)]);
        assert_eq!(date_range(d(2024, 1, 1), d(2024, 1, 1)), vec![d(2024, 1, 1)]);
        assert!(date_range(d(2024, 1, 2), d(2024, 1, 1)).is_empty());
    }

    #[test]
    fn test_recent_days() {
        let days = recent_days(d(2025, 1, 2), 3).unwrap();
        assert_eq!(days, vec![d(2024, 12, 31), d(2025, 1, 1), d(2025, 1, 2)]);
        assert!(recent_days(d(2025, 1, 2), 0).unwrap().is_empty());
    }

    #[test]
    fn test_recent_days_out_of_range() {
        let err = recent_days(d(2025, 1, 2), u32::MAX).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[tokio::test]
    async fn test_ensure_writable_dir_creates_missing() {
        let dir = std::env::temp_dir().join(format!("lumina_news_utils_{}", std::process::id()));
        let path = dir.join("nested").to_string_lossy().to_string();
        ensure_writable_dir(&path).await.unwrap();
        assert!(Path::new(&path).is_dir());
        // marker file is cleaned up
        assert_eq!(std::fs::read_dir(&path).unwrap().count(), 0);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
