//! JSON output of scraped days.
//!
//! One file per broadcast date:
//! ```text
//! json_output_dir/
//! ├── 2025-11-04.json
//! └── 2025-11-05.json
//! ```
//!
//! The presence of a date's file is what backfill runs use to decide that a
//! day is already done.

use crate::models::DailyNews;
use chrono::NaiveDate;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

/// Path of the JSON file for `date` under `json_output_dir`.
pub fn daily_news_path(json_output_dir: &str, date: NaiveDate) -> PathBuf {
    Path::new(json_output_dir).join(format!("{}.json", date.format("%Y-%m-%d")))
}

pub async fn daily_news_exists(json_output_dir: &str, date: NaiveDate) -> bool {
    fs::try_exists(daily_news_path(json_output_dir, date))
        .await
        .unwrap_or(false)
}

/// Write a [`DailyNews`] as pretty JSON to `{json_output_dir}/{date}.json`.
///
/// Creates the directory when it does not exist and overwrites an existing
/// file for the same date.
///
/// # Arguments
///
/// * `daily` - The scraped day to serialize
/// * `json_output_dir` - Target directory
///
/// # Returns
///
/// The path of the written file.
#[instrument(level = "info", skip_all, fields(%json_output_dir, date = %daily.news_date))]
pub async fn write_daily_news(daily: &DailyNews, json_output_dir: &str) -> Result<PathBuf, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(daily)?;

    if let Err(e) = fs::create_dir_all(json_output_dir).await {
        error!(error = %e, "Failed to create JSON dir");
        return Err(e.into());
    }

    let path = daily_news_path(json_output_dir, daily.news_date);
    fs::write(&path, json).await?;
    info!(path = %path.display(), articles = daily.articles.len(), "Wrote daily news JSON");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewsArticle, NewsListItem};

    fn temp_dir(tag: &str) -> String {
        std::env::temp_dir()
            .join(format!("lumina_news_json_{}_{}", tag, std::process::id()))
            .to_string_lossy()
            .to_string()
    }

    #[test]
    fn test_daily_news_path() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 9).unwrap();
        assert_eq!(
            daily_news_path("/tmp/out", date),
            PathBuf::from("/tmp/out/2025-01-09.json")
        );
    }

    #[tokio::test]
    async fn test_write_daily_news_round_trips() {
        let dir = temp_dir("write");
        let date = NaiveDate::from_ymd_opt(2025, 11, 5).unwrap();
        assert!(!daily_news_exists(&dir, date).await);

        let item = NewsListItem {
            title: "标题".to_string(),
            url: "https://tv.cctv.com/x.shtml".to_string(),
            news_date: date,
        };
        let daily = DailyNews::new(date, vec![NewsArticle::fetched(item, "正文".into())]);
        let path = write_daily_news(&daily, &dir).await.unwrap();

        assert!(path.ends_with("2025-11-05.json"));
        assert!(daily_news_exists(&dir, date).await);
        let raw = std::fs::read_to_string(&path).unwrap();
        let back: DailyNews = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, daily);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
