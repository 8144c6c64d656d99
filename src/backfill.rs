//! Multi-day scraping with resume.
//!
//! A backfill walks a date range oldest first. Days whose JSON file already
//! exists are skipped, so an interrupted run can simply be started again.
//! A day that fails is logged and counted; the run goes on with the next day.

use crate::error::ConfigError;
use crate::models::DailyNews;
use crate::outputs::json::{daily_news_exists, write_daily_news};
use crate::scrapers::xwlb::NewsScraper;
use crate::utils::date_range;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{error, info, instrument, warn};

/// Per-day outcome counts of a backfill run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BackfillStats {
    /// Scraped and written.
    pub success: usize,
    /// Already on disk.
    pub skipped: usize,
    /// Listing reported no items; nothing written.
    pub empty: usize,
    /// Listing fetch or write failed.
    pub failed: usize,
}

impl BackfillStats {
    pub fn total(&self) -> usize {
        self.success + self.skipped + self.empty + self.failed
    }
}

/// Scrape every day from `start` to `end` inclusive into `json_output_dir`.
///
/// Rejects `start > end` before touching the network. Closing the scraper's
/// HTTP client is left to the caller.
///
/// # Arguments
///
/// * `scraper` - Scraper whose client and delay policy are used for every day
/// * `start` - First date, included
/// * `end` - Last date, included
/// * `json_output_dir` - Directory holding one `{date}.json` per finished day
///
/// # Returns
///
/// Per-day counts; a failed day is counted, never returned as an error.
///
/// # Errors
///
/// [`ConfigError::Invalid`] when `start` is after `end`.
pub async fn run(
    scraper: &NewsScraper,
    start: NaiveDate,
    end: NaiveDate,
    json_output_dir: &str,
) -> Result<BackfillStats, ConfigError> {
    if start > end {
        return Err(ConfigError::Invalid(format!(
            "backfill start {} is after end {}",
            start, end
        )));
    }
    Ok(run_dates(scraper, &date_range(start, end), json_output_dir).await)
}

/// Scrape the given dates in order, skipping those already written.
#[instrument(level = "info", skip_all, fields(days = dates.len(), %json_output_dir))]
pub async fn run_dates(scraper: &NewsScraper, dates: &[NaiveDate], json_output_dir: &str) -> BackfillStats {
    let mut stats = BackfillStats::default();
    let mut fetched_any = false;

    for &date in dates {
        if daily_news_exists(json_output_dir, date).await {
            info!(%date, "Already scraped; skipping");
            stats.skipped += 1;
            continue;
        }

        // pace consecutive listing requests like detail requests
        if fetched_any {
            scraper.pause().await;
        }
        fetched_any = true;

        match scraper.scrape_daily_news(date).await {
            Ok(articles) if articles.is_empty() => {
                warn!(%date, "No news items for date");
                stats.empty += 1;
            }
            Ok(articles) => {
                let daily = DailyNews::new(date, articles);
                let failed_articles = daily.failed_count();
                match write_daily_news(&daily, json_output_dir).await {
                    Ok(_) => {
                        info!(%date, articles = daily.articles.len(), failed_articles, "Day scraped");
                        stats.success += 1;
                    }
                    Err(e) => {
                        error!(%date, error = %e, "Failed to write day");
                        stats.failed += 1;
                    }
                }
            }
            Err(e) => {
                error!(%date, error = %e, "Failed to scrape day");
                stats.failed += 1;
            }
        }
    }

    info!(
        success = stats.success,
        skipped = stats.skipped,
        empty = stats.empty,
        failed = stats.failed,
        "Backfill complete"
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScraperConfig;
    use crate::delay::NoDelay;
    use crate::http::HttpClient;
    use crate::models::{NewsArticle, NewsListItem};
    use std::sync::Arc;
    use std::time::Duration;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, day).unwrap()
    }

    fn temp_dir(tag: &str) -> String {
        std::env::temp_dir()
            .join(format!("lumina_news_backfill_{}_{}", tag, std::process::id()))
            .to_string_lossy()
            .to_string()
    }

    fn scraper_for(server: &mockito::ServerGuard) -> NewsScraper {
        let config = ScraperConfig {
            base_url: format!("{}/day/", server.url()),
            link_filter: server.host_with_port(),
            ..ScraperConfig::default()
        };
        let http = Arc::new(HttpClient::new("lumina-test", Duration::from_secs(5)));
        NewsScraper::new(http, config, Arc::new(NoDelay))
    }

    #[tokio::test]
    async fn test_rejects_inverted_range() {
        let scraper = NewsScraper::from_config(ScraperConfig::default()).unwrap();
        let err = run(&scraper, d(5), d(4), "/tmp/unused").await.unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(!scraper.http().is_initialized().await);
    }

    #[tokio::test]
    async fn test_skips_existing_and_counts_failures() {
        let mut server = mockito::Server::new_async().await;
        let base = server.url();
        let dir = temp_dir("mixed");
        let _ = std::fs::remove_dir_all(&dir);

        // 11-03 already on disk
        let existing = DailyNews::new(
            d(3),
            vec![NewsArticle::fetched(
                NewsListItem {
                    title: "旧".into(),
                    url: format!("{base}/old.shtml"),
                    news_date: d(3),
                },
                "旧正文".into(),
            )],
        );
        write_daily_news(&existing, &dir).await.unwrap();

        // 11-04 scrapes fine
        let _list4 = server
            .mock("GET", "/day/20251104.shtml")
            .with_status(200)
            .with_body(format!(
                r#"<ul><li><a href="{base}/n1.shtml" title="新闻一"></a></li></ul>"#
            ))
            .create_async()
            .await;
        let _n1 = server
            .mock("GET", "/n1.shtml")
            .with_status(200)
            .with_body(r#"<div id="content_area"><p>内容</p></div>"#)
            .create_async()
            .await;
        // 11-05 listing is down
        let _list5 = server
            .mock("GET", "/day/20251105.shtml")
            .with_status(502)
            .create_async()
            .await;
        // 11-06 has nothing yet
        let _list6 = server
            .mock("GET", "/day/20251106.shtml")
            .with_status(200)
            .with_body("<ul></ul>")
            .create_async()
            .await;

        let scraper = scraper_for(&server);
        let stats = run(&scraper, d(3), d(6), &dir).await.unwrap();
        scraper.close().await;

        assert_eq!(
            stats,
            BackfillStats {
                success: 1,
                skipped: 1,
                empty: 1,
                failed: 1
            }
        );
        assert_eq!(stats.total(), 4);
        assert!(daily_news_exists(&dir, d(4)).await);
        assert!(!daily_news_exists(&dir, d(5)).await);
        assert!(!daily_news_exists(&dir, d(6)).await);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
