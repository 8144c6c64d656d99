//! # Lumina News
//!
//! Scrapes the daily CCTV Xinwen Lianbo (新闻联播) broadcast: the listing of a
//! date's news items, then each item's article text.
//!
//! ## Architecture
//!
//! 1. **Listing**: fetch `…/lm/xwlb/day/YYYYMMDD.shtml` and parse the items
//! 2. **Detail**: fetch each item's page one at a time, pausing in between
//! 3. **Output**: hand the articles to the caller, or write them as JSON
//!
//! The HTTP client is built lazily and shared by `Arc`; whoever creates it
//! also closes it. Pauses between requests come from an injectable
//! [`delay::DelayPolicy`].
//!
//! ```no_run
//! use lumina_news::{config::ScraperConfig, scrapers::xwlb::NewsScraper};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let scraper = NewsScraper::from_config(ScraperConfig::default())?;
//! let date = chrono::NaiveDate::from_ymd_opt(2025, 11, 5).unwrap();
//! let articles = scraper.scrape_daily_news(date).await?;
//! println!("{} articles", articles.len());
//! scraper.close().await;
//! # Ok(())
//! # }
//! ```

pub mod backfill;
pub mod cli;
pub mod config;
pub mod delay;
pub mod error;
pub mod http;
pub mod models;
pub mod outputs;
pub mod scrapers;
pub mod utils;
