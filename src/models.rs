//! Data models for scraped news.
//!
//! This module defines the records produced by a scrape:
//! - [`NewsListItem`]: one entry of a day's listing page
//! - [`NewsArticle`]: a listing entry plus its fetched body and status
//! - [`DailyNews`]: every article of one date, the unit written to disk
//!
//! None of these carry identity; a scrape builds them and hands them to the
//! caller, who decides whether to keep them.

use chrono::{NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// One news item from the listing page of a date.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NewsListItem {
    pub title: String,
    /// Absolute URL of the detail page.
    pub url: String,
    pub news_date: NaiveDate,
}

/// Outcome of the detail fetch for one article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchStatus {
    Fetched,
    Failed,
}

/// A listing item combined with the result of its detail fetch.
///
/// When the fetch failed, `content` is empty, `status` is
/// [`FetchStatus::Failed`] and `error` holds the reason.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NewsArticle {
    pub news_date: NaiveDate,
    pub title: String,
    pub url: String,
    pub content: String,
    pub status: FetchStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl NewsArticle {
    pub fn fetched(item: NewsListItem, content: String) -> Self {
        Self {
            news_date: item.news_date,
            title: item.title,
            url: item.url,
            content,
            status: FetchStatus::Fetched,
            error: None,
        }
    }

    pub fn failed(item: NewsListItem, error: impl ToString) -> Self {
        Self {
            news_date: item.news_date,
            title: item.title,
            url: item.url,
            content: String::new(),
            status: FetchStatus::Failed,
            error: Some(error.to_string()),
        }
    }

    pub fn is_fetched(&self) -> bool {
        self.status == FetchStatus::Fetched
    }
}

/// All articles scraped for one broadcast date.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DailyNews {
    pub news_date: NaiveDate,
    /// RFC 3339 UTC timestamp of when the scrape finished.
    pub scraped_at: String,
    pub articles: Vec<NewsArticle>,
}

impl DailyNews {
    pub fn new(news_date: NaiveDate, articles: Vec<NewsArticle>) -> Self {
        Self {
            news_date,
            scraped_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            articles,
        }
    }

    pub fn failed_count(&self) -> usize {
        self.articles.iter().filter(|a| !a.is_fetched()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> NewsListItem {
        NewsListItem {
            title: "国内联播快讯".to_string(),
            url: "https://tv.cctv.com/2025/11/05/VIDEabc.shtml".to_string(),
            news_date: NaiveDate::from_ymd_opt(2025, 11, 5).unwrap(),
        }
    }

    #[test]
    fn test_fetched_article_keeps_item_fields() {
        let article = NewsArticle::fetched(item(), "正文".to_string());
        assert_eq!(article.title, "国内联播快讯");
        assert_eq!(article.url, "https://tv.cctv.com/2025/11/05/VIDEabc.shtml");
        assert_eq!(article.news_date.to_string(), "2025-11-05");
        assert!(article.is_fetched());
        assert_eq!(article.error, None);
    }

    #[test]
    fn test_failed_article_is_empty_and_flagged() {
        let article = NewsArticle::failed(item(), "timed out");
        assert!(article.content.is_empty());
        assert_eq!(article.status, FetchStatus::Failed);
        assert_eq!(article.error.as_deref(), Some("timed out"));
    }

    #[test]
    fn test_article_serialization() {
        let json = serde_json::to_string(&NewsArticle::fetched(item(), "x".into())).unwrap();
        assert!(json.contains(r#""status":"fetched""#));
        assert!(json.contains(r#""news_date":"2025-11-05""#));
        assert!(!json.contains("error"));

        let json = serde_json::to_string(&NewsArticle::failed(item(), "boom")).unwrap();
        assert!(json.contains(r#""status":"failed""#));
        assert!(json.contains(r#""error":"boom""#));
    }

    #[test]
    fn test_daily_news_deserialization() {
        let json = r#"{
            "news_date": "2025-11-05",
            "scraped_at": "2025-11-05T12:30:00Z",
            "articles": [{
                "news_date": "2025-11-05",
                "title": "t",
                "url": "https://tv.cctv.com/x.shtml",
                "content": "",
                "status": "failed"
            }]
        }"#;
        let daily: DailyNews = serde_json::from_str(json).unwrap();
        assert_eq!(daily.articles.len(), 1);
        assert_eq!(daily.failed_count(), 1);
        assert_eq!(daily.articles[0].error, None);
    }

    #[test]
    fn test_daily_news_timestamp_format() {
        let daily = DailyNews::new(item().news_date, vec![]);
        assert!(daily.scraped_at.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&daily.scraped_at).is_ok());
    }
}
