//! Xinwen Lianbo (新闻联播) daily broadcast scraper.
//!
//! Each broadcast date has a listing page at
//! `https://tv.cctv.com/lm/xwlb/day/YYYYMMDD.shtml` whose `<li>` elements link
//! to one detail page per news item. Detail pages carry the article text in
//! `#content_area`.
//!
//! # Listing formats
//!
//! - Newer pages (~2022 onward) put the title in the link's `title` attribute.
//! - Older pages (~2017 onward) leave the attribute off and put the title in a
//!   `<div class="title">` inside the item.
//!
//! The first entry of a day is usually the whole programme (`《新闻联播》…`),
//! which has no article text and is dropped from the listing.

use crate::config::ScraperConfig;
use crate::delay::{DelayPolicy, RandomDelay};
use crate::error::{ConfigError, FetchError};
use crate::http::HttpClient;
use crate::models::{NewsArticle, NewsListItem};
use crate::utils::truncate_for_log;
use chrono::NaiveDate;
use futures::stream::{self, StreamExt};
use itertools::Itertools;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};
use url::Url;

static ITEM_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("li").expect("static selector"));
static LINK_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").expect("static selector"));
static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("div.title").expect("static selector"));
static CONTENT_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("#content_area").expect("static selector"));

/// Title prefix of the full-programme entry.
const FULL_BROADCAST_PREFIX: &str = "《新闻联播》";

/// Scraper for one listing source, sharing an injected HTTP client.
#[derive(Debug, Clone)]
pub struct NewsScraper {
    http: Arc<HttpClient>,
    config: ScraperConfig,
    delay: Arc<dyn DelayPolicy>,
}

impl NewsScraper {
    pub fn new(http: Arc<HttpClient>, config: ScraperConfig, delay: Arc<dyn DelayPolicy>) -> Self {
        Self { http, config, delay }
    }

    /// Build a scraper with its own client and a random delay taken from `config`.
    pub fn from_config(config: ScraperConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let (min, max) = config.delay_bounds()?;
        let delay = RandomDelay::new(min, max)?;
        let http = Arc::new(HttpClient::new(config.user_agent.clone(), config.list_timeout()));
        Ok(Self::new(http, config, Arc::new(delay)))
    }

    pub fn http(&self) -> &Arc<HttpClient> {
        &self.http
    }

    /// Listing page URL for `date`.
    pub fn listing_url(&self, date: NaiveDate) -> String {
        format!("{}{}.shtml", self.config.base_url, date.format("%Y%m%d"))
    }

    /// Pause for whatever the delay policy says. Used between requests.
    pub async fn pause(&self) {
        let pause = self.delay.next_delay();
        if !pause.is_zero() {
            debug!(?pause, "Sleeping before next request");
            sleep(pause).await;
        }
    }

    /// Fetch the listing page of `target_date` and parse it into items, in page order.
    ///
    /// Full-programme entries are dropped. No retry.
    ///
    /// # Arguments
    ///
    /// * `target_date` - Broadcast date whose listing page is requested
    ///
    /// # Returns
    ///
    /// The day's news items, or an empty list when the page has none.
    ///
    /// # Errors
    ///
    /// * [`FetchError::Http`] when the request cannot be sent or times out
    /// * [`FetchError::Status`] for a non-success response
    /// * [`FetchError::Parse`] when the listing URL is malformed
    #[instrument(level = "info", skip_all, fields(%target_date))]
    pub async fn fetch_news_list(&self, target_date: NaiveDate) -> Result<Vec<NewsListItem>, FetchError> {
        let daily_url = self.listing_url(target_date);
        debug!(url = %daily_url, "Requesting listing page");

        let html = self.get_text(&daily_url, self.config.list_timeout()).await?;
        let page_url = Url::parse(&daily_url).map_err(|e| FetchError::parse(&daily_url, e.to_string()))?;

        let all_items = parse_news_list_html(&html, &page_url, &self.config.link_filter, target_date);
        let total = all_items.len();
        let items: Vec<NewsListItem> = all_items
            .into_iter()
            .filter(|item| !is_full_broadcast(&item.title))
            .collect();

        if total > items.len() {
            debug!(dropped = total - items.len(), "Dropped full-broadcast entries");
        }
        info!(count = items.len(), "Fetched news list");
        Ok(items)
    }

    /// Fetch one detail page and return the text of its `#content_area`.
    ///
    /// Uses the detail timeout and does not consult the delay policy.
    ///
    /// # Errors
    ///
    /// Transport and status failures as for [`Self::fetch_news_list`], and
    /// [`FetchError::Parse`] when the page has no `#content_area`.
    #[instrument(level = "info", skip_all, fields(%url))]
    pub async fn fetch_news_content(&self, url: &str) -> Result<String, FetchError> {
        let html = self.get_text(url, self.config.detail_timeout()).await?;
        match extract_content(&html) {
            Some(content) => {
                debug!(chars = content.chars().count(), "Extracted article content");
                Ok(content)
            }
            None => {
                warn!(body = %truncate_for_log(&html, 200), "No #content_area on page");
                Err(FetchError::parse(url, "missing #content_area"))
            }
        }
    }

    /// Fetch the listing of `target_date`, then every article body, one at a time.
    ///
    /// Before each detail request the delay policy is consulted. An article
    /// that cannot be fetched is kept with empty content and
    /// [`crate::models::FetchStatus::Failed`]; only a failed listing request
    /// fails the whole call. Output order matches the listing.
    ///
    /// # Arguments
    ///
    /// * `target_date` - Broadcast date to scrape
    ///
    /// # Returns
    ///
    /// One [`NewsArticle`] per listing item, fetched or flagged failed.
    #[instrument(level = "info", skip_all, fields(%target_date))]
    pub async fn scrape_daily_news(&self, target_date: NaiveDate) -> Result<Vec<NewsArticle>, FetchError> {
        let items = self.fetch_news_list(target_date).await?;
        if items.is_empty() {
            warn!("Listing has no news items");
            return Ok(Vec::new());
        }

        let total = items.len();
        info!(total, "Fetching article contents");

        let this = self;
        let articles: Vec<NewsArticle> = stream::iter(items.into_iter().enumerate())
            .then(move |(i, item)| async move {
                this.pause().await;
                info!(index = i + 1, total, title = %item.title, "Fetching article");
                match this.fetch_news_content(&item.url).await {
                    Ok(content) => NewsArticle::fetched(item, content),
                    Err(e) => {
                        warn!(url = %item.url, error = %e, "Article fetch failed; keeping empty content");
                        NewsArticle::failed(item, e)
                    }
                }
            })
            .collect()
            .await;

        let failed = articles.iter().filter(|a| !a.is_fetched()).count();
        info!(count = articles.len(), failed, "Finished scraping daily news");
        Ok(articles)
    }

    /// Release the shared HTTP client. Idempotent.
    pub async fn close(&self) {
        self.http.close().await;
    }

    async fn get_text(&self, url: &str, timeout: Duration) -> Result<String, FetchError> {
        let client = self.http.client().await?;
        let response = client.get(url).timeout(timeout).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.text().await?)
    }
}

/// Whether `title` names the full-programme entry rather than a single story.
pub fn is_full_broadcast(title: &str) -> bool {
    title.starts_with(FULL_BROADCAST_PREFIX)
}

/// Parse a listing page into items, in document order.
///
/// For each `<li>`, the first link whose `href` contains `link_filter`
/// supplies the URL (resolved against `page_url`). Its `title` attribute is the
/// title, falling back to the text of `div.title`. Items lacking either are
/// skipped and repeated URLs keep their first occurrence. Full-broadcast
/// entries are not filtered here.
pub fn parse_news_list_html(
    html: &str,
    page_url: &Url,
    link_filter: &str,
    news_date: NaiveDate,
) -> Vec<NewsListItem> {
    let document = Html::parse_document(html);
    let mut seen: HashSet<String> = HashSet::new();
    let mut items = Vec::new();

    for li in document.select(&ITEM_SELECTOR) {
        let Some(link) = li.select(&LINK_SELECTOR).find(|a| {
            a.value()
                .attr("href")
                .is_some_and(|h| !h.trim().is_empty() && h.contains(link_filter))
        }) else {
            continue;
        };

        let href = link.value().attr("href").unwrap_or_default().trim();
        let url = match page_url.join(href) {
            Ok(u) => u.to_string(),
            Err(e) => {
                debug!(%href, error = %e, "Skipping unresolvable link");
                continue;
            }
        };
        if seen.contains(&url) {
            continue;
        }

        let title = link
            .value()
            .attr("title")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .or_else(|| {
                li.select(&TITLE_SELECTOR)
                    .next()
                    .map(|div| div.text().collect::<String>().trim().to_string())
                    .filter(|t| !t.is_empty())
            });
        let Some(title) = title else {
            continue;
        };

        seen.insert(url.clone());
        items.push(NewsListItem { title, url, news_date });
    }

    items
}

/// Text of `#content_area`: trimmed text nodes, blanks dropped, one per line.
///
/// `None` when the page has no such element.
pub fn extract_content(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let area = document.select(&CONTENT_SELECTOR).next()?;
    Some(area.text().map(str::trim).filter(|t| !t.is_empty()).join("\n"))
}
