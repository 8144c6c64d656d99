//! # Lumina News CLI
//!
//! Scrapes Xinwen Lianbo listings and articles into one JSON file per date.
//!
//! ```sh
//! lumina_news -j ./json                               # today
//! lumina_news -j ./json --date 2025-11-05             # one day
//! lumina_news -j ./json --from 2022-01-01 --to 2022-12-31
//! lumina_news -j ./json --recent-days 7
//! lumina_news --date 2025-11-05 --list-only           # listing to stdout
//! ```

use chrono::{Local, NaiveDate};
use clap::Parser;
use lumina_news::backfill;
use lumina_news::cli::Cli;
use lumina_news::config::ScraperConfig;
use lumina_news::delay::RandomDelay;
use lumina_news::http::HttpClient;
use lumina_news::models::DailyNews;
use lumina_news::outputs::json;
use lumina_news::scrapers::xwlb::NewsScraper;
use lumina_news::utils::{ensure_writable_dir, recent_days};
use std::error::Error;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("lumina_news starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let config = load_config(&args)?;
    let (delay_min, delay_max) = config.delay_bounds()?;
    let delay = RandomDelay::new(delay_min, delay_max)?;

    // One client for the whole process; closed below whatever the outcome.
    let http = Arc::new(HttpClient::new(config.user_agent.clone(), config.list_timeout()));
    let scraper = NewsScraper::new(Arc::clone(&http), config, Arc::new(delay));

    let result = run(&args, &scraper).await;
    scraper.close().await;
    debug!(clients_built = http.build_count(), "HTTP client closed");

    let elapsed = start_time.elapsed();
    match &result {
        Ok(()) => info!(?elapsed, secs = elapsed.as_secs(), "Execution complete"),
        Err(e) => error!(?elapsed, error = %e, "Execution failed"),
    }
    result
}

/// Config file (if any) with CLI overrides applied, validated.
fn load_config(args: &Cli) -> Result<ScraperConfig, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => ScraperConfig::from_file(path)?,
        None => ScraperConfig::default(),
    };
    if let Some(min) = args.delay_min {
        config.delay_min_secs = min;
    }
    if let Some(max) = args.delay_max {
        config.delay_max_secs = max;
    }
    config.validate()?;
    Ok(config)
}

async fn run(args: &Cli, scraper: &NewsScraper) -> Result<(), Box<dyn Error>> {
    let today = Local::now().date_naive();

    if args.list_only {
        let date = args.date.unwrap_or(today);
        let items = scraper.fetch_news_list(date).await?;
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    if let Err(e) = ensure_writable_dir(&args.json_output_dir).await {
        error!(
            path = %args.json_output_dir,
            error = %e,
            "JSON output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e.into());
    }

    if let (Some(from), Some(to)) = (args.from, args.to) {
        let stats = backfill::run(scraper, from, to, &args.json_output_dir).await?;
        println!("{}", serde_json::to_string(&stats)?);
        return Ok(());
    }

    if let Some(days) = args.recent_days {
        let dates = recent_days(today, days)?;
        let stats = backfill::run_dates(scraper, &dates, &args.json_output_dir).await;
        println!("{}", serde_json::to_string(&stats)?);
        return Ok(());
    }

    scrape_one_day(scraper, args.date.unwrap_or(today), &args.json_output_dir).await
}

async fn scrape_one_day(scraper: &NewsScraper, date: NaiveDate, json_output_dir: &str) -> Result<(), Box<dyn Error>> {
    let articles = scraper.scrape_daily_news(date).await?;
    if articles.is_empty() {
        info!(%date, "No news items for date; nothing written");
        return Ok(());
    }

    let daily = DailyNews::new(date, articles);
    let path = json::write_daily_news(&daily, json_output_dir).await?;
    info!(
        %date,
        path = %path.display(),
        articles = daily.articles.len(),
        failed = daily.failed_count(),
        "Wrote daily news"
    );
    Ok(())
}
