//! Command-line interface definitions for Lumina News.
//!
//! Options can come from flags or, where noted, environment variables.

use chrono::NaiveDate;
use clap::{ArgGroup, Parser};

/// Longest window accepted by `--recent-days`.
pub const MAX_RECENT_DAYS: i64 = 3660;

/// Command-line arguments for the scraper.
///
/// # Examples
///
/// ```sh
/// # Today's broadcast
/// lumina_news -j ./json
///
/// # One specific day, listing only
/// lumina_news --date 2025-11-05 --list-only
///
/// # Backfill a range, resuming where a previous run stopped
/// lumina_news -j ./json --from 2022-01-01 --to 2022-12-31
///
/// # The last seven days
/// lumina_news -j ./json --recent-days 7
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
#[command(group(ArgGroup::new("mode").args(["date", "from", "recent_days"])))]
pub struct Cli {
    /// Broadcast date to scrape (YYYY-MM-DD). Defaults to today.
    #[arg(short, long)]
    pub date: Option<NaiveDate>,

    /// First date of a backfill range (YYYY-MM-DD)
    #[arg(long, requires = "to")]
    pub from: Option<NaiveDate>,

    /// Last date of a backfill range, inclusive (YYYY-MM-DD)
    #[arg(long, requires = "from")]
    pub to: Option<NaiveDate>,

    /// Scrape the last N days, ending today (at most ten years)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_RECENT_DAYS))]
    pub recent_days: Option<u32>,

    /// Print the day's news list as JSON without fetching article bodies
    #[arg(long, conflicts_with_all = ["from", "recent_days"])]
    pub list_only: bool,

    /// Output directory for the JSON files
    #[arg(short, long, default_value = "./news_json")]
    pub json_output_dir: String,

    /// Optional path to a YAML config file
    #[arg(short, long, env = "LUMINA_NEWS_CONFIG")]
    pub config: Option<String>,

    /// Lower bound of the pause before each request, in seconds
    #[arg(long)]
    pub delay_min: Option<f64>,

    /// Upper bound of the pause before each request, in seconds
    #[arg(long)]
    pub delay_max: Option<f64>,
}
