//! News source scrapers.
//!
//! Each scraper follows the same two-phase pattern:
//!
//! 1. **Listing**: discover the day's article URLs and titles
//! 2. **Fetching**: download and parse each article's body
//!
//! # Supported Sources
//!
//! | Source | Module | Method | Notes |
//! |--------|--------|--------|-------|
//! | CCTV Xinwen Lianbo | [`xwlb`] | HTML scraping | One listing page per broadcast date |
//!
//! Detail fetches run strictly one after another with a pause before each;
//! a failed article is kept with empty content instead of failing the day.

pub mod xwlb;
