//! Output generation for scraped news.
//!
//! - [`json`]: one JSON document per broadcast date

pub mod json;
