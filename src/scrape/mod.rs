//! Scraping of the question catalogue pages
//!
//! This module contains:
//! - HTTP fetching with per-request timeouts
//! - Question extraction from the catalogue HTML
//! - Image discovery and download
//! - Run coordination across categories

mod assets;
mod coordinator;
mod extractor;
mod fetcher;

pub use assets::{asset_file_name, collect_asset_candidates, download_assets, AssetCandidate, AssetReport};
pub use coordinator::{run_scrape, CategoryOutcome, Coordinator, InlineValidation, ScrapeSummary};
pub use extractor::{extract_questions, Discard, DiscardReason, ExtractOptions, ExtractionReport};
pub use fetcher::{build_http_client, fetch_bytes, fetch_page};
