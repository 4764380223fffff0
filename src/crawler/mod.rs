//! Crawler module for mirroring web content
//!
//! This module contains the core crawling logic, including:
//! - Byte fetching with the local-cache short-circuit
//! - Link extraction from HTML
//! - Visited-set deduplication
//! - Overall crawl coordination

mod coordinator;
mod extractor;
mod fetcher;
mod visited;

pub use coordinator::Coordinator;
pub use extractor::{extract_links, ExtractedLink, LinkKind};
pub use fetcher::{build_http_client, obtain, FetchSource, Obtained};
pub use visited::VisitedSet;

use crate::config::Config;
use crate::output::CrawlStatistics;
use crate::url::CanonicalUrl;
use crate::Result;

/// Runs a complete mirror crawl from the given seed
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Ensure the output directory exists
/// 2. Build the HTTP client
/// 3. Traverse the seed's host up to the configured depth
/// 4. Return statistics for the run
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `seed` - The seed URL defining the host scope
///
/// # Returns
///
/// * `Ok(CrawlStatistics)` - The crawl ran to completion
/// * `Err(MirrorError)` - Setup failed before the crawl could start
pub async fn crawl(config: Config, seed: CanonicalUrl) -> Result<CrawlStatistics> {
    let mut coordinator = Coordinator::new(config, seed)?;
    coordinator.run().await
}
