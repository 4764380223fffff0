//! Statistics accumulated over one crawl run

/// Counters describing what a crawl run did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStatistics {
    /// Pages and assets fetched over the network
    pub pages_downloaded: u64,

    /// URLs satisfied by an already-downloaded file
    pub cache_hits: u64,

    /// Files written into the output directory
    pub files_written: u64,

    /// Raw links seen in parsed pages (before gating)
    pub links_discovered: u64,

    /// Tasks dropped because their URL was already visited
    pub skipped_visited: u64,

    /// Tasks dropped because their host differs from the seed's
    pub skipped_off_host: u64,

    /// Tasks dropped because the depth budget was exhausted
    pub skipped_depth: u64,

    /// Tasks that failed (fetch, write, read, or naming errors)
    pub failures: u64,
}

impl CrawlStatistics {
    /// Total tasks dropped by the gate, across all three reasons
    pub fn total_skipped(&self) -> u64 {
        self.skipped_visited + self.skipped_off_host + self.skipped_depth
    }

    /// Total tasks that passed the gate and ran the pipeline
    pub fn total_processed(&self) -> u64 {
        self.pages_downloaded + self.cache_hits
    }
}

/// Prints a run summary to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Mirror Summary ===\n");

    println!("Content:");
    println!("  Downloaded from network: {}", stats.pages_downloaded);
    println!("  Reused from cache: {}", stats.cache_hits);
    println!("  Files written: {}", stats.files_written);
    println!("  Links discovered: {}", stats.links_discovered);
    println!();

    println!("Skipped ({}):", stats.total_skipped());
    println!("  Already visited: {}", stats.skipped_visited);
    println!("  Different host: {}", stats.skipped_off_host);
    println!("  Depth exhausted: {}", stats.skipped_depth);
    println!();

    if stats.failures > 0 {
        println!("Failed: {}", stats.failures);
        println!();
    }

    let processed = stats.total_processed() + stats.failures;
    let success_rate = if processed > 0 {
        (stats.total_processed() as f64 / processed as f64) * 100.0
    } else {
        0.0
    };

    println!(
        "Success Rate: {:.1}% ({} / {} tasks)",
        success_rate,
        stats.total_processed(),
        processed
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_all_zero() {
        let stats = CrawlStatistics::default();
        assert_eq!(stats.total_skipped(), 0);
        assert_eq!(stats.total_processed(), 0);
    }

    #[test]
    fn test_total_skipped_sums_all_reasons() {
        let stats = CrawlStatistics {
            skipped_visited: 3,
            skipped_off_host: 2,
            skipped_depth: 1,
            ..Default::default()
        };
        assert_eq!(stats.total_skipped(), 6);
    }

    #[test]
    fn test_total_processed_counts_both_sources() {
        let stats = CrawlStatistics {
            pages_downloaded: 4,
            cache_hits: 2,
            ..Default::default()
        };
        assert_eq!(stats.total_processed(), 6);
    }
}
