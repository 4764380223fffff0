//! Crawl coordinator - main traversal orchestration logic
//!
//! The coordinator owns all per-run state (visited set, file store, HTTP
//! client, statistics) and drives an explicit work queue instead of
//! recursing: dequeued tasks pass a gate (depth, host scope, visited
//! check-and-set), run as semaphore-bounded tokio tasks, and hand any
//! links they discover back to the queue one depth level down. Every
//! per-task error is logged and contained at that task; nothing a single
//! page does can abort the crawl.

use crate::config::Config;
use crate::crawler::extractor::extract_links;
use crate::crawler::fetcher::{build_http_client, obtain, FetchSource};
use crate::crawler::visited::VisitedSet;
use crate::output::CrawlStatistics;
use crate::state::TaskState;
use crate::storage::FileStore;
use crate::url::{extension_of, file_name_from_path, is_html_extension, CanonicalUrl};
use crate::{MirrorError, Result};
use reqwest::Client;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// A unit of crawl work: a target URL and its remaining depth budget
#[derive(Debug, Clone)]
struct CrawlTask {
    url: CanonicalUrl,
    depth: i64,
}

/// What a finished task hands back to the coordinator
#[derive(Debug)]
struct TaskCompletion {
    url: CanonicalUrl,
    depth: i64,
    state: TaskState,
    source: Option<FetchSource>,
    wrote_file: bool,
    links_found: usize,
    children: Vec<CanonicalUrl>,
}

/// Main crawl coordinator structure
///
/// One coordinator is one crawl run; several independent runs can coexist
/// in a process because nothing here is global.
pub struct Coordinator {
    config: Arc<Config>,
    client: Client,
    store: FileStore,
    visited: Arc<VisitedSet>,
    seed: Arc<CanonicalUrl>,
    semaphore: Arc<Semaphore>,
}

impl Coordinator {
    /// Creates a new coordinator for one crawl run
    ///
    /// Ensures the output directory exists (an already-existing directory
    /// is fine) and builds the shared HTTP client.
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    /// * `seed` - The seed URL; its host bounds the whole crawl
    pub fn new(config: Config, seed: CanonicalUrl) -> Result<Self> {
        let store = FileStore::new(&config.output.directory);
        store.ensure_root()?;

        let client = build_http_client(&config.crawler)?;

        let semaphore = Arc::new(Semaphore::new(
            config.crawler.max_concurrent_fetches as usize,
        ));

        Ok(Self {
            config: Arc::new(config),
            client,
            store,
            visited: Arc::new(VisitedSet::new()),
            seed: Arc::new(seed),
            semaphore,
        })
    }

    /// Returns how many URLs have been marked visited so far
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Runs the crawl to exhaustion of the reachable set
    ///
    /// The loop alternates between draining the queue (gating and
    /// spawning tasks) and joining finished tasks (recording their
    /// outcome and enqueueing their children). It ends when the queue is
    /// empty and no task is in flight.
    pub async fn run(&mut self) -> Result<CrawlStatistics> {
        tracing::info!("Scraping {} ...", self.seed);

        let start_time = std::time::Instant::now();
        let mut stats = CrawlStatistics::default();
        let mut completed: u64 = 0;

        let mut queue: VecDeque<CrawlTask> = VecDeque::new();
        queue.push_back(CrawlTask {
            url: (*self.seed).clone(),
            depth: i64::from(self.config.crawler.max_depth),
        });

        let mut in_flight: JoinSet<TaskCompletion> = JoinSet::new();

        loop {
            while let Some(task) = queue.pop_front() {
                if task.depth < 0 {
                    stats.skipped_depth += 1;
                    continue;
                }

                if !task.url.same_host(&self.seed) {
                    tracing::debug!("Outside host scope: {}", task.url);
                    stats.skipped_off_host += 1;
                    continue;
                }

                if !self.visited.try_mark(&task.url) {
                    stats.skipped_visited += 1;
                    continue;
                }

                // Waiting here, not in the task, keeps at most
                // max_concurrent_fetches tasks alive at a time.
                let permit = match Arc::clone(&self.semaphore).acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => break,
                };

                let client = self.client.clone();
                let store = self.store.clone();
                let seed = Arc::clone(&self.seed);
                in_flight.spawn(async move {
                    let _permit = permit;
                    process_task(task, client, store, seed).await
                });
            }

            let completion = match in_flight.join_next().await {
                Some(Ok(completion)) => completion,
                Some(Err(e)) => {
                    tracing::error!("Crawl task aborted: {}", e);
                    stats.failures += 1;
                    continue;
                }
                None => break,
            };

            record_completion(&mut stats, &completion);

            for child in completion.children {
                queue.push_back(CrawlTask {
                    url: child,
                    depth: completion.depth - 1,
                });
            }

            completed += 1;
            if completed % 10 == 0 {
                let elapsed = start_time.elapsed();
                let rate = completed as f64 / elapsed.as_secs_f64();
                tracing::info!(
                    "Progress: {} tasks completed, {} queued, {:.2} tasks/sec",
                    completed,
                    queue.len(),
                    rate
                );
            }
        }

        tracing::info!(
            "Crawl completed: {} downloaded, {} reused from cache, {} failed in {:?}",
            stats.pages_downloaded,
            stats.cache_hits,
            stats.failures,
            start_time.elapsed()
        );

        Ok(stats)
    }
}

/// Processes a single gated task, containing every failure inside it
async fn process_task(
    task: CrawlTask,
    client: Client,
    store: FileStore,
    seed: Arc<CanonicalUrl>,
) -> TaskCompletion {
    let mut completion = TaskCompletion {
        url: task.url.clone(),
        depth: task.depth,
        state: TaskState::Pending,
        source: None,
        wrote_file: false,
        links_found: 0,
        children: Vec::new(),
    };

    if let Err(e) = run_pipeline(&mut completion, &client, &store, &seed).await {
        tracing::warn!("Failed to process {}: {}", completion.url, e);
        completion.state = TaskState::Failed;
        completion.children.clear();
    }

    completion
}

/// The fetch -> write -> parse pipeline for one URL
///
/// Any error returned here fails this task only; the caller records it
/// and moves on. On success the completion holds the discovered children
/// for the coordinator to enqueue.
async fn run_pipeline(
    completion: &mut TaskCompletion,
    client: &Client,
    store: &FileStore,
    seed: &CanonicalUrl,
) -> std::result::Result<(), MirrorError> {
    let file_name = file_name_from_path(completion.url.path())?;
    let extension = extension_of(file_name).to_string();
    let local_path = store.local_path(&completion.url)?;

    completion.state = TaskState::Fetching;
    let obtained = obtain(client, &completion.url, store, &local_path).await?;
    completion.source = Some(obtained.source);

    // Rewriting a cache hit with its own bytes is redundant but harmless,
    // and keeps the success path uniform.
    completion.state = TaskState::Writing;
    store.write(&local_path, &obtained.bytes).await?;
    completion.wrote_file = true;

    if !is_html_extension(&extension) {
        completion.state = TaskState::Done;
        return Ok(());
    }

    completion.state = TaskState::Parsing;
    let links = extract_links(&obtained.bytes);
    completion.links_found = links.len();

    // Hrefs resolve against the seed, not the page they were found on:
    // the whole crawl is anchored to the seed's base.
    completion.state = TaskState::Recursing;
    for link in links {
        match seed.resolve(&link.href) {
            Ok(resolved) => completion.children.push(resolved),
            Err(e) => {
                tracing::debug!(
                    "Dropping unresolvable {} link {:?}: {}",
                    link.kind,
                    link.href,
                    e
                );
            }
        }
    }

    completion.state = TaskState::Done;
    Ok(())
}

/// Folds one task's outcome into the run statistics
fn record_completion(stats: &mut CrawlStatistics, completion: &TaskCompletion) {
    match completion.source {
        Some(FetchSource::Network) => stats.pages_downloaded += 1,
        Some(FetchSource::Cache) => stats.cache_hits += 1,
        None => {}
    }

    if completion.wrote_file {
        stats.files_written += 1;
    }

    stats.links_discovered += completion.links_found as u64;

    if completion.state.is_failure() {
        stats.failures += 1;
    }
}
