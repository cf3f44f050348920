use crate::config::ExtractorConfig;
use crate::crawlers::fetch::Fetcher;
use crate::crawlers::queue::WorkQueue;
use crate::error::Result;
use crate::parsers::text;
use crate::results::{ExtractionReport, PageLinks, ResultStore, RunStats};
use std::fmt;
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore, mpsc};
use tokio::task::{JoinError, JoinHandle, JoinSet};

/// Lifecycle of one extraction run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// The producer is still extracting and queueing candidates
    Producing,
    /// The producer has finished; remaining queued URLs are being consumed
    Draining,
    /// Producer finished, queue empty and no consumer in flight
    Done,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunState::Producing => "producing",
            RunState::Draining => "draining",
            RunState::Done => "done",
        };
        f.write_str(name)
    }
}

/// A running extraction
///
/// Pages arrive on `pages` as soon as they are stored. Call
/// [`ExtractionRun::finish`] to wait for the run to complete.
pub struct ExtractionRun {
    /// Successfully fetched pages, in completion order
    pub pages: mpsc::Receiver<PageLinks>,

    coordinator: JoinHandle<Result<ExtractionReport>>,
}

impl ExtractionRun {
    /// Wait for the run to reach [`RunState::Done`] and return its report
    ///
    /// Pages not yet read from `pages` are discarded; they are still part
    /// of the report.
    pub async fn finish(mut self) -> Result<ExtractionReport> {
        while self.pages.recv().await.is_some() {}
        self.coordinator.await?
    }
}

/// Starts an extraction run over `input` and returns immediately
///
/// # Arguments
///
/// * `config` - Extractor configuration
/// * `input` - Free-form text containing URL-like substrings
pub async fn start(config: &ExtractorConfig, input: String) -> Result<ExtractionRun> {
    config.validate()?;

    let fetcher = Fetcher::new(config)?;
    let (result_tx, result_rx) = mpsc::channel::<PageLinks>(config.result_buffer);

    // Per-run state, dropped when the run ends
    let queue = Arc::new(WorkQueue::new(config.max_queue_size));
    let store = ResultStore::new();
    let stats = Arc::new(RunStats::default());

    let coordinator = tokio::spawn(coordinate(
        input,
        config.max_concurrency,
        queue,
        store,
        fetcher,
        stats,
        result_tx,
    ));

    Ok(ExtractionRun {
        pages: result_rx,
        coordinator,
    })
}

/// Runs an extraction to completion and returns the report
pub async fn run(config: &ExtractorConfig, input: String) -> Result<ExtractionReport> {
    start(config, input).await?.finish().await
}

/// Owns the run: dispatches one consumer per popped URL until Done
async fn coordinate(
    input: String,
    max_concurrency: usize,
    queue: Arc<WorkQueue>,
    store: ResultStore,
    fetcher: Fetcher,
    stats: Arc<RunStats>,
    result_tx: mpsc::Sender<PageLinks>,
) -> Result<ExtractionReport> {
    let mut state = RunState::Producing;
    ::log::info!(
        "Extraction run {}: queue capacity {}, up to {} consumers",
        state,
        queue.max_size(),
        max_concurrency
    );

    let mut producer = spawn_producer(input, Arc::clone(&queue), Arc::clone(&stats));
    let permits = Arc::new(Semaphore::new(max_concurrency));
    let mut consumers = JoinSet::new();

    loop {
        tokio::select! {
            joined = &mut producer, if state == RunState::Producing => {
                if let Err(e) = joined {
                    queue.close().await;
                    return Err(e.into());
                }
                state = RunState::Draining;
                ::log::info!("Extraction run {}", state);
            }
            next = next_url(&permits, &queue) => {
                let Some((url, permit)) = next? else {
                    break;
                };

                stats.record_consumer_spawned();
                consumers.spawn(consume(
                    url,
                    fetcher.clone(),
                    store.clone(),
                    Arc::clone(&stats),
                    result_tx.clone(),
                    permit,
                ));

                while let Some(joined) = consumers.try_join_next() {
                    log_consumer_exit(joined);
                }
            }
        }
    }

    // The queue only ends once closed, so the producer is at most a few
    // instructions from finishing here
    if state == RunState::Producing {
        producer.await?;
        state = RunState::Draining;
        ::log::info!("Extraction run {}", state);
    }

    ::log::debug!("Waiting for {} consumers in flight", consumers.len());
    while let Some(joined) = consumers.join_next().await {
        log_consumer_exit(joined);
    }

    state = RunState::Done;
    let results = store.into_map().await;
    let stats = stats.summary();
    ::log::info!(
        "Extraction run {}: {} pages stored, {} fetched, {} failed, {} evicted, {} consumers spawned",
        state,
        results.len(),
        stats.fetched,
        stats.failed,
        stats.evicted,
        stats.consumers_spawned
    );

    Ok(ExtractionReport { results, stats })
}

/// Extracts candidates off the async threads, queues them and closes the queue
fn spawn_producer(input: String, queue: Arc<WorkQueue>, stats: Arc<RunStats>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let candidates =
            match tokio::task::spawn_blocking(move || text::extract_candidate_urls(&input)).await {
                Ok(candidates) => candidates,
                Err(e) => {
                    ::log::error!("Candidate extraction failed: {}", e);
                    Vec::new()
                }
            };

        let found = candidates.len();
        stats.record_candidates(found);

        let evicted = queue.append(candidates).await;
        let queued = found.saturating_sub(evicted);
        stats.record_queued(queued);
        stats.record_evicted(evicted);

        queue.close().await;
        ::log::info!(
            "Producer finished: {} candidates, {} queued, {} evicted",
            found,
            queued,
            evicted
        );
    })
}

/// Waits for a free consumer slot, then for the next queued URL
///
/// Returns `None` once the queue is closed and empty.
async fn next_url(
    permits: &Arc<Semaphore>,
    queue: &WorkQueue,
) -> Result<Option<(String, OwnedSemaphorePermit)>> {
    let permit = Arc::clone(permits).acquire_owned().await?;
    Ok(queue.next().await.map(|url| (url, permit)))
}

/// One pop+fetch+parse+store cycle; the permit is released on return
async fn consume(
    url: String,
    fetcher: Fetcher,
    store: ResultStore,
    stats: Arc<RunStats>,
    result_tx: mpsc::Sender<PageLinks>,
    _permit: OwnedSemaphorePermit,
) {
    ::log::trace!("Consumer processing: {}", url);

    let Some(page) = fetcher.fetch(&url).await else {
        stats.record_failed();
        return;
    };
    stats.record_fetched();

    if store.insert(page.clone()).await.is_some() {
        stats.record_overwritten();
        ::log::debug!("Replaced earlier result for {}", page.url);
    }

    if result_tx.send(page).await.is_err() {
        ::log::trace!("Page receiver dropped, result kept in store only");
    }
}

fn log_consumer_exit(joined: std::result::Result<(), JoinError>) {
    if let Err(e) = joined {
        ::log::error!("Consumer task failed: {}", e);
    }
}
