//! Detection pipeline: segmentation, pattern matching, date normalization,
//! and task synthesis, plus the scanner service that serves detection
//! requests.

pub mod dates;
pub mod debounce;
pub mod patterns;
pub mod segment;
pub mod synthesize;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use log::debug;

use crate::ports::id_gen::IdGenerator;
use crate::ports::page::PageSource;
use crate::task::reconcile::{is_duplicate, DuplicateMode};
use crate::task::Task;
use debounce::Debouncer;
use synthesize::PageMeta;

/// The result of one full scan of a page.
#[derive(Debug, Clone)]
pub struct DetectionBatch {
    /// Candidate tasks, unreconciled. Chunk processing is pure, so their
    /// order carries no meaning and must not be relied upon.
    pub tasks: Vec<Task>,
    /// When the scan ran.
    pub scanned_at: DateTime<Utc>,
    /// URL of the scanned page.
    pub url: Option<String>,
    /// Title of the scanned page.
    pub page_title: String,
}

/// Runs the Segmenter -> Matcher -> Normalizer -> Synthesizer pipeline once.
///
/// Soft misses (chunks without matches, unparseable dates, past-dated
/// candidates) silently shrink the candidate set. Overlapping template
/// hits that synthesize to the same title and deadline collapse to one
/// candidate within the batch.
#[must_use]
pub fn scan_page(
    source: &dyn PageSource,
    now: DateTime<Utc>,
    id_gen: &dyn IdGenerator,
) -> DetectionBatch {
    let page = PageMeta { url: source.url(), title: source.title() };
    let fragments = source.fragments();
    let chunks = segment::segment(&fragments, segment::DEFAULT_CHUNK_CAP);

    let mut tasks = Vec::new();
    let mut matches_seen = 0usize;
    for chunk in &chunks {
        for raw in patterns::find_matches(chunk) {
            matches_seen += 1;
            let Some(date) =
                dates::normalize(&raw.date_text, raw.time_text.as_deref(), &raw.context, now)
            else {
                continue;
            };
            if let Some(task) = synthesize::synthesize(&raw, &date, &page, now, id_gen) {
                if !tasks.iter().any(|t| is_duplicate(&task, t, DuplicateMode::PageLocal)) {
                    tasks.push(task);
                }
            }
        }
    }

    debug!(
        "scanned {} chunks: {} pattern hits, {} candidates",
        chunks.len(),
        matches_seen,
        tasks.len()
    );

    DetectionBatch { tasks, scanned_at: now, url: page.url, page_title: page.title }
}

/// External detection request, answered synchronously by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionRequest {
    /// Re-run segmentation and matching immediately.
    DetectNow,
    /// Return the most recent batch without re-running.
    LastDetected,
}

/// Token identifying one in-flight scan, for last-scan-wins arbitration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanToken(u64);

/// Serves detection requests and caches the latest batch.
///
/// A scan superseded by a newer one has its result discarded at batch
/// granularity, so a stale detection pass cannot overwrite fresher results
/// (or resurrect duplicates the reconciler already discarded).
pub struct Scanner {
    seq: AtomicU64,
    last: Mutex<Option<(u64, DetectionBatch)>>,
    debouncer: Debouncer,
}

impl Scanner {
    /// Creates a scanner with the default re-scan quiet interval.
    #[must_use]
    pub fn new() -> Self {
        Self::with_quiet_interval(debounce::default_quiet_interval())
    }

    /// Creates a scanner with a custom re-scan quiet interval.
    #[must_use]
    pub fn with_quiet_interval(quiet: chrono::Duration) -> Self {
        Self { seq: AtomicU64::new(0), last: Mutex::new(None), debouncer: Debouncer::new(quiet) }
    }

    /// Whether a mutation-triggered re-scan may run now (debounced).
    pub fn should_rescan(&self, now: DateTime<Utc>) -> bool {
        self.debouncer.should_scan(now)
    }

    /// Marks the start of a scan and returns its token.
    pub fn begin(&self) -> ScanToken {
        ScanToken(self.seq.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Stores a completed batch unless a newer scan has begun.
    ///
    /// Returns false when the batch was discarded as superseded.
    pub fn complete(&self, token: ScanToken, batch: DetectionBatch) -> bool {
        if self.seq.load(Ordering::SeqCst) != token.0 {
            debug!("discarding superseded scan result (token {})", token.0);
            return false;
        }
        let mut last = self.last.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        match &*last {
            Some((stored, _)) if *stored > token.0 => false,
            _ => {
                *last = Some((token.0, batch));
                true
            }
        }
    }

    /// The most recent completed batch, if any.
    pub fn last_batch(&self) -> Option<DetectionBatch> {
        self.last
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .as_ref()
            .map(|(_, batch)| batch.clone())
    }

    /// Answers a detection request against the given page source.
    pub fn handle(
        &self,
        request: DetectionRequest,
        source: &dyn PageSource,
        now: DateTime<Utc>,
        id_gen: &dyn IdGenerator,
    ) -> Option<DetectionBatch> {
        match request {
            DetectionRequest::DetectNow => {
                let token = self.begin();
                let batch = scan_page(source, now, id_gen);
                self.complete(token, batch.clone());
                Some(batch)
            }
            DetectionRequest::LastDetected => self.last_batch(),
        }
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}
