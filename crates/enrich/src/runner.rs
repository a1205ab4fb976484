//! Sequential enrichment runner.

use std::collections::HashSet;

use records::{EnrichmentDetails, RawVideoRecord};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::state::EnrichmentState;
use crate::store::{CheckpointStore, StateError};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    Parse(String),
}

/// Fetches playback metadata for one video id.
///
/// Implementations talk to an external service; the runner treats every
/// error as retriable and simply leaves the entry pending.
pub trait DetailFetcher {
    fn fetch(&self, id: &str) -> Result<Option<EnrichmentDetails>, FetchError>;
}

/// Fetcher for offline runs: every lookup comes back empty, so entries stay
/// pending until a real fetcher resolves them.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDetailFetcher;

impl DetailFetcher for NoDetailFetcher {
    fn fetch(&self, _id: &str) -> Result<Option<EnrichmentDetails>, FetchError> {
        Ok(None)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EnrichmentSummary {
    /// Entries for which a fetch was attempted this run.
    pub fetched: usize,
    /// Entries skipped because a prior run already resolved them.
    pub skipped: usize,
    /// Total resolved entries after the run.
    pub resolved: usize,
    /// Total entries still pending after the run.
    pub unresolved: usize,
}

/// Drive enrichment over `raw`, resuming from whatever `store` holds.
///
/// The checkpoint is rewritten after each recorded result, so an interrupted
/// run loses at most the in-flight fetch. Fetch failures are recorded as
/// pending and retried on the next invocation; only storage failures abort.
pub fn run_enrichment(
    raw: &[RawVideoRecord],
    fetcher: &dyn DetailFetcher,
    store: &dyn CheckpointStore,
) -> Result<(EnrichmentState, EnrichmentSummary), StateError> {
    let mut state = store.load()?;
    state.initialize(raw);
    store.save(&state)?;

    let mut summary = EnrichmentSummary::default();
    // The same video id can recur across batches (the reconciler dedups
    // later); each id gets at most one fetch attempt per run, so a failed
    // fetch is not retried until the next invocation.
    let mut visited: HashSet<&str> = HashSet::with_capacity(raw.len());
    for record in raw {
        if !visited.insert(record.id.as_str()) {
            continue;
        }
        if !state.needs_fetch(&record.id) {
            summary.skipped += 1;
            continue;
        }

        summary.fetched += 1;
        let details = match fetcher.fetch(&record.id) {
            Ok(details) => details,
            Err(err) => {
                warn!(video_id = %record.id, error = %err, "detail_fetch_failed");
                None
            }
        };
        state.record_result(&record.id, details);
        store.save(&state)?;
    }

    summary.resolved = state.resolved();
    summary.unresolved = state.unresolved();
    info!(
        fetched = summary.fetched,
        skipped = summary.skipped,
        resolved = summary.resolved,
        unresolved = summary.unresolved,
        "enrichment_complete"
    );
    Ok((state, summary))
}
