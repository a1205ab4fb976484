//! The reconciliation fold.

use std::collections::{HashMap, HashSet};

use normalize::{slugify, TitleNormalizer};
use records::{CanonicalMovieRecord, EnrichmentDetails, SourceBatch};
use serde::Serialize;
use tracing::{debug, info};

use crate::availability::{is_active_with_min_runtime, MIN_RUNTIME_MINUTES};

/// Names that mark a tombstoned platform entry rather than a movie. Matched
/// as a case-insensitive substring of the cleaned name.
const NAME_BLACKLIST: [&str; 2] = ["private video", "deleted video"];

/// Counters reported alongside the canonical list; the boundary layer logs
/// them and folds them into the run summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileStats {
    /// Raw records seen across all batches.
    pub scanned: usize,
    /// Dropped because the cleaned name or slug came out empty.
    pub dropped_unusable: usize,
    /// Dropped because the cleaned name matched the tombstone blacklist.
    pub dropped_blacklisted: usize,
    /// Later occurrences of an already-seen platform video id.
    pub duplicate_video_ids: usize,
    /// Later occurrences of an already-seen slug.
    pub duplicate_slugs: usize,
    /// Records classified inactive (still emitted, flagged).
    pub inactive: usize,
}

/// Output of [`reconcile`]: the canonical list plus drop/dup counters.
#[derive(Debug, Clone, Default)]
pub struct ReconcileOutput {
    pub records: Vec<CanonicalMovieRecord>,
    pub stats: ReconcileStats,
}

/// Merge per-source batches into one deduplicated, classified canonical
/// list.
///
/// Processing order is batch order then in-batch order, and every duplicate
/// resolution is first-wins in that order. The fold stays sequential; see
/// the crate docs for the determinism contract.
pub fn reconcile(
    batches: &[SourceBatch],
    enrichment: &HashMap<String, EnrichmentDetails>,
    normalizer: &TitleNormalizer,
) -> ReconcileOutput {
    reconcile_with_min_runtime(batches, enrichment, normalizer, MIN_RUNTIME_MINUTES)
}

/// [`reconcile`] with an explicit minimum-runtime threshold for the
/// availability classifier.
pub fn reconcile_with_min_runtime(
    batches: &[SourceBatch],
    enrichment: &HashMap<String, EnrichmentDetails>,
    normalizer: &TitleNormalizer,
    min_runtime_minutes: f64,
) -> ReconcileOutput {
    let mut stats = ReconcileStats::default();
    let mut seen_video_ids: HashSet<String> = HashSet::new();
    let mut seen_slugs: HashSet<String> = HashSet::new();
    let mut records = Vec::new();

    for batch in batches {
        for raw in &batch.records {
            stats.scanned += 1;

            let name = normalizer.normalize(&raw.name);
            let id = slugify(&name);

            if name.is_empty() || id.is_empty() {
                stats.dropped_unusable += 1;
                debug!(video_id = %raw.id, raw_name = %raw.name, "record_dropped_unusable");
                continue;
            }

            let lower = name.to_lowercase();
            if NAME_BLACKLIST.iter().any(|needle| lower.contains(needle)) {
                stats.dropped_blacklisted += 1;
                debug!(video_id = %raw.id, name = %name, "record_dropped_blacklisted");
                continue;
            }

            // videoId dedup happens before slug dedup: a duplicate upload
            // must not burn the slug for the copy that arrived first.
            if !seen_video_ids.insert(raw.id.clone()) {
                stats.duplicate_video_ids += 1;
                continue;
            }
            if !seen_slugs.insert(id.clone()) {
                stats.duplicate_slugs += 1;
                continue;
            }

            let active = is_active_with_min_runtime(enrichment.get(&raw.id), min_runtime_minutes);
            if !active {
                stats.inactive += 1;
            }

            records.push(CanonicalMovieRecord {
                id,
                name,
                video_id: raw.id.clone(),
                is_active: active,
                description: None,
                director: None,
                year: None,
                writer: None,
                stars: None,
            });
        }
    }

    info!(
        scanned = stats.scanned,
        emitted = records.len(),
        dropped_unusable = stats.dropped_unusable,
        dropped_blacklisted = stats.dropped_blacklisted,
        duplicate_video_ids = stats.duplicate_video_ids,
        duplicate_slugs = stats.duplicate_slugs,
        inactive = stats.inactive,
        "reconcile_complete"
    );

    ReconcileOutput { records, stats }
}
