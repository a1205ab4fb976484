//! Workspace umbrella crate for reeldex.
//!
//! This crate stitches together source loading, enrichment, reconciliation,
//! and dataset output so callers can run the whole movie pipeline with a
//! single API entry point.

pub mod config;
pub mod dataset;
pub mod sources;

pub use config::{ConfigLoadError, PipelineConfig};
pub use dataset::{write_dataset, DatasetError, DatasetMeta, META_FILENAME};
pub use sources::{load_source_batches, SourceLoadError};

pub use enrich::{
    run_enrichment, CheckpointStore, DetailFetcher, EnrichmentState, EnrichmentSummary,
    FetchError, JsonCheckpointStore, NoDetailFetcher, StateError,
};
pub use normalize::{
    keyword_file_id, load_phrase_file, slugify, CleanupPatternSet, PatternSetError,
    TitleNormalizer,
};
pub use reconcile::{
    attach_film_details, is_active, parse_duration_minutes, reconcile,
    reconcile_with_min_runtime, FilmDetailsSource, FilmLookupError, NoFilmDetails,
    ReconcileOutput, ReconcileStats, MIN_RUNTIME_MINUTES,
};
pub use records::{
    BatchEnvelope, CanonicalMovieRecord, CheckpointEnvelope, Embeddable, EnrichmentDetails,
    EnrichmentRecord, FilmDetails, RawVideoRecord, SourceBatch,
};

use serde::Serialize;
use thiserror::Error;
use tracing::info;

/// Errors from a full pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("configuration failure")]
    Config(#[from] ConfigLoadError),

    #[error("cleanup pattern loading failed")]
    Patterns(#[from] PatternSetError),

    #[error("source loading failed")]
    Sources(#[from] SourceLoadError),

    #[error("enrichment checkpointing failed")]
    Enrichment(#[from] StateError),

    #[error("dataset output failed")]
    Dataset(#[from] DatasetError),
}

/// Counters from one end-to-end run.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct RunSummary {
    /// Source batch files consumed.
    pub sources: usize,
    /// Raw records scanned across all batches.
    pub scanned: usize,
    /// Canonical records written to the dataset.
    pub emitted: usize,
    /// Canonical records flagged inactive.
    pub inactive: usize,
    /// Records whose film details came from the lookup source.
    pub film_matched: usize,
    /// Chunk files written.
    pub dataset_files: usize,
    /// Enrichment fetch/skip counters for this run.
    pub enrichment: EnrichmentSummary,
}

/// Build the title normalizer described by the configuration: the builtin
/// phrase set (when enabled), then file-sourced phrases, then inline extras,
/// in that order.
pub fn build_normalizer(cfg: &PipelineConfig) -> Result<TitleNormalizer, PipelineError> {
    let mut phrases: Vec<String> = Vec::new();
    if cfg.normalize.use_builtin_phrases {
        phrases.extend(
            CleanupPatternSet::builtin_legacy()
                .phrases()
                .map(str::to_string),
        );
    }
    for path in &cfg.normalize.phrase_files {
        phrases.extend(load_phrase_file(path)?);
    }
    phrases.extend(cfg.normalize.extra_phrases.iter().cloned());

    Ok(TitleNormalizer::new(CleanupPatternSet::from_phrases(
        phrases,
    )))
}

/// Run the whole pipeline: load source batches, enrich (resumable), merge
/// into the canonical list, attach film details, and write the paginated
/// dataset.
pub fn run_pipeline(
    cfg: &PipelineConfig,
    fetcher: &dyn DetailFetcher,
    film_source: &dyn FilmDetailsSource,
) -> Result<RunSummary, PipelineError> {
    let normalizer = build_normalizer(cfg)?;

    let batches = load_source_batches(&cfg.sources.input_dir)?;
    let raw: Vec<RawVideoRecord> = batches
        .iter()
        .flat_map(|batch| batch.records.iter().cloned())
        .collect();

    let store = JsonCheckpointStore::new(&cfg.enrichment.checkpoint_path);
    let (state, enrichment) = run_enrichment(&raw, fetcher, &store)?;

    let output = reconcile_with_min_runtime(
        &batches,
        &state.resolved_details(),
        &normalizer,
        cfg.reconcile.min_runtime_minutes,
    );

    let mut records = output.records;
    let film_matched = attach_film_details(&mut records, film_source);

    let meta = write_dataset(&cfg.dataset.output_dir, &records, cfg.dataset.chunk_size)?;

    let summary = RunSummary {
        sources: batches.len(),
        scanned: output.stats.scanned,
        emitted: records.len(),
        inactive: output.stats.inactive,
        film_matched,
        dataset_files: meta.files,
        enrichment,
    };
    info!(
        sources = summary.sources,
        scanned = summary.scanned,
        emitted = summary.emitted,
        inactive = summary.inactive,
        film_matched = summary.film_matched,
        dataset_files = summary.dataset_files,
        "pipeline_complete"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    struct NoDetails;

    impl DetailFetcher for NoDetails {
        fn fetch(&self, _id: &str) -> Result<Option<EnrichmentDetails>, FetchError> {
            Ok(None)
        }
    }

    fn config_for(root: &std::path::Path) -> PipelineConfig {
        let mut cfg = PipelineConfig::default();
        cfg.sources.input_dir = root.join("sources");
        cfg.enrichment.checkpoint_path = root.join("checkpoint.json");
        cfg.dataset.output_dir = root.join("dataset");
        cfg
    }

    #[test]
    fn run_pipeline_end_to_end() {
        let dir = tempdir().unwrap();
        let cfg = config_for(dir.path());
        fs::create_dir_all(&cfg.sources.input_dir).unwrap();
        fs::write(
            cfg.sources.input_dir.join("playlist.json"),
            r#"[
                {"id": "v1", "name": "Baasha Tamil Full Movie (1995)"},
                {"id": "v2", "name": "Private Video"},
                {"id": "v1", "name": "Baasha again"}
            ]"#,
        )
        .unwrap();

        let summary = run_pipeline(&cfg, &NoDetails, &NoFilmDetails).unwrap();
        assert_eq!(summary.sources, 1);
        assert_eq!(summary.scanned, 3);
        assert_eq!(summary.emitted, 1);
        assert_eq!(summary.dataset_files, 1);

        let chunk = fs::read_to_string(cfg.dataset.output_dir.join("00.json")).unwrap();
        let records: Vec<CanonicalMovieRecord> = serde_json::from_str(&chunk).unwrap();
        assert_eq!(records[0].id, "baasha");
        assert_eq!(records[0].video_id, "v1");

        // The checkpoint persists the full raw universe for resumption.
        assert!(cfg.enrichment.checkpoint_path.exists());
    }

    #[test]
    fn build_normalizer_orders_configured_phrases() {
        let dir = tempdir().unwrap();
        let phrase_file = dir.path().join("extra.txt");
        fs::write(&phrase_file, "Penultimate Cut\n# comment\n").unwrap();

        let mut cfg = PipelineConfig::default();
        cfg.normalize.phrase_files = vec![phrase_file];
        cfg.normalize.extra_phrases = vec!["Remastered".to_string()];

        let normalizer = build_normalizer(&cfg).unwrap();
        assert_eq!(
            normalizer.normalize("Muthu Full Movie Penultimate Cut Remastered"),
            "Muthu"
        );
    }

    #[test]
    fn build_normalizer_surfaces_missing_phrase_file() {
        let mut cfg = PipelineConfig::default();
        cfg.normalize.phrase_files = vec![std::path::PathBuf::from("/nonexistent/p.txt")];

        let err = build_normalizer(&cfg).unwrap_err();
        assert!(matches!(err, PipelineError::Patterns(_)));
    }
}
