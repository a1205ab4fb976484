use std::collections::HashMap;
use std::fs;

use reeldex::{
    run_pipeline, CanonicalMovieRecord, CheckpointEnvelope, DetailFetcher, Embeddable,
    EnrichmentDetails, FetchError, FilmDetails, FilmDetailsSource, FilmLookupError,
    NoFilmDetails, PipelineConfig,
};
use tempfile::tempdir;

struct MapFetcher {
    responses: HashMap<String, EnrichmentDetails>,
}

impl MapFetcher {
    fn new(entries: &[(&str, EnrichmentDetails)]) -> Self {
        Self {
            responses: entries
                .iter()
                .map(|(id, d)| (id.to_string(), d.clone()))
                .collect(),
        }
    }
}

impl DetailFetcher for MapFetcher {
    fn fetch(&self, id: &str) -> Result<Option<EnrichmentDetails>, FetchError> {
        Ok(self.responses.get(id).cloned())
    }
}

struct OneFilm;

impl FilmDetailsSource for OneFilm {
    fn lookup(&self, name: &str) -> Result<Option<FilmDetails>, FilmLookupError> {
        if name == "Baasha" {
            Ok(Some(FilmDetails {
                description: "A bus driver with a hidden past.".to_string(),
                director: "Suresh Krissna".to_string(),
                year: Some(1995),
                writer: "Balakumaran".to_string(),
                stars: vec!["Rajinikanth".to_string(), "Nagma".to_string()],
            }))
        } else {
            Ok(None)
        }
    }
}

fn details(embeddable: Embeddable, time: &str) -> EnrichmentDetails {
    EnrichmentDetails {
        embeddable: Some(embeddable),
        time: Some(time.to_string()),
        region: None,
    }
}

fn config_for(root: &std::path::Path) -> PipelineConfig {
    let mut cfg = PipelineConfig::default();
    cfg.sources.input_dir = root.join("sources");
    cfg.enrichment.checkpoint_path = root.join("checkpoint.json");
    cfg.dataset.output_dir = root.join("dataset");
    cfg
}

fn seed_sources(dir: &std::path::Path) {
    fs::create_dir_all(dir).unwrap();
    fs::write(
        dir.join("playlist.json"),
        r#"[
            {"id": "v1", "name": "Baasha Tamil Full Movie (1995)"},
            {"id": "v2", "name": "Kuruvi Full Movie HD"},
            {"id": "v3", "name": "Thalapathi | Super Hit Tamil Movie"}
        ]"#,
    )
    .unwrap();
}

fn read_chunk(path: &std::path::Path) -> Vec<CanonicalMovieRecord> {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn enrichment_classification_flows_into_the_dataset() {
    let root = tempdir().unwrap();
    let cfg = config_for(root.path());
    seed_sources(&cfg.sources.input_dir);

    let fetcher = MapFetcher::new(&[
        ("v1", details(Embeddable::Yes, "02:25:00")),
        ("v2", details(Embeddable::Yes, "00:04:30")),
        ("v3", details(Embeddable::No, "02:37:00")),
    ]);

    let summary = run_pipeline(&cfg, &fetcher, &NoFilmDetails).unwrap();
    assert_eq!(summary.emitted, 3);
    assert_eq!(summary.inactive, 2);
    assert_eq!(summary.enrichment.fetched, 3);

    let records = read_chunk(&cfg.dataset.output_dir.join("00.json"));
    let by_id: HashMap<&str, bool> = records
        .iter()
        .map(|r| (r.id.as_str(), r.is_active))
        .collect();
    assert!(by_id["baasha"]);
    assert!(!by_id["kuruvi"], "short runtime is not a feature film");
    assert!(!by_id["thalapathi"], "not embeddable");
}

#[test]
fn film_details_attach_with_fallback_for_misses() {
    let root = tempdir().unwrap();
    let cfg = config_for(root.path());
    seed_sources(&cfg.sources.input_dir);

    let fetcher = MapFetcher::new(&[]);
    let summary = run_pipeline(&cfg, &fetcher, &OneFilm).unwrap();
    assert_eq!(summary.film_matched, 1);

    let records = read_chunk(&cfg.dataset.output_dir.join("00.json"));
    let baasha = records.iter().find(|r| r.id == "baasha").unwrap();
    assert_eq!(baasha.director.as_deref(), Some("Suresh Krissna"));
    assert_eq!(baasha.year, Some(1995));

    let kuruvi = records.iter().find(|r| r.id == "kuruvi").unwrap();
    assert_eq!(
        kuruvi.description.as_deref(),
        Some("Description for Kuruvi")
    );
    assert_eq!(kuruvi.director.as_deref(), Some("Unknown"));
    assert_eq!(kuruvi.year, None);
}

#[test]
fn second_run_resumes_from_checkpoint_without_refetching() {
    let root = tempdir().unwrap();
    let cfg = config_for(root.path());
    seed_sources(&cfg.sources.input_dir);

    let first = MapFetcher::new(&[("v1", details(Embeddable::Yes, "02:25:00"))]);
    let summary = run_pipeline(&cfg, &first, &NoFilmDetails).unwrap();
    assert_eq!(summary.enrichment.fetched, 3);
    assert_eq!(summary.enrichment.resolved, 1);

    // Only the two unresolved entries are fetched on the second run, and the
    // earlier result is kept even though this fetcher knows nothing about v1.
    let second = MapFetcher::new(&[("v2", details(Embeddable::Yes, "02:05:00"))]);
    let summary = run_pipeline(&cfg, &second, &NoFilmDetails).unwrap();
    assert_eq!(summary.enrichment.skipped, 1);
    assert_eq!(summary.enrichment.fetched, 2);
    assert_eq!(summary.enrichment.resolved, 2);

    let raw = fs::read_to_string(&cfg.enrichment.checkpoint_path).unwrap();
    let envelope: CheckpointEnvelope = serde_json::from_str(&raw).unwrap();
    assert_eq!(envelope.total, 3);
    let v1 = envelope.result.iter().find(|e| e.id == "v1").unwrap();
    assert_eq!(
        v1.details.as_ref().and_then(|d| d.time.as_deref()),
        Some("02:25:00")
    );
}

#[test]
fn dataset_is_paginated_with_meta() {
    let root = tempdir().unwrap();
    let mut cfg = config_for(root.path());
    cfg.dataset.chunk_size = 2;

    fs::create_dir_all(&cfg.sources.input_dir).unwrap();
    let records: Vec<String> = (0..5)
        .map(|n| format!(r#"{{"id": "v{n}", "name": "Movie Number {n}"}}"#))
        .collect();
    fs::write(
        cfg.sources.input_dir.join("batch.json"),
        format!("[{}]", records.join(",")),
    )
    .unwrap();

    let summary = run_pipeline(&cfg, &MapFetcher::new(&[]), &NoFilmDetails).unwrap();
    assert_eq!(summary.emitted, 5);
    assert_eq!(summary.dataset_files, 3);

    assert_eq!(read_chunk(&cfg.dataset.output_dir.join("00.json")).len(), 2);
    assert_eq!(read_chunk(&cfg.dataset.output_dir.join("02.json")).len(), 1);

    let meta: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(cfg.dataset.output_dir.join("_meta.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(meta["total"], 5);
    assert_eq!(meta["files"], 3);
    assert_eq!(meta["per_file"], 2);
    assert!(meta["last_updated"].is_string());
}
