//! Source batch loading.
//!
//! Scans a directory for `*.json` batch files and parses each into a
//! [`SourceBatch`]. Files are consumed in lexicographic filename order so a
//! run over the same directory always yields the same record sequence. A
//! file that does not parse as a recognized batch shape is skipped with a
//! warning; an unreadable directory is fatal.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use records::{BatchEnvelope, SourceBatch};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum SourceLoadError {
    #[error("failed to read source directory {path}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Load every `*.json` batch file under `dir`, sorted by filename.
pub fn load_source_batches(dir: &Path) -> Result<Vec<SourceBatch>, SourceLoadError> {
    let entries = fs::read_dir(dir).map_err(|err| SourceLoadError::ReadDir {
        path: dir.to_path_buf(),
        source: err,
    })?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file() && path.extension().map(|ext| ext == "json").unwrap_or(false)
        })
        .collect();
    paths.sort();

    let mut batches = Vec::with_capacity(paths.len());
    for path in &paths {
        match load_batch_file(path) {
            Some(batch) => batches.push(batch),
            None => continue,
        }
    }

    info!(
        dir = %dir.display(),
        files = paths.len(),
        batches = batches.len(),
        "source_batches_loaded"
    );
    Ok(batches)
}

fn load_batch_file(path: &Path) -> Option<SourceBatch> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "source_file_unreadable");
            return None;
        }
    };

    let envelope: BatchEnvelope = match serde_json::from_str(&raw) {
        Ok(envelope) => envelope,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "source_file_skipped");
            return None;
        }
    };

    Some(SourceBatch {
        source: source_name(path),
        records: envelope.into_records(),
    })
}

/// Source label for a batch file: its filename without the `.json` suffix.
fn source_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
