//! Paginated dataset output.
//!
//! Splits the canonical movie list into fixed-size chunk files named
//! `00.json`, `01.json`, ... plus a `_meta.json` describing the layout, so
//! consumers can page through the dataset without loading it whole. The
//! output directory is rewritten on every run.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use records::CanonicalMovieRecord;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Filename of the dataset layout descriptor.
pub const META_FILENAME: &str = "_meta.json";

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to prepare output directory {path}")]
    PrepareDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write dataset file {path}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode dataset file {path}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Layout descriptor persisted as `_meta.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetMeta {
    /// Total record count across all chunk files.
    pub total: usize,
    /// Number of chunk files written.
    pub files: usize,
    /// Capacity of each chunk file (the last one may hold fewer).
    pub per_file: usize,
    /// Write timestamp.
    pub last_updated: DateTime<Utc>,
}

/// Write `records` into `dir` as zero-padded chunk files plus `_meta.json`.
///
/// Chunk filenames are padded to at least two digits so lexicographic and
/// numeric ordering agree for datasets under 100 chunks.
pub fn write_dataset(
    dir: &Path,
    records: &[CanonicalMovieRecord],
    chunk_size: usize,
) -> Result<DatasetMeta, DatasetError> {
    assert!(chunk_size > 0, "chunk_size must be positive");

    // Rebuild from scratch so stale chunks from a larger previous run
    // cannot linger past the new file count.
    if dir.exists() {
        fs::remove_dir_all(dir).map_err(|err| DatasetError::PrepareDir {
            path: dir.to_path_buf(),
            source: err,
        })?;
    }
    fs::create_dir_all(dir).map_err(|err| DatasetError::PrepareDir {
        path: dir.to_path_buf(),
        source: err,
    })?;

    let chunks: Vec<&[CanonicalMovieRecord]> = records.chunks(chunk_size).collect();
    for (index, chunk) in chunks.iter().enumerate() {
        let path = dir.join(chunk_filename(index));
        write_json(&path, chunk)?;
    }

    let meta = DatasetMeta {
        total: records.len(),
        files: chunks.len(),
        per_file: chunk_size,
        last_updated: Utc::now(),
    };
    write_json(&dir.join(META_FILENAME), &meta)?;

    info!(
        dir = %dir.display(),
        total = meta.total,
        files = meta.files,
        per_file = meta.per_file,
        "dataset_written"
    );
    Ok(meta)
}

fn chunk_filename(index: usize) -> String {
    format!("{index:02}.json")
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), DatasetError> {
    let body = serde_json::to_string_pretty(value).map_err(|err| DatasetError::Encode {
        path: path.to_path_buf(),
        source: err,
    })?;
    fs::write(path, body).map_err(|err| DatasetError::WriteFile {
        path: path.to_path_buf(),
        source: err,
    })
}
