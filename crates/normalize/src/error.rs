use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building a cleanup pattern set from external sources.
///
/// Note that an individual phrase failing to compile is *not* an error; such
/// phrases are skipped with a warning so one bad configuration line can
/// never abort the whole pipeline.
#[derive(Debug, Error)]
pub enum PatternSetError {
    #[error("failed to read pattern file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
