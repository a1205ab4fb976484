//! Checkpoint persistence.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use records::CheckpointEnvelope;
use thiserror::Error;
use tracing::{debug, info};

use crate::state::EnrichmentState;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("failed to read checkpoint {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write checkpoint {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A checkpoint that exists but does not parse is fatal: silently
    /// starting over would re-fetch everything and clobber prior progress.
    #[error("checkpoint {path} is corrupt")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode checkpoint {path}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Durable storage for the enrichment ledger.
///
/// `save` is called after every recorded result, so implementations must be
/// cheap enough to run per item and must replace the previous snapshot
/// wholesale.
pub trait CheckpointStore {
    fn load(&self) -> Result<EnrichmentState, StateError>;
    fn save(&self, state: &EnrichmentState) -> Result<(), StateError>;
}

/// File-backed store: one pretty-printed JSON document, rewritten per save.
#[derive(Debug, Clone)]
pub struct JsonCheckpointStore {
    path: PathBuf,
}

impl JsonCheckpointStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CheckpointStore for JsonCheckpointStore {
    fn load(&self) -> Result<EnrichmentState, StateError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "checkpoint_absent");
                return Ok(EnrichmentState::new());
            }
            Err(err) => {
                return Err(StateError::Read {
                    path: self.path.clone(),
                    source: err,
                })
            }
        };

        let envelope: CheckpointEnvelope =
            serde_json::from_str(&raw).map_err(|err| StateError::Corrupt {
                path: self.path.clone(),
                source: err,
            })?;
        let state = EnrichmentState::from_envelope(envelope);
        info!(
            path = %self.path.display(),
            entries = state.len(),
            resolved = state.resolved(),
            "checkpoint_loaded"
        );
        Ok(state)
    }

    fn save(&self, state: &EnrichmentState) -> Result<(), StateError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| StateError::Write {
                    path: self.path.clone(),
                    source: err,
                })?;
            }
        }

        let envelope = state.to_envelope();
        let body = serde_json::to_string_pretty(&envelope).map_err(|err| StateError::Encode {
            path: self.path.clone(),
            source: err,
        })?;
        fs::write(&self.path, body).map_err(|err| StateError::Write {
            path: self.path.clone(),
            source: err,
        })?;
        debug!(path = %self.path.display(), entries = state.len(), "checkpoint_saved");
        Ok(())
    }
}
