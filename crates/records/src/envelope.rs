//! On-disk envelope shapes used by the extraction and checkpoint files.
//!
//! The extraction collaborators have written two generations of batch files:
//! the oldest are a bare JSON array of records, newer ones wrap the array in
//! a `{ "total": N, "result": [...] }` object. [`BatchEnvelope`] accepts
//! both; readers that hit any other shape should skip the file rather than
//! abort the run.

use serde::{Deserialize, Serialize};

use crate::types::{EnrichmentRecord, RawVideoRecord};

/// Either generation of the extraction batch file format.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BatchEnvelope {
    /// Legacy shape: a bare array of records.
    Bare(Vec<RawVideoRecord>),
    /// Current shape: `{ total, result }`.
    Summarized {
        total: usize,
        result: Vec<RawVideoRecord>,
    },
}

impl BatchEnvelope {
    /// Unwrap into the record list regardless of generation.
    pub fn into_records(self) -> Vec<RawVideoRecord> {
        match self {
            BatchEnvelope::Bare(records) => records,
            BatchEnvelope::Summarized { result, .. } => result,
        }
    }
}

/// Envelope persisted by the enrichment checkpoint store:
/// `{ "total": N, "result": [...] }` with one entry per known video id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckpointEnvelope {
    pub total: usize,
    pub result: Vec<EnrichmentRecord>,
}

impl CheckpointEnvelope {
    pub fn new(result: Vec<EnrichmentRecord>) -> Self {
        Self {
            total: result.len(),
            result,
        }
    }
}
