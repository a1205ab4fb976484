//! reeldex enrichment layer.
//!
//! Tracks, per platform video id, whether detail enrichment has already
//! succeeded, so an interrupted run can resume without re-issuing completed
//! work.
//!
//! ## Durability contract
//!
//! The runner persists the full state through a [`CheckpointStore`] after
//! every single recorded result, before advancing to the next fetch. A crash
//! therefore loses at most the one in-flight fetch, never prior results.
//! The storage layout must support cheap full rewrites; the JSON file store
//! does exactly that.
//!
//! ## Failure semantics
//!
//! A failed fetch is recorded as unresolved (`details: None`), not retried
//! within the run; the next run's [`EnrichmentState::initialize`] leaves the
//! entry pending so it gets retried then. A corrupt checkpoint file, on the
//! other hand, is fatal at load time: partial resume state cannot be safely
//! guessed.

mod runner;
mod state;
mod store;

pub use crate::runner::{
    run_enrichment, DetailFetcher, EnrichmentSummary, FetchError, NoDetailFetcher,
};
pub use crate::state::EnrichmentState;
pub use crate::store::{CheckpointStore, JsonCheckpointStore, StateError};
