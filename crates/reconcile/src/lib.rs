//! reeldex reconciliation layer.
//!
//! Takes the per-source collections of raw video records, cleans and slugs
//! their titles, classifies availability from enrichment signals, and folds
//! everything into one deduplicated canonical list.
//!
//! ## Determinism contract
//!
//! The merge is a single-pass, single-writer fold over the input in batch
//! order then in-batch order. Duplicate resolution is always "earliest in
//! input order wins", so callers must feed batches in a stable, reproducible
//! order (the source loader enumerates files in sorted name order for this
//! reason). Given identical inputs the output is byte-identical across runs.
//!
//! Per-record title normalization is a pure function and may be computed in
//! parallel upstream; the dedup fold itself must stay sequential because
//! first-wins semantics depend on processing order.

mod availability;
mod engine;
mod film;

pub use crate::availability::{
    is_active, is_active_with_min_runtime, parse_duration_minutes, MIN_RUNTIME_MINUTES,
};
pub use crate::engine::{
    reconcile, reconcile_with_min_runtime, ReconcileOutput, ReconcileStats,
};
pub use crate::film::{attach_film_details, FilmDetailsSource, FilmLookupError, NoFilmDetails};
