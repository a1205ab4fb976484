//! Record types shared across the reeldex pipeline stages.
//!
//! These types describe the shape of data as it moves through the ETL:
//!
//! ```text
//! RawVideoRecord            # extraction output, immutable
//!     ↓ normalize + slugify
//! CanonicalMovieRecord      # reconciled, deduplicated, classified
//!     ↑ merged with
//! EnrichmentRecord          # per-video checkpoint of detail fetches
//! FilmDetails               # cast/crew from the film database pass
//! ```
//!
//! They are designed to be:
//!
//! - **Serializable**: JSON via serde, wire-compatible with the batch files
//!   the extraction collaborators write (both the bare-array and the
//!   `{ total, result }` envelope shapes)
//! - **Cloneable**: cheap to clone for pipeline processing
//! - **Comparable**: equality checks for testing

mod envelope;
mod types;

pub use crate::envelope::{BatchEnvelope, CheckpointEnvelope};
pub use crate::types::{
    CanonicalMovieRecord, Embeddable, EnrichmentDetails, EnrichmentRecord, FilmDetails,
    RawVideoRecord, SourceBatch,
};
