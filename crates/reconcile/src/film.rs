//! Cast/crew enrichment.
//!
//! A second, independent enrichment pass that runs after reconciliation and
//! attaches film-database metadata (description, director, year, writer,
//! stars) to each canonical record. The lookup itself lives behind the
//! [`FilmDetailsSource`] trait; the concrete scraper/API client is a
//! replaceable collaborator outside this crate.

use records::{CanonicalMovieRecord, FilmDetails};
use thiserror::Error;
use tracing::warn;

/// Error surface for film-database lookups. The variant split lets the
/// boundary distinguish transport problems from parse problems in logs;
/// both are handled identically here (fallback details, never fatal).
#[derive(Debug, Error)]
pub enum FilmLookupError {
    #[error("film database request failed: {0}")]
    Transport(String),
    #[error("film database response could not be parsed: {0}")]
    Parse(String),
}

/// External collaborator that resolves a cleaned movie name to film-database
/// details. `Ok(None)` means the database had no match.
pub trait FilmDetailsSource {
    fn lookup(&self, name: &str) -> Result<Option<FilmDetails>, FilmLookupError>;
}

/// A source that never matches; used for offline runs and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFilmDetails;

impl FilmDetailsSource for NoFilmDetails {
    fn lookup(&self, _name: &str) -> Result<Option<FilmDetails>, FilmLookupError> {
        Ok(None)
    }
}

/// Attach film details to every record, substituting fallback values when
/// the lookup misses or fails. Lookup errors are logged and isolated per
/// record; this pass can never fail the run.
///
/// Returns the number of records that got real (non-fallback) details.
pub fn attach_film_details(
    records: &mut [CanonicalMovieRecord],
    source: &dyn FilmDetailsSource,
) -> usize {
    let mut matched = 0;

    for record in records.iter_mut() {
        let details = match source.lookup(&record.name) {
            Ok(Some(details)) => {
                matched += 1;
                details
            }
            Ok(None) => FilmDetails::fallback(&record.name),
            Err(err) => {
                warn!(name = %record.name, error = %err, "film_lookup_failed");
                FilmDetails::fallback(&record.name)
            }
        };

        record.set_film_details(details);
    }

    matched
}
