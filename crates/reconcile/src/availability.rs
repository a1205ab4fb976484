//! Availability classification.
//!
//! Decides whether a video should be published as active given the optional
//! enrichment signals. The policy is asymmetric on purpose:
//!
//! - **no details at all** → active (fail-open: enrichment simply hasn't
//!   happened yet, and unknown videos default to available);
//! - **details present but the duration is corrupt** → inactive
//!   (fail-closed: data we fetched and cannot trust is treated as a
//!   non-movie).

use records::{Embeddable, EnrichmentDetails};
use tracing::warn;

/// Minimum runtime for a record to count as a feature film.
pub const MIN_RUNTIME_MINUTES: f64 = 90.0;

/// Classify a record's availability using the default runtime threshold.
pub fn is_active(details: Option<&EnrichmentDetails>) -> bool {
    is_active_with_min_runtime(details, MIN_RUNTIME_MINUTES)
}

/// Classify a record's availability against an explicit runtime threshold.
pub fn is_active_with_min_runtime(
    details: Option<&EnrichmentDetails>,
    min_runtime_minutes: f64,
) -> bool {
    let Some(details) = details else {
        // Never fetched: unknown defaults to available.
        return true;
    };

    match details.embeddable {
        Some(Embeddable::No) => false,
        Some(Embeddable::Yes) | Some(Embeddable::Unknown) => {
            runtime_minutes(details) >= min_runtime_minutes
        }
        // Details were fetched but the checker omitted the flag.
        None => true,
    }
}

fn runtime_minutes(details: &EnrichmentDetails) -> f64 {
    match details.time.as_deref() {
        Some(time) => parse_duration_minutes(time),
        None => {
            warn!("enrichment details missing duration; treating as zero runtime");
            0.0
        }
    }
}

/// Parse an `HH:MM:SS` duration string into total minutes.
///
/// Anything that is not exactly three numeric colon-separated segments
/// parses to `0.0`. Combined with the minimum-runtime rule this marks
/// records with corrupt duration data inactive.
pub fn parse_duration_minutes(time: &str) -> f64 {
    let mut segments = [0u32; 3];
    let mut count = 0;

    for part in time.split(':') {
        if count == 3 {
            warn!(time, "duration has too many segments; treating as zero");
            return 0.0;
        }
        match part.trim().parse::<u32>() {
            Ok(value) => {
                segments[count] = value;
                count += 1;
            }
            Err(_) => {
                warn!(time, "non-numeric duration segment; treating as zero");
                return 0.0;
            }
        }
    }

    if count != 3 {
        warn!(time, "duration is not HH:MM:SS; treating as zero");
        return 0.0;
    }

    let [hours, minutes, seconds] = segments;
    f64::from(hours) * 60.0 + f64::from(minutes) + f64::from(seconds) / 60.0
}
