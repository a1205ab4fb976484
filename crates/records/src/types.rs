//! Core data model for the pipeline.
//!
//! # Ownership
//!
//! [`RawVideoRecord`] and [`EnrichmentRecord`] are owned by the extraction
//! and enrichment collaborators respectively; the reconciler treats them as
//! read-only inputs. [`CanonicalMovieRecord`] is constructed exclusively by
//! the reconciler.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single video as extracted from the platform, before any cleaning.
///
/// Immutable once extracted. `raw_name` is untrusted free text and must go
/// through the title normalizer before it is used anywhere.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawVideoRecord {
    /// Opaque platform identifier (e.g. the video id in a watch URL).
    pub id: String,
    /// Raw title as scraped. Promotional noise, emoji, separators included.
    pub name: String,
    /// Watch URL, when the extraction source provided one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Position within the originating playlist, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
    /// Upload timestamp, when the extraction source provided one.
    #[serde(
        default,
        rename = "publishedAt",
        skip_serializing_if = "Option::is_none"
    )]
    pub published_at: Option<DateTime<Utc>>,
}

impl RawVideoRecord {
    /// Convenience constructor for the common id + name case.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            url: None,
            position: None,
            published_at: None,
        }
    }
}

/// One logical source grouping of raw records: a playlist or a search
/// keyword. Batches must be fed to the reconciler in a stable order for
/// reproducible output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceBatch {
    /// Identifier of the originating query (playlist id or keyword slug).
    pub source: String,
    pub records: Vec<RawVideoRecord>,
}

/// Embeddability flag as reported by the region/restrictions API.
///
/// The upstream payload is inconsistent: it emits JSON `true`/`false` for
/// most videos and the literal string `"Unknown"` when the checker could not
/// decide. Both shapes deserialize into this tri-state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Embeddable {
    Yes,
    No,
    Unknown,
}

impl Serialize for Embeddable {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Embeddable::Yes => serializer.serialize_bool(true),
            Embeddable::No => serializer.serialize_bool(false),
            Embeddable::Unknown => serializer.serialize_str("Unknown"),
        }
    }
}

impl<'de> Deserialize<'de> for Embeddable {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Flag(bool),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Flag(true) => Ok(Embeddable::Yes),
            Repr::Flag(false) => Ok(Embeddable::No),
            Repr::Text(s) if s.eq_ignore_ascii_case("unknown") => Ok(Embeddable::Unknown),
            Repr::Text(other) => Err(serde::de::Error::custom(format!(
                "unrecognized embeddable value: {other:?}"
            ))),
        }
    }
}

/// Structured payload returned by the detail-fetch collaborator.
///
/// Every field is optional: the upstream API omits fields freely, and the
/// availability classifier has explicit policy for each absence.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnrichmentDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embeddable: Option<Embeddable>,
    /// Runtime formatted `HH:MM:SS`. Malformed values classify as zero
    /// minutes downstream.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

/// Checkpoint unit for the enrichment pass, keyed by the platform video id.
///
/// Created with `details: None` when a raw record is first seen; mutated in
/// place exactly once per successful fetch; never deleted. Its presence with
/// resolved details suppresses re-fetching on resume.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnrichmentRecord {
    pub id: String,
    pub details: Option<EnrichmentDetails>,
}

impl EnrichmentRecord {
    pub fn pending(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            details: None,
        }
    }

    /// True iff the detail fetch for this video has not yet succeeded.
    pub fn is_pending(&self) -> bool {
        self.details.is_none()
    }
}

/// Cast/crew metadata from the film-database pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilmDetails {
    pub description: String,
    pub director: String,
    pub year: Option<i32>,
    pub writer: String,
    pub stars: Vec<String>,
}

impl FilmDetails {
    /// Placeholder details used when the film database has no match or the
    /// lookup failed. Keeps the output schema uniform.
    pub fn fallback(name: &str) -> Self {
        Self {
            description: format!("Description for {name}"),
            director: "Unknown".to_string(),
            year: None,
            writer: "Unknown".to_string(),
            stars: Vec::new(),
        }
    }
}

/// The reconciled output unit, ready for pagination and publication.
///
/// Invariants (enforced by the reconciler, not by this type):
///
/// - `id` is `slugify(name)`, a pure function of the cleaned name; two
///   records with the same cleaned name collide deliberately (first wins)
/// - `video_id` is unique across the final collection (first wins)
/// - `name` is never empty and never matches the availability blacklist
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CanonicalMovieRecord {
    /// URL-safe slug derived from `name`.
    pub id: String,
    /// Cleaned display title.
    pub name: String,
    /// Platform video id (`RawVideoRecord::id`).
    #[serde(rename = "videoId")]
    pub video_id: String,
    #[serde(rename = "isActive")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub writer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stars: Option<Vec<String>>,
}

impl CanonicalMovieRecord {
    /// Merge cast/crew details into the record.
    pub fn set_film_details(&mut self, details: FilmDetails) {
        self.description = Some(details.description);
        self.director = Some(details.director);
        self.year = details.year;
        self.writer = Some(details.writer);
        self.stars = Some(details.stars);
    }
}
