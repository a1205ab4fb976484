//! reeldex title normalization layer.
//!
//! This crate turns noisy scraped video titles into canonical display names
//! and URL-safe slugs. Downstream stages (reconciliation, dataset output)
//! rely on it for stable identity.
//!
//! ## What we do
//!
//! - Year-token stripping (`1900`–`2099` as whole words)
//! - ASCII restriction (drops punctuation, emoji, non-Latin scripts in one step)
//! - Config-driven removal of promotional boilerplate phrases, whole-word and
//!   case-insensitive, applied in configured order
//! - Separator cleanup and whitespace collapsing
//! - Slug derivation: lowercase, hyphen-separated, idempotent
//!
//! ## Pure function guarantee
//!
//! No I/O at normalization time, no clock calls, no locale dependence. Same
//! title + same pattern set = same output on any machine. Pattern files are
//! read once when the [`CleanupPatternSet`] is built.
//!
//! ## Invariants worth knowing
//!
//! - Empty input normalizes to empty output (expected noise, not an error)
//! - A phrase that fails to compile is skipped, never fatal
//! - `slugify(slugify(x)) == slugify(x)` for all inputs

mod error;
mod patterns;
mod pipeline;
mod slug;

pub use crate::error::PatternSetError;
pub use crate::patterns::{load_phrase_file, CleanupPatternSet};
pub use crate::pipeline::TitleNormalizer;
pub use crate::slug::{keyword_file_id, slugify};
