//! The title cleaning pipeline.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::patterns::CleanupPatternSet;

/// 4-digit year tokens (1900–2099) as whole words. Years are release
/// metadata, never part of the display title.
static YEAR_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:19|20)\d{2}\b").expect("year token regex compiles")
});

/// Trailing dashes, pipes, and punctuation left behind once boilerplate is
/// stripped, e.g. `"Vettaiyan - "` or `"Kaithi ,"`.
static TRAILING_JUNK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\s*[-|.,;:]+\s*)+$").expect("trailing junk regex compiles")
});

/// Cleans raw scraped titles into canonical display names.
///
/// Construct once with the configured [`CleanupPatternSet`] and reuse; every
/// call to [`normalize`](Self::normalize) is deterministic and side-effect
/// free, so a single instance is safe to share across worker threads.
#[derive(Debug, Clone)]
pub struct TitleNormalizer {
    patterns: CleanupPatternSet,
}

impl TitleNormalizer {
    pub fn new(patterns: CleanupPatternSet) -> Self {
        Self { patterns }
    }

    /// The configured pattern set.
    pub fn patterns(&self) -> &CleanupPatternSet {
        &self.patterns
    }

    /// Run the full cleaning pipeline. Stage order matters: each stage feeds
    /// the next.
    ///
    /// 1. strip year tokens;
    /// 2. restrict to ASCII letters, digits, and spaces; this removes
    ///    punctuation, emoji, and non-Latin scripts in one step;
    /// 3. apply cleanup patterns in configured order (whole-word,
    ///    case-insensitive, each match becomes a single space);
    /// 4. separator and trailing-punctuation cleanup, an idempotent safety
    ///    net given stage 2, kept so the stage works on partially cleaned
    ///    input too;
    /// 5. collapse whitespace runs and trim.
    ///
    /// Empty input returns an empty string; callers treat unusable names as
    /// expected noise, not errors.
    pub fn normalize(&self, raw: &str) -> String {
        if raw.is_empty() {
            return String::new();
        }

        let without_years = YEAR_TOKEN.replace_all(raw, " ");

        let ascii_only: String = without_years
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c
                } else if c.is_whitespace() {
                    ' '
                } else {
                    // Dropped entirely; surrounding spaces survive, so word
                    // separation is preserved for separator-delimited titles.
                    '\u{0}'
                }
            })
            .filter(|&c| c != '\u{0}')
            .collect();

        let stripped = self.patterns.apply(&ascii_only);

        let desegmented = stripped.replace(['|', ',', ';', ':'], " ");
        let trimmed = TRAILING_JUNK.replace(&desegmented, "");

        collapse_whitespace(&trimmed)
    }
}

/// Collapses whitespace runs to single spaces and trims both ends.
fn collapse_whitespace(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    for segment in text.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(segment);
    }
    normalized
}
