//! Cleanup pattern configuration.
//!
//! A [`CleanupPatternSet`] is an ordered collection of literal phrases that
//! the title normalizer removes as whole words, case-insensitively. Order is
//! significant when phrases overlap: a longer phrase must be listed before
//! its substring or only the substring is stripped. That is a configuration
//! concern, not a runtime one, so the set applies phrases exactly as given.
//!
//! Phrases come from external pattern files (one phrase per line, `#`
//! comments and blank lines ignored), from inline configuration lists, or
//! from the built-in legacy list migrated from the pipeline's first
//! generation. All sources share one compilation path.

use std::fs;
use std::path::Path;

use regex::Regex;
use tracing::warn;

use crate::error::PatternSetError;

/// A single compiled cleanup phrase.
#[derive(Debug, Clone)]
struct CleanupPattern {
    phrase: String,
    matcher: Regex,
}

/// An ordered, immutable collection of boilerplate phrases to strip from
/// titles. Built once at startup and passed into the
/// [`TitleNormalizer`](crate::TitleNormalizer) by value; never mutated at
/// runtime.
#[derive(Debug, Clone, Default)]
pub struct CleanupPatternSet {
    patterns: Vec<CleanupPattern>,
}

impl CleanupPatternSet {
    /// A set with no patterns; normalization still strips years, non-ASCII
    /// characters, and separators.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Compile an ordered list of literal phrases.
    ///
    /// Phrases are regex-escaped before compilation so configuration text
    /// containing regex metacharacters is matched literally. A phrase that
    /// still fails to compile is skipped with a warning.
    pub fn from_phrases<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut patterns = Vec::new();
        for phrase in phrases {
            let phrase = phrase.as_ref().trim();
            if phrase.is_empty() {
                continue;
            }
            match compile_phrase(phrase) {
                Ok(matcher) => patterns.push(CleanupPattern {
                    phrase: phrase.to_string(),
                    matcher,
                }),
                Err(err) => {
                    warn!(phrase = %phrase, error = %err, "cleanup_pattern_skipped");
                }
            }
        }
        Self { patterns }
    }

    /// Load and compile phrases from pattern files, concatenated in the
    /// given precedence order (general sources before domain-specific ones).
    pub fn from_files<P: AsRef<Path>>(paths: &[P]) -> Result<Self, PatternSetError> {
        let mut phrases = Vec::new();
        for path in paths {
            phrases.extend(load_phrase_file(path.as_ref())?);
        }
        Ok(Self::from_phrases(phrases))
    }

    /// The phrase list hardcoded in the first-generation cleanup code,
    /// migrated into the shared pattern representation. Order preserved from
    /// the original; superseded by file-driven sets for new deployments.
    pub fn builtin_legacy() -> Self {
        Self::from_phrases(LEGACY_PHRASES)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// The configured phrases, in application order.
    pub fn phrases(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|p| p.phrase.as_str())
    }

    /// Apply every pattern in order, replacing each match with a single
    /// space. Whitespace is collapsed by the caller afterwards.
    pub(crate) fn apply(&self, text: &str) -> String {
        let mut current = text.to_string();
        for pattern in &self.patterns {
            if pattern.matcher.is_match(&current) {
                current = pattern.matcher.replace_all(&current, " ").into_owned();
            }
        }
        current
    }
}

/// Compile one literal phrase into a whole-word, case-insensitive matcher.
/// Internal whitespace in the phrase matches any whitespace run. Word
/// boundaries are only asserted at ends that are actually word characters;
/// a phrase ending in punctuation anchors on the literal itself.
fn compile_phrase(phrase: &str) -> Result<Regex, regex::Error> {
    let body = phrase
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");
    let open = if phrase.starts_with(is_word_char) { r"\b" } else { "" };
    let close = if phrase.ends_with(is_word_char) { r"\b" } else { "" };
    Regex::new(&format!(r"(?i){open}{body}{close}"))
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Read one pattern file: one phrase per line, `#` comments and blank lines
/// ignored. Returns phrases in file order.
pub fn load_phrase_file(path: &Path) -> Result<Vec<String>, PatternSetError> {
    let contents = fs::read_to_string(path).map_err(|source| PatternSetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

/// Phrases from the original hardcoded cleanup implementation, in its
/// application order.
const LEGACY_PHRASES: [&str; 48] = [
    "Full Movie HD",
    "Exclusive Tamil Full Movie",
    "Tamil Full Movie",
    "Latest Tamil Full Movie",
    "Tamil Movie HD",
    "Full Movie",
    "Tamil Movie",
    "Latest Tamil Movie",
    "Super Hit Tamil Movie HD",
    "Super Hit Tamil Movie",
    "Latest Full Movies",
    "Full Length Tamil Movie Online",
    "Tamil Cinema",
    "Tamil Cinema Junction",
    "Bicstol Movie",
    "Star Movies",
    "MSK Movies",
    "Thamizh Padam",
    "DMY",
    "Tamil Dubbed",
    "Full Action Movie HD",
    "Movie HD",
    "Latest Tamil",
    "Full",
    "superhit",
    "Full HD Tamil New Movie",
    "NEW RELEASE",
    "Tamil Super Hit Action Movie",
    "Horror HD Movie",
    "Quality",
    "Best Family Entertainer",
    "HD Tamil New Movie",
    "Watch Free Length Online",
    "DVD",
    "Exclusive",
    "Private video",
    "Latest",
    "Deleted video",
    "Action Blockbuster Movie",
    "Tamil Crime Thriller HD Movie",
    "Official",
    "Action Movie",
    "Goldencinema",
    "HD",
    "Movie Climax",
    "Tamil Horror",
    "Telugu",
    "Movie",
];
