//! Slug derivation.
//!
//! Slugs are the canonical identifiers of the published dataset: two titles
//! that clean up to the same name deliberately collide on the same slug, and
//! the reconciler resolves the collision with a first-wins rule.

/// Derive a URL-safe slug from a display name.
///
/// Lowercases, strips everything but word characters, whitespace, and
/// hyphens, replaces whitespace runs with single hyphens, collapses hyphen
/// runs, and trims hyphens from both ends.
///
/// Pure and idempotent: `slugify(slugify(x)) == slugify(x)` for any input,
/// and an empty input yields an empty output.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for c in name.to_lowercase().chars() {
        let mapped = if c.is_whitespace() || c == '-' {
            None
        } else if c.is_ascii_alphanumeric() || c == '_' {
            Some(c)
        } else {
            continue;
        };

        match mapped {
            Some(c) => {
                if pending_hyphen && !slug.is_empty() {
                    slug.push('-');
                }
                pending_hyphen = false;
                slug.push(c);
            }
            None => pending_hyphen = true,
        }
    }

    slug
}

/// File-name identifier for a per-keyword batch: the keyword's slug,
/// truncated to at most 50 bytes on a character boundary.
pub fn keyword_file_id(keyword: &str) -> String {
    let mut id = slugify(keyword);
    if id.len() > 50 {
        let mut cut = 50;
        while !id.is_char_boundary(cut) {
            cut -= 1;
        }
        id.truncate(cut);
        // Don't leave a dangling hyphen at the cut point.
        while id.ends_with('-') {
            id.pop();
        }
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_slugs() {
        assert_eq!(slugify("Anbe Sivam"), "anbe-sivam");
        assert_eq!(slugify("Karnan"), "karnan");
    }

    #[test]
    fn special_characters_are_dropped() {
        assert_eq!(slugify("Jigarthanda: Double X!"), "jigarthanda-double-x");
        assert_eq!(slugify("96 (Ninety Six)"), "96-ninety-six");
    }

    #[test]
    fn hyphen_runs_collapse_and_edges_trim() {
        assert_eq!(slugify("  - Soorarai - Pottru -  "), "soorarai-pottru");
        assert_eq!(slugify("a  --  b"), "a-b");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("   "), "");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn slugify_is_idempotent() {
        let samples = [
            "Anbe Sivam",
            "Jigarthanda: Double X!",
            "  - Soorarai - Pottru -  ",
            "Vada Chennai — Part 1",
            "",
        ];
        for sample in samples {
            let once = slugify(sample);
            assert_eq!(slugify(&once), once, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn keyword_file_id_truncates_long_keywords() {
        let keyword = "tamil full length action movies with english subtitles high definition";
        let id = keyword_file_id(keyword);
        assert!(id.len() <= 50);
        assert!(!id.ends_with('-'));
        assert!(id.starts_with("tamil-full-length"));
    }

    #[test]
    fn keyword_file_id_leaves_short_keywords_alone() {
        assert_eq!(keyword_file_id("tamil thriller"), "tamil-thriller");
    }
}
