//! Slug derivation for project titles
//!
//! Two derivations are supported and selected through
//! [`SchemaConfig::slug_style`](crate::config::SchemaConfig):
//! the naive one (lowercase, spaces to hyphens) and a stricter
//! `slugify` that folds accents to ASCII, strips punctuation and collapses
//! separators.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

static DISALLOWED: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9_\s-]").expect("valid slug regex"));
static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-\s]+").expect("valid slug regex"));

/// How a project slug is derived from its title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlugStyle {
    /// Lowercase the title and replace each space with `-`
    #[default]
    Naive,
    /// Fold to ASCII letters, digits, `_` and `-`; collapse whitespace and hyphens.
    /// Falls back to the naive slug when nothing is left.
    Slugify,
}

impl SlugStyle {
    /// Derive a slug from `title`
    pub fn apply(self, title: &str) -> String {
        match self {
            SlugStyle::Naive => naive_slug(title),
            SlugStyle::Slugify => match slugify(title) {
                slug if slug.is_empty() => naive_slug(title),
                slug => slug,
            },
        }
    }
}

/// Lowercase and replace spaces with hyphens, nothing else
///
/// # Examples
/// ```
/// use taskboard::utils::slug::naive_slug;
///
/// assert_eq!(naive_slug("My Project"), "my-project");
/// ```
pub fn naive_slug(title: &str) -> String {
    title.to_lowercase().replace(' ', "-")
}

/// URL-safe slug: ASCII only, no punctuation, single hyphens between words
///
/// Accented letters are decomposed (NFKD) and lose their marks; characters
/// with no ASCII form are dropped, so the result may be empty.
///
/// # Examples
/// ```
/// use taskboard::utils::slug::slugify;
///
/// assert_eq!(slugify("  Hello,  World! "), "hello-world");
/// assert_eq!(slugify("Café Crème"), "cafe-creme");
/// ```
pub fn slugify(title: &str) -> String {
    let folded: String = title.nfkd().filter(char::is_ascii).collect();
    let lowered = folded.to_lowercase();
    let cleaned = DISALLOWED.replace_all(&lowered, "");
    let joined = SEPARATORS.replace_all(&cleaned, "-");
    joined.trim_matches(|c| c == '-' || c == '_').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_naive_slug() {
        assert_eq!(naive_slug("My Project"), "my-project");
        assert_eq!(naive_slug("Q3  Roadmap"), "q3--roadmap");
        assert_eq!(naive_slug("Über Plan!"), "über-plan!");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("My Project"), "my-project");
        assert_eq!(slugify("Q3  Roadmap"), "q3-roadmap");
        assert_eq!(slugify("Über Plan!"), "uber-plan");
        assert_eq!(slugify("Café Crème"), "cafe-creme");
        assert_eq!(slugify("ﬁnal Ｒound"), "final-round");
        assert_eq!(slugify("日本"), "");
        assert_eq!(slugify("--snake_case--"), "snake_case");
        assert_eq!(slugify("a - b"), "a-b");
    }

    #[test]
    fn test_styles_diverge() {
        let title = "Launch: v2.0";
        assert_eq!(SlugStyle::Naive.apply(title), "launch:-v2.0");
        assert_eq!(SlugStyle::Slugify.apply(title), "launch-v20");
    }

    #[test]
    fn test_slugify_style_falls_back_to_naive() {
        assert_eq!(SlugStyle::Slugify.apply("!!!"), "!!!");
        assert_eq!(SlugStyle::Slugify.apply("日本 計画"), "日本-計画");
        assert_eq!(SlugStyle::Slugify.apply("Crème !!!"), "creme");
    }

    #[test]
    fn test_style_is_stable() {
        for style in [SlugStyle::Naive, SlugStyle::Slugify] {
            let once = style.apply("Release Train");
            assert_eq!(style.apply(&once), once);
        }
    }
}
