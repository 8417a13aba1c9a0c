//! Slug and text helpers
//!
//! Pure string functions shared by column detection, URL resolution and
//! page classification.

use once_cell::sync::Lazy;
use regex::Regex;

static SLUG_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9-]+$").expect("Invalid slug shape regex")
});

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+").expect("Invalid whitespace regex")
});

/// Whether `text` looks like a slug: lowercase ASCII letters, digits and hyphens only.
///
/// Empty text never matches.
#[must_use]
pub fn is_slug_shaped(text: &str) -> bool {
    SLUG_SHAPE.is_match(text)
}

/// Normalise a table cell into a slug.
///
/// Trims, lowercases and collapses every run of internal whitespace into a
/// single hyphen. Returns `None` when nothing is left.
///
/// # Examples
/// ```
/// # use catalog_audit::utils::normalize_slug;
/// assert_eq!(normalize_slug("  Diamond Ring  ").as_deref(), Some("diamond-ring"));
/// assert_eq!(normalize_slug("   "), None);
/// ```
#[must_use]
pub fn normalize_slug(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lowered = trimmed.to_lowercase();
    Some(WHITESPACE_RUN.replace_all(&lowered, "-").into_owned())
}

/// Truncate to at most `max_chars` characters without splitting a UTF-8 sequence.
#[inline]
#[must_use]
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        None => s,
        Some((byte_idx, _)) => &s[..byte_idx],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_shape_accepts_plain_slugs() {
        assert!(is_slug_shaped("diamond-ring"));
        assert!(is_slug_shaped("ring-2024"));
        assert!(is_slug_shaped("a"));
    }

    #[test]
    fn slug_shape_rejects_display_text() {
        assert!(!is_slug_shaped(""));
        assert!(!is_slug_shaped("Diamond Ring"));
        assert!(!is_slug_shaped("diamond ring"));
        assert!(!is_slug_shaped("diamond_ring"));
        assert!(!is_slug_shaped("Rp 1.000.000"));
    }

    #[test]
    fn normalize_collapses_internal_whitespace() {
        assert_eq!(normalize_slug("  Diamond Ring  ").as_deref(), Some("diamond-ring"));
        assert_eq!(normalize_slug("Rose\t\tGold \n Band").as_deref(), Some("rose-gold-band"));
        assert_eq!(normalize_slug("already-a-slug").as_deref(), Some("already-a-slug"));
    }

    #[test]
    fn normalize_rejects_blank_cells() {
        assert_eq!(normalize_slug(""), None);
        assert_eq!(normalize_slug(" \t\n"), None);
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("Hello, World!", 5), "Hello");
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("Hi", 100), "Hi");
    }
}
