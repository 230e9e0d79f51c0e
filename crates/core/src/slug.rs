//! URL slug derivation and validation.
//!
//! Every public catalog entity (brand, category, product, catalogue) is
//! addressed by a slug. Slugs are derived from the display name when the
//! client does not supply one, and validated when it does.

use std::sync::LazyLock;

use regex::Regex;

/// Maximum slug length accepted or produced. Matches the VARCHAR width in
/// the migrations.
pub const MAX_SLUG_LENGTH: usize = 120;

static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("valid regex"));

/// Check whether a client-supplied slug is well-formed.
///
/// A valid slug is non-empty, at most [`MAX_SLUG_LENGTH`] characters, and
/// consists of lowercase alphanumeric runs joined by single hyphens.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty() && slug.len() <= MAX_SLUG_LENGTH && SLUG_RE.is_match(slug)
}

/// Derive a slug from a display name.
///
/// Lowercases the input, maps every run of non-alphanumeric characters to a
/// single hyphen, strips leading/trailing hyphens, and truncates to
/// [`MAX_SLUG_LENGTH`] on a hyphen-safe boundary.
///
/// Returns `None` when the name contains no usable characters.
pub fn slugify(name: &str) -> Option<String> {
    let mut slug = String::with_capacity(name.len());
    let mut last_was_hyphen = true; // suppresses a leading hyphen

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    if slug.len() > MAX_SLUG_LENGTH {
        slug.truncate(MAX_SLUG_LENGTH);
        while slug.ends_with('-') {
            slug.pop();
        }
    }

    if slug.is_empty() {
        None
    } else {
        Some(slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_basic_name() {
        assert_eq!(slugify("Summer Collection"), Some("summer-collection".into()));
    }

    #[test]
    fn slugify_collapses_punctuation_runs() {
        assert_eq!(
            slugify("Løvstrand & Co. -- Fall '24"),
            Some("l-vstrand-co-fall-24".into())
        );
    }

    #[test]
    fn slugify_strips_edge_hyphens() {
        assert_eq!(slugify("  --Hello--  "), Some("hello".into()));
    }

    #[test]
    fn slugify_rejects_unusable_input() {
        assert_eq!(slugify("!!!"), None);
        assert_eq!(slugify(""), None);
        assert_eq!(slugify("   "), None);
    }

    #[test]
    fn slugify_truncates_long_names() {
        let name = "a".repeat(300);
        let slug = slugify(&name).unwrap();
        assert_eq!(slug.len(), MAX_SLUG_LENGTH);
        assert!(is_valid_slug(&slug));
    }

    #[test]
    fn valid_slugs_accepted() {
        assert!(is_valid_slug("summer-collection"));
        assert!(is_valid_slug("a"));
        assert!(is_valid_slug("2024-lookbook"));
    }

    #[test]
    fn invalid_slugs_rejected() {
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("Upper-Case"));
        assert!(!is_valid_slug("double--hyphen"));
        assert!(!is_valid_slug("-leading"));
        assert!(!is_valid_slug("trailing-"));
        assert!(!is_valid_slug("spaced out"));
        assert!(!is_valid_slug(&"a".repeat(MAX_SLUG_LENGTH + 1)));
    }

    #[test]
    fn slugify_output_is_always_valid() {
        for name in ["Maison Kléber", "B&O", "100% Cotton Tee", "été 2025"] {
            let slug = slugify(name).unwrap();
            assert!(is_valid_slug(&slug), "slugify({name:?}) produced {slug:?}");
        }
    }
}
