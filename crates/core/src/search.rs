//! Product listing & search helpers.
//!
//! This module lives in `core` (zero internal deps) so it can be used by
//! both the API/repository layer and any future CLI tooling.

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Default number of products per listing page.
pub const DEFAULT_PAGE_LIMIT: i64 = 24;

/// Maximum number of products per listing page.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

// ---------------------------------------------------------------------------
// Free-text matching
// ---------------------------------------------------------------------------

/// Turn free-text input into an ILIKE pattern.
///
/// Escapes the ILIKE metacharacters (`\`, `%`, `_`) in the trimmed input and
/// wraps it in `%...%` for substring matching. Empty or whitespace-only
/// input returns `None`, which callers treat as "facet absent".
///
/// # Examples
///
/// ```
/// use vitrine_core::search::like_pattern;
/// assert_eq!(like_pattern("wool coat"), Some("%wool coat%".to_string()));
/// assert_eq!(like_pattern("100%_off"), Some("%100\\%\\_off%".to_string()));
/// assert_eq!(like_pattern("   "), None);
/// ```
pub fn like_pattern(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut escaped = String::with_capacity(trimmed.len() + 2);
    escaped.push('%');
    for c in trimmed.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    Some(escaped)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- like_pattern --------------------------------------------------------

    #[test]
    fn pattern_wraps_plain_text() {
        assert_eq!(like_pattern("coat"), Some("%coat%".to_string()));
    }

    #[test]
    fn pattern_trims_whitespace() {
        assert_eq!(like_pattern("  wool coat "), Some("%wool coat%".to_string()));
    }

    #[test]
    fn pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("50%"), Some("%50\\%%".to_string()));
        assert_eq!(like_pattern("a_b"), Some("%a\\_b%".to_string()));
        assert_eq!(like_pattern(r"back\slash"), Some("%back\\\\slash%".to_string()));
    }

    #[test]
    fn pattern_empty_returns_none() {
        assert_eq!(like_pattern(""), None);
        assert_eq!(like_pattern("   "), None);
    }

    // -- clamp_limit ---------------------------------------------------------

    #[test]
    fn clamp_limit_uses_default_when_none() {
        assert_eq!(clamp_limit(None, 24, 100), 24);
    }

    #[test]
    fn clamp_limit_respects_max() {
        assert_eq!(clamp_limit(Some(500), 24, 100), 100);
    }

    #[test]
    fn clamp_limit_floors_at_one() {
        assert_eq!(clamp_limit(Some(-5), 24, 100), 1);
        assert_eq!(clamp_limit(Some(0), 24, 100), 1);
    }

    #[test]
    fn clamp_limit_passes_through_valid_value() {
        assert_eq!(clamp_limit(Some(48), 24, 100), 48);
    }

    // -- clamp_offset --------------------------------------------------------

    #[test]
    fn clamp_offset_defaults_to_zero() {
        assert_eq!(clamp_offset(None), 0);
    }

    #[test]
    fn clamp_offset_floors_at_zero() {
        assert_eq!(clamp_offset(Some(-10)), 0);
    }

    #[test]
    fn clamp_offset_passes_through_valid_value() {
        assert_eq!(clamp_offset(Some(48)), 48);
    }
}
