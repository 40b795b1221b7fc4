//! Color normalization for OOXML hex values.
//!
//! Word writes colors as bare six-digit hex (`C00000`), templates and humans
//! tend to write them with a leading `#` and in either case. Everything is
//! compared in the normalized form returned by [`normalize_color`].

/// Normalize a color to six uppercase hex digits.
///
/// Returns `None` for `auto`, empty values and anything that is not exactly
/// six hex digits once a leading `#` is stripped.
pub fn normalize_color(value: &str) -> Option<String> {
    let trimmed = value.trim();
    let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if hex.len() != 6 || !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return None;
    }
    Some(hex.to_ascii_uppercase())
}

/// Case-insensitive, `#`-agnostic color comparison.
pub fn colors_match(actual: &str, expected: &str) -> bool {
    match (normalize_color(actual), normalize_color(expected)) {
        (Some(left), Some(right)) => left == right,
        _ => false,
    }
}

/// Compare an optional observed color against an expected one.
pub fn optional_color_matches(actual: Option<&str>, expected: &str) -> bool {
    actual.is_some_and(|value| colors_match(value, expected))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_hash_and_uppercases() {
        assert_eq!(normalize_color("#c00000"), Some("C00000".to_string()));
        assert_eq!(normalize_color(" e8f4f4 "), Some("E8F4F4".to_string()));
    }

    #[test]
    fn rejects_auto_and_short_values() {
        assert_eq!(normalize_color("auto"), None);
        assert_eq!(normalize_color("#FFF"), None);
        assert_eq!(normalize_color(""), None);
    }

    #[test]
    fn matches_across_case_and_hash() {
        assert!(colors_match("c00000", "#C00000"));
        assert!(!colors_match("c00001", "C00000"));
        assert!(!colors_match("auto", "auto"));
    }
}
