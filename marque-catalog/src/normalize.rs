//! Free-text field normalization for imported rows.

/// Reduce a generation label to its first run of ASCII digits.
///
/// `"Mk5"` becomes `"5"`, `"E90 (6th)"` becomes `"90"`. Input without any
/// digits is returned unchanged.
pub fn normalize_generation(text: &str) -> String {
    let Some(start) = text.find(|c: char| c.is_ascii_digit()) else {
        return text.to_string();
    };
    let rest = &text[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    rest[..end].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_leading_digits_from_label() {
        assert_eq!(normalize_generation("Mk5"), "5");
        assert_eq!(normalize_generation("7th"), "7");
        assert_eq!(normalize_generation("Gen 12"), "12");
    }

    #[test]
    fn takes_only_the_first_run() {
        assert_eq!(normalize_generation("E90 (6th)"), "90");
        assert_eq!(normalize_generation("2-3"), "2");
    }

    #[test]
    fn no_digits_returns_input() {
        assert_eq!(normalize_generation("Generation V"), "Generation V");
        assert_eq!(normalize_generation(""), "");
    }

    #[test]
    fn already_normalized_is_unchanged() {
        assert_eq!(normalize_generation("11"), "11");
        assert_eq!(normalize_generation(&normalize_generation("Mk8")), "8");
    }
}
