//! Normalized section key generation.
//!
//! Section keys index the `sections` map of a document. The mapping is
//! deliberately not injective: distinct titles may collapse to the same key,
//! in which case the later section overwrites the earlier entry while the
//! hierarchy log keeps both. The algorithm:
//! - Lowercase the title
//! - Drop every character that is not alphanumeric, underscore, or whitespace
//! - Collapse whitespace runs into a single underscore
//! - Trim leading/trailing whitespace before joining

/// Normalizes a section title into a stable key.
///
/// Pure and total: never fails, returns an empty string for titles with no
/// usable characters.
pub fn normalize(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();

    cleaned.split_whitespace().collect::<Vec<_>>().join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_title() {
        assert_eq!(normalize("Early History!"), "early_history");
    }

    #[test]
    fn test_multiple_spaces_collapsed() {
        assert_eq!(normalize("  Multiple   Spaces "), "multiple_spaces");
    }

    #[test]
    fn test_punctuation_removed() {
        assert_eq!(normalize("Signs & Symptoms (overview)"), "signs_symptoms_overview");
    }

    #[test]
    fn test_underscores_preserved() {
        assert_eq!(normalize("my_section name"), "my_section_name");
    }

    #[test]
    fn test_numbers_kept() {
        assert_eq!(normalize("History: 1900-1950"), "history_19001950");
    }

    #[test]
    fn test_empty_title() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_only_punctuation() {
        assert_eq!(normalize("!@#$%"), "");
    }

    #[test]
    fn test_collision_by_design() {
        // Distinct titles may collapse to the same key.
        assert_eq!(normalize("Treatment?"), normalize("Treatment!"));
    }
}
