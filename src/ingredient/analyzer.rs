use crate::ingredient::database;
use crate::models::{IngredientRecord, SafetyRecord};

/// Analyze a free-text ingredient list as found on a product label.
///
/// Handles:
/// - `,` / `;` / newline delimiters (runs collapse to a single separator)
/// - stray whitespace and empty segments
/// - arbitrary casing (matching is case-insensitive)
/// - partial naming via two-way substring containment
///
/// Total over all inputs: unrecognized ingredients resolve to the fallback
/// record, never to an error. Output order follows token order; duplicates
/// are kept.
pub fn analyze_ingredients(text: &str) -> Vec<IngredientRecord> {
    text.split(|c| matches!(c, ',' | ';' | '\n'))
        .map(|segment| segment.trim().to_lowercase())
        .filter(|token| !token.is_empty())
        .map(|token| {
            let record = resolve(&token);
            IngredientRecord::new(display_name(&token), record)
        })
        .collect()
}

/// Resolve a normalized token against the reference table.
///
/// A key matches when either string contains the other; the first match in
/// table order wins. This is imprecise on purpose: it lets partial names
/// like "fragrance oil blend" hit the "fragrance" entry, at the cost of
/// false positives for tokens sharing a fragment with an unrelated key.
fn resolve(token: &str) -> SafetyRecord {
    database::canonical_names()
        .find(|&name| token.contains(name) || name.contains(token))
        .and_then(database::get)
        .unwrap_or_else(database::unknown)
}

/// Uppercase only the first character; the rest of the token stays as
/// normalized (no word-by-word title casing).
fn display_name(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SafetyLevel;

    #[test]
    fn test_empty_input() {
        assert!(analyze_ingredients("").is_empty());
    }

    #[test]
    fn test_delimiters_and_whitespace_only() {
        assert!(analyze_ingredients(",,;\n").is_empty());
        assert!(analyze_ingredients("  \n\t ,  ; ").is_empty());
    }

    #[test]
    fn test_mixed_delimiters_preserve_order() {
        let records = analyze_ingredients("Water, Glycerin;Tocopherol\nFragrance");
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Water", "Glycerin", "Tocopherol", "Fragrance"]);

        assert_eq!(records[0].ewg_score, 1);
        assert_eq!(records[1].function, "Humectant");
        assert_eq!(records[2].common_use, "Vitamin E, preserves product freshness");
        assert_eq!(records[3].ewg_score, 8);
        assert_eq!(records[3].safety_level, SafetyLevel::High);
    }

    #[test]
    fn test_delimiter_runs_collapse() {
        let records = analyze_ingredients("water,,glycerin,");
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Water", "Glycerin"]);
    }

    #[test]
    fn test_whitespace_normalization() {
        let padded = analyze_ingredients("  Water  ");
        let bare = analyze_ingredients("water");
        assert_eq!(padded, bare);
    }

    #[test]
    fn test_case_insensitive_matching() {
        let upper = analyze_ingredients("PARABENS");
        let lower = analyze_ingredients("parabens");
        assert_eq!(upper.len(), 1);
        assert_eq!(upper[0].function, lower[0].function);
        assert_eq!(upper[0].ewg_score, lower[0].ewg_score);
        assert_eq!(upper[0].safety_level, lower[0].safety_level);
        assert_eq!(upper[0].reason_for_concern, lower[0].reason_for_concern);
        assert_eq!(upper[0].common_use, lower[0].common_use);
        assert_eq!(upper[0].ewg_score, 8);
    }

    #[test]
    fn test_unrecognized_ingredient_falls_back() {
        let records = analyze_ingredients("xyzzy-unobtainium");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Xyzzy-unobtainium");
        assert_eq!(records[0].ewg_score, 5);
        assert_eq!(records[0].safety_level, SafetyLevel::Moderate);
        assert_eq!(records[0].reason_for_concern, "Limited safety data available");
    }

    #[test]
    fn test_token_containing_key_matches() {
        // "fragrance oil blend" contains the key "fragrance".
        let records = analyze_ingredients("fragrance oil blend");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Fragrance oil blend");
        assert_eq!(records[0].function, "Fragrance");
        assert_eq!(records[0].ewg_score, 8);
    }

    #[test]
    fn test_key_containing_token_matches() {
        // "benzoate" is contained in the key "sodium benzoate".
        let records = analyze_ingredients("benzoate");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].function, "Preservative");
        assert_eq!(records[0].ewg_score, 3);
    }

    #[test]
    fn test_display_name_is_not_title_cased() {
        let records = analyze_ingredients("SODIUM LAURYL SULFATE");
        assert_eq!(records[0].name, "Sodium lauryl sulfate");
    }

    #[test]
    fn test_duplicates_are_kept() {
        let records = analyze_ingredients("water, water");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], records[1]);
    }

    #[test]
    fn test_windows_line_endings() {
        // "\r" is not a delimiter but trims away as whitespace.
        let records = analyze_ingredients("water\r\nglycerin");
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Water", "Glycerin"]);
    }
}
