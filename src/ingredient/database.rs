use crate::models::{SafetyLevel, SafetyRecord};

/// One row of the built-in reference table.
struct Entry {
    name: &'static str,
    function: &'static str,
    ewg_score: u8,
    safety_level: SafetyLevel,
    reason_for_concern: &'static str,
    common_use: &'static str,
}

impl Entry {
    fn record(&self) -> SafetyRecord {
        SafetyRecord {
            function: self.function.to_string(),
            ewg_score: self.ewg_score,
            safety_level: self.safety_level,
            reason_for_concern: self.reason_for_concern.to_string(),
            common_use: self.common_use.to_string(),
        }
    }
}

// Declaration order is the match order: the analyzer scans top to bottom and
// takes the first substring-containment hit, so an entry sharing a name
// fragment with a later entry shadows it for ambiguous tokens.
const INGREDIENTS: &[Entry] = &[
    Entry {
        name: "water",
        function: "Solvent",
        ewg_score: 1,
        safety_level: SafetyLevel::Low,
        reason_for_concern: "",
        common_use: "Base ingredient in most products",
    },
    Entry {
        name: "sodium lauryl sulfate",
        function: "Surfactant, Cleansing Agent",
        ewg_score: 3,
        safety_level: SafetyLevel::Moderate,
        reason_for_concern: "Potential skin irritation, environmental concerns",
        common_use: "Foaming agent in cleansers, shampoos",
    },
    Entry {
        name: "parabens",
        function: "Preservative",
        ewg_score: 8,
        safety_level: SafetyLevel::High,
        reason_for_concern: "Hormone disruption, potential link to breast cancer",
        common_use: "Preservative in cosmetics and personal care products",
    },
    Entry {
        name: "fragrance",
        function: "Fragrance",
        ewg_score: 8,
        safety_level: SafetyLevel::High,
        reason_for_concern: "Allergies, hormone disruption, undisclosed ingredients",
        common_use: "Scent in personal care products",
    },
    Entry {
        name: "glycerin",
        function: "Humectant",
        ewg_score: 2,
        safety_level: SafetyLevel::Low,
        reason_for_concern: "",
        common_use: "Moisturizing agent in skin care",
    },
    Entry {
        name: "tocopherol",
        function: "Antioxidant",
        ewg_score: 1,
        safety_level: SafetyLevel::Low,
        reason_for_concern: "",
        common_use: "Vitamin E, preserves product freshness",
    },
    Entry {
        name: "sodium benzoate",
        function: "Preservative",
        ewg_score: 3,
        safety_level: SafetyLevel::Moderate,
        reason_for_concern: "Potential skin irritant, forms benzene with vitamin C",
        common_use: "Preservative in food and cosmetics",
    },
    Entry {
        name: "phenoxyethanol",
        function: "Preservative",
        ewg_score: 4,
        safety_level: SafetyLevel::Moderate,
        reason_for_concern: "Potential skin and lung irritant",
        common_use: "Common preservative in cosmetics",
    },
    Entry {
        name: "retinyl palmitate",
        function: "Anti-aging",
        ewg_score: 9,
        safety_level: SafetyLevel::High,
        reason_for_concern: "Photosensitivity, potential reproductive toxicity",
        common_use: "Form of Vitamin A used in anti-aging products",
    },
    Entry {
        name: "titanium dioxide",
        function: "UV filter, Colorant",
        ewg_score: 6,
        safety_level: SafetyLevel::Moderate,
        reason_for_concern: "Potential respiratory concern when in powder form",
        common_use: "Sunscreen ingredient, colorant in makeup",
    },
];

/// Exact lookup by canonical name (lowercase, trimmed).
pub fn get(canonical_name: &str) -> Option<SafetyRecord> {
    INGREDIENTS
        .iter()
        .find(|e| e.name == canonical_name)
        .map(Entry::record)
}

/// Canonical ingredient names in match-priority order.
pub fn canonical_names() -> impl Iterator<Item = &'static str> {
    INGREDIENTS.iter().map(|e| e.name)
}

/// Fallback record for ingredients with no table match.
pub fn unknown() -> SafetyRecord {
    SafetyRecord {
        function: "Unknown".to_string(),
        ewg_score: 5,
        safety_level: SafetyLevel::Moderate,
        reason_for_concern: "Limited safety data available".to_string(),
        common_use: "Various applications".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_known_ingredient() {
        let record = get("water").unwrap();
        assert_eq!(record.function, "Solvent");
        assert_eq!(record.ewg_score, 1);
        assert_eq!(record.safety_level, SafetyLevel::Low);
        assert_eq!(record.reason_for_concern, "");
    }

    #[test]
    fn test_get_multi_word_key() {
        let record = get("retinyl palmitate").unwrap();
        assert_eq!(record.ewg_score, 9);
        assert_eq!(record.safety_level, SafetyLevel::High);
    }

    #[test]
    fn test_get_is_case_sensitive() {
        // Callers are expected to normalize before lookup.
        assert!(get("Water").is_none());
        assert!(get(" water ").is_none());
    }

    #[test]
    fn test_get_missing_key() {
        assert!(get("unobtainium").is_none());
    }

    #[test]
    fn test_unknown_fallback_fields() {
        let record = unknown();
        assert_eq!(record.function, "Unknown");
        assert_eq!(record.ewg_score, 5);
        assert_eq!(record.safety_level, SafetyLevel::Moderate);
        assert_eq!(record.reason_for_concern, "Limited safety data available");
        assert_eq!(record.common_use, "Various applications");
    }

    #[test]
    fn test_keys_are_canonical_and_unique() {
        let names: Vec<&str> = canonical_names().collect();
        for name in &names {
            assert_eq!(*name, name.trim().to_lowercase());
            assert!(!name.contains(|c| matches!(c, ',' | ';' | '\n')));
        }
        let mut deduped = names.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(deduped.len(), names.len());
    }

    #[test]
    fn test_returned_records_are_copies() {
        let mut first = get("glycerin").unwrap();
        first.function.push_str(" (edited)");
        let second = get("glycerin").unwrap();
        assert_eq!(second.function, "Humectant");
    }
}
