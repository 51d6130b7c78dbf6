use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use serde::Deserialize;

use crate::models::{IngredientRecord, PolicyVerdict, SafetyLevel};

/// Root configuration structure, deserialized from `.ingredient-checkr/config.toml`.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Verdict policy rules.
    pub policy: PolicyConfig,
}

/// Defines how analyzed ingredients are evaluated.
///
/// The reference safety data itself is built in and not configurable; policy
/// only decides which verdict each analyzed ingredient receives.
#[derive(Debug, Deserialize)]
pub struct PolicyConfig {
    /// Verdict applied when neither an ingredient override nor a level rule
    /// matches. Defaults to `warn`.
    #[serde(default = "default_policy_action")]
    pub default: PolicyAction,
    /// Verdict per safety level.
    #[serde(default)]
    pub levels: LevelPolicy,
    /// Per-ingredient overrides keyed by the normalized (lowercase) name as
    /// it was typed, e.g. `"fragrance"`, `"retinyl palmitate"`.
    #[serde(default)]
    pub ingredients: HashMap<String, PolicyAction>,
}

/// Optional verdict rule per safety level; an unset level falls through to
/// the default action.
#[derive(Debug, Default, Deserialize)]
pub struct LevelPolicy {
    pub low: Option<PolicyAction>,
    pub moderate: Option<PolicyAction>,
    pub high: Option<PolicyAction>,
}

fn default_policy_action() -> PolicyAction {
    PolicyAction::Warn
}

/// The action to take when an ingredient matches a policy rule.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "lowercase")]
pub enum PolicyAction {
    /// Ingredient is acceptable; no action needed.
    Pass,
    /// Ingredient warrants review but does not fail the check.
    Warn,
    /// Ingredient violates policy; the CLI exits with code 1.
    Error,
}

impl PolicyAction {
    /// Convert to the corresponding [`PolicyVerdict`].
    pub fn to_verdict(&self) -> PolicyVerdict {
        match self {
            PolicyAction::Pass => PolicyVerdict::Pass,
            PolicyAction::Warn => PolicyVerdict::Warn,
            PolicyAction::Error => PolicyVerdict::Error,
        }
    }
}

impl Default for Config {
    /// Built-in default policy used when no config file is found.
    ///
    /// Low-concern ingredients pass, moderate-concern ingredients warn, and
    /// high-concern ingredients produce an error.
    fn default() -> Self {
        Config {
            policy: PolicyConfig {
                default: PolicyAction::Warn,
                levels: LevelPolicy {
                    low: Some(PolicyAction::Pass),
                    moderate: Some(PolicyAction::Warn),
                    high: Some(PolicyAction::Error),
                },
                ingredients: HashMap::new(),
            },
        }
    }
}

/// Load the policy configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<working_dir>/.ingredient-checkr/config.toml`
/// 3. `~/.config/ingredient-checkr/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(working_dir: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        let content = std::fs::read_to_string(path)?;
        return Ok(toml::from_str(&content)?);
    }

    let local_config = working_dir.join(".ingredient-checkr").join("config.toml");
    if local_config.exists() {
        let content = std::fs::read_to_string(&local_config)?;
        return Ok(toml::from_str(&content)?);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("ingredient-checkr")
            .join("config.toml");
        if home_config.exists() {
            let content = std::fs::read_to_string(&home_config)?;
            return Ok(toml::from_str(&content)?);
        }
    }

    Ok(Config::default())
}

/// Determine the policy verdict for one analyzed ingredient.
///
/// Per-ingredient overrides are checked first (keyed by the normalized name,
/// which for unrecognized ingredients is all the identity the record has),
/// then the safety-level rule, then the default action.
pub fn apply_policy(config: &Config, ingredient: &IngredientRecord) -> PolicyVerdict {
    if let Some(action) = config.policy.ingredients.get(&ingredient.name.to_lowercase()) {
        return action.to_verdict();
    }

    let level_rule = match ingredient.safety_level {
        SafetyLevel::Low => config.policy.levels.low.as_ref(),
        SafetyLevel::Moderate => config.policy.levels.moderate.as_ref(),
        SafetyLevel::High => config.policy.levels.high.as_ref(),
    };

    match level_rule {
        Some(action) => action.to_verdict(),
        None => config.policy.default.to_verdict(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingredient::analyzer::analyze_ingredients;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn default_config() -> Config {
        Config::default()
    }

    fn analyzed(text: &str) -> IngredientRecord {
        analyze_ingredients(text).remove(0)
    }

    #[test]
    fn test_default_low_passes() {
        let cfg = default_config();
        assert_eq!(apply_policy(&cfg, &analyzed("water")), PolicyVerdict::Pass);
        assert_eq!(apply_policy(&cfg, &analyzed("glycerin")), PolicyVerdict::Pass);
    }

    #[test]
    fn test_default_moderate_warns() {
        let cfg = default_config();
        assert_eq!(
            apply_policy(&cfg, &analyzed("phenoxyethanol")),
            PolicyVerdict::Warn
        );
    }

    #[test]
    fn test_default_high_errors() {
        let cfg = default_config();
        assert_eq!(apply_policy(&cfg, &analyzed("parabens")), PolicyVerdict::Error);
        assert_eq!(apply_policy(&cfg, &analyzed("fragrance")), PolicyVerdict::Error);
    }

    #[test]
    fn test_unrecognized_uses_level_rule() {
        // Fallback records carry Moderate Concern, so they warn by default.
        let cfg = default_config();
        assert_eq!(
            apply_policy(&cfg, &analyzed("xyzzy-unobtainium")),
            PolicyVerdict::Warn
        );
    }

    #[test]
    fn test_ingredient_override_beats_level_rule() {
        let mut cfg = default_config();
        cfg.policy
            .ingredients
            .insert("fragrance".to_string(), PolicyAction::Pass);
        assert_eq!(apply_policy(&cfg, &analyzed("Fragrance")), PolicyVerdict::Pass);
    }

    #[test]
    fn test_unset_level_falls_back_to_default() {
        let cfg = Config {
            policy: PolicyConfig {
                default: PolicyAction::Error,
                levels: LevelPolicy::default(),
                ingredients: HashMap::new(),
            },
        };
        assert_eq!(apply_policy(&cfg, &analyzed("water")), PolicyVerdict::Error);
    }

    #[test]
    fn test_load_config_from_override_path() {
        let toml = r#"
[policy]
default = "pass"

[policy.levels]
high = "error"

[policy.ingredients]
"titanium dioxide" = "error"
"#;
        let mut f = NamedTempFile::new().unwrap();
        write!(f, "{}", toml).unwrap();

        let cfg = load_config(Path::new("/nonexistent"), Some(f.path())).unwrap();
        assert_eq!(apply_policy(&cfg, &analyzed("water")), PolicyVerdict::Pass);
        assert_eq!(apply_policy(&cfg, &analyzed("parabens")), PolicyVerdict::Error);
        assert_eq!(
            apply_policy(&cfg, &analyzed("Titanium Dioxide")),
            PolicyVerdict::Error
        );
    }

    #[test]
    fn test_load_config_missing_everything_uses_default() {
        let cfg = load_config(Path::new("/nonexistent"), None).unwrap();
        assert_eq!(apply_policy(&cfg, &analyzed("water")), PolicyVerdict::Pass);
    }
}
