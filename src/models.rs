use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SafetyLevel {
    #[serde(rename = "Low Concern")]
    Low,
    #[serde(rename = "Moderate Concern")]
    Moderate,
    #[serde(rename = "High Concern")]
    High,
}

impl std::fmt::Display for SafetyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SafetyLevel::Low => write!(f, "Low Concern"),
            SafetyLevel::Moderate => write!(f, "Moderate Concern"),
            SafetyLevel::High => write!(f, "High Concern"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyRecord {
    pub function: String,
    pub ewg_score: u8,
    pub safety_level: SafetyLevel,
    pub reason_for_concern: String,
    pub common_use: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientRecord {
    pub name: String,
    pub function: String,
    pub ewg_score: u8,
    pub safety_level: SafetyLevel,
    pub reason_for_concern: String,
    pub common_use: String,
}

impl IngredientRecord {
    /// Join a display name with a value copy of the resolved safety data.
    pub fn new(name: String, record: SafetyRecord) -> Self {
        IngredientRecord {
            name,
            function: record.function,
            ewg_score: record.ewg_score,
            safety_level: record.safety_level,
            reason_for_concern: record.reason_for_concern,
            common_use: record.common_use,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PolicyVerdict {
    Pass,
    Warn,
    Error,
}

impl std::fmt::Display for PolicyVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolicyVerdict::Pass => write!(f, "pass"),
            PolicyVerdict::Warn => write!(f, "warn"),
            PolicyVerdict::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Assessment {
    #[serde(flatten)]
    pub ingredient: IngredientRecord,
    pub verdict: PolicyVerdict,
}
