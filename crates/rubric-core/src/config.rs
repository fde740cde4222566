use crate::errors::RubricError;
use crate::model::CasePair;
use serde::{Deserialize, Serialize};

/// Batch configuration, authored as YAML:
///
/// ```yaml
/// suite: qa-smoke
/// settings:
///   parallel: 4
///   timeout_seconds: 10
/// cases:
///   - input: "Tell me about crime rate"
///     expected_output: "NYPD data shows a 2% drop in overall crime in 2023."
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalConfig {
    pub suite: String,
    #[serde(default)]
    pub settings: Settings,
    pub cases: Vec<CasePair>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    pub parallel: Option<usize>,
    pub timeout_seconds: Option<u64>,
}

impl EvalConfig {
    pub fn from_yaml(raw: &str) -> Result<Self, RubricError> {
        serde_yaml::from_str(raw)
            .map_err(|e| RubricError::Config(format!("failed to parse yaml: {}", e)))
    }
}
