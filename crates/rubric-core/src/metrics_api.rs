use crate::model::EvalCase;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Outcome of one (case, metric) evaluation. Each call owns its own result;
/// metrics carry no per-case mutable state and are safe to share across
/// concurrently evaluated cases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricResult {
    pub score: f64,
    pub passed: bool,
    pub reason: String,
}

impl MetricResult {
    /// `passed` is always derived as `score >= threshold`.
    pub fn from_score(score: f64, threshold: f64, reason: impl Into<String>) -> Self {
        Self {
            score,
            passed: score >= threshold,
            reason: reason.into(),
        }
    }
}

#[async_trait]
pub trait Metric: Send + Sync {
    fn name(&self) -> &str;
    fn threshold(&self) -> f64;
    async fn evaluate(&self, case: &EvalCase) -> anyhow::Result<MetricResult>;
}
