use async_trait::async_trait;
use rubric_core::metrics_api::{Metric, MetricResult};
use rubric_core::model::EvalCase;

const DEFAULT_THRESHOLD: f64 = 1.0;

/// Deterministic metric: score 1.0 iff the actual output equals the expected
/// output byte for byte (case-sensitive, whitespace-significant), else 0.0.
/// Never touches the network.
pub struct ExactMatchMetric {
    threshold: f64,
}

impl ExactMatchMetric {
    pub fn new() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl Default for ExactMatchMetric {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Metric for ExactMatchMetric {
    fn name(&self) -> &str {
        "exact_match"
    }

    fn threshold(&self) -> f64 {
        self.threshold
    }

    async fn evaluate(&self, case: &EvalCase) -> anyhow::Result<MetricResult> {
        let (score, reason) = if case.actual_output == case.expected_output {
            (1.0, "actual output matches expected output exactly")
        } else {
            (0.0, "actual output differs from expected output")
        };
        Ok(MetricResult::from_score(score, self.threshold, reason))
    }
}
