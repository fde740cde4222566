use async_trait::async_trait;
use rubric_core::config::Settings;
use rubric_core::errors::RubricError;
use rubric_core::judge::prompt::build_grading_prompt;
use rubric_core::judge::score::extract_score;
use rubric_core::metrics_api::{Metric, MetricResult};
use rubric_core::model::EvalCase;
use rubric_core::providers::llm::LlmClient;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

const DEFAULT_THRESHOLD: f64 = 0.5;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// LLM-as-judge metric parameterized by a free-text grading criterion.
///
/// One evaluation is one completion call: render the grading prompt, send
/// it, map the free-text response to a score with the heuristic in
/// `rubric_core::judge::score`. The full response text is kept verbatim as
/// the rationale. A failed or timed-out judge call is recorded as score 0.0
/// with the failure description; it never propagates out of the evaluation.
pub struct JudgeCriteriaMetric {
    name: String,
    criteria: String,
    threshold: f64,
    include_context: bool,
    call_timeout: Duration,
    client: Arc<dyn LlmClient>,
}

impl std::fmt::Debug for JudgeCriteriaMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JudgeCriteriaMetric")
            .field("name", &self.name)
            .field("criteria", &self.criteria)
            .field("threshold", &self.threshold)
            .field("include_context", &self.include_context)
            .field("call_timeout", &self.call_timeout)
            .finish_non_exhaustive()
    }
}

impl JudgeCriteriaMetric {
    pub fn new(
        name: impl Into<String>,
        criteria: impl Into<String>,
        client: Arc<dyn LlmClient>,
    ) -> Result<Self, RubricError> {
        let name = name.into();
        let criteria = criteria.into();
        if criteria.trim().is_empty() {
            return Err(RubricError::Config(format!(
                "judge metric '{}' requires non-empty criteria",
                name
            )));
        }
        Ok(Self::build(name, criteria, client))
    }

    fn build(name: String, criteria: String, client: Arc<dyn LlmClient>) -> Self {
        Self {
            name,
            criteria,
            threshold: DEFAULT_THRESHOLD,
            include_context: true,
            call_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            client,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Result<Self, RubricError> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(RubricError::Config(format!(
                "judge metric '{}' threshold {} outside [0, 1]",
                self.name, threshold
            )));
        }
        self.threshold = threshold;
        Ok(self)
    }

    /// Omit the retrieved-context section from the grading prompt.
    pub fn context_free(mut self) -> Self {
        self.include_context = false;
        self
    }

    pub fn with_call_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self
    }

    /// Apply batch-config settings: `timeout_seconds` bounds the judge call.
    pub fn with_settings(mut self, settings: &Settings) -> Self {
        if let Some(secs) = settings.timeout_seconds {
            self.call_timeout = Duration::from_secs(secs);
        }
        self
    }

    // Canned rubrics carried over from the original evaluation suite.

    pub fn relevance(client: Arc<dyn LlmClient>) -> Self {
        Self::build(
            "relevance".into(),
            "Does the answer directly and completely address the user's question?".into(),
            client,
        )
    }

    pub fn faithfulness(client: Arc<dyn LlmClient>) -> Self {
        Self::build(
            "faithfulness".into(),
            "Is the answer factually consistent with the retrieved context and free of \
             hallucinations?"
                .into(),
            client,
        )
    }

    pub fn context_relevance(client: Arc<dyn LlmClient>) -> Self {
        Self::build(
            "context_relevance".into(),
            "Does the retrieved context contain information that is directly useful to answer \
             the query?"
                .into(),
            client,
        )
    }

    pub fn context_precision(client: Arc<dyn LlmClient>) -> Self {
        Self::build(
            "context_precision".into(),
            "Among all retrieved context, how much is actually relevant and non-redundant for \
             the query?"
                .into(),
            client,
        )
    }

    pub fn context_recall(client: Arc<dyn LlmClient>) -> Self {
        Self::build(
            "context_recall".into(),
            "Does the context include all necessary information needed to fully answer the \
             user's question?"
                .into(),
            client,
        )
    }
}

#[async_trait]
impl Metric for JudgeCriteriaMetric {
    fn name(&self) -> &str {
        &self.name
    }

    fn threshold(&self) -> f64 {
        self.threshold
    }

    async fn evaluate(&self, case: &EvalCase) -> anyhow::Result<MetricResult> {
        let prompt = build_grading_prompt(&self.criteria, case, self.include_context);

        let result = match timeout(self.call_timeout, self.client.complete(&prompt)).await {
            Ok(Ok(resp)) => {
                let text = resp.text.trim().to_string();
                let score = extract_score(&text);
                MetricResult::from_score(score, self.threshold, text)
            }
            Ok(Err(e)) => {
                tracing::warn!(metric = %self.name, error = %e, "judge call failed, scoring 0.0");
                MetricResult::from_score(
                    0.0,
                    self.threshold,
                    format!("judge call failed: {}", e),
                )
            }
            Err(_) => {
                tracing::warn!(metric = %self.name, "judge call timed out, scoring 0.0");
                MetricResult::from_score(
                    0.0,
                    self.threshold,
                    format!("judge call timed out after {:?}", self.call_timeout),
                )
            }
        };
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rubric_core::model::LlmResponse;
    use rubric_core::providers::llm::FakeClient;

    fn client_with(text: &str) -> Arc<dyn LlmClient> {
        Arc::new(FakeClient::new("fake-model".into()).with_response(text.into()))
    }

    fn case() -> EvalCase {
        EvalCase::new(
            "Tell me about crime rate",
            "The crime rate dropped by about 2% in 2023.",
            "NYPD data shows a 2% drop in overall crime in 2023.",
            vec!["NYPD data shows a 2% drop in overall crime in 2023.".into()],
        )
        .unwrap()
    }

    #[tokio::test]
    async fn score_follows_judge_response_text() {
        let metric =
            JudgeCriteriaMetric::new("relevance", "addresses the question", client_with("1 - excellent answer"))
                .unwrap();
        let r = metric.evaluate(&case()).await.unwrap();
        assert_eq!(r.score, 1.0);
        assert!(r.passed);
        assert_eq!(r.reason, "1 - excellent answer");
    }

    #[tokio::test]
    async fn ambiguous_response_lands_on_neutral_score() {
        let metric = JudgeCriteriaMetric::new(
            "relevance",
            "addresses the question",
            client_with("unclear, maybe fine"),
        )
        .unwrap();
        let r = metric.evaluate(&case()).await.unwrap();
        assert_eq!(r.score, 0.5);
        assert!(r.passed); // default threshold 0.5
    }

    #[tokio::test]
    async fn judge_failure_scores_zero_with_diagnostic_rationale() {
        let client: Arc<dyn LlmClient> = Arc::new(FakeClient::new("fake-model".into()).failing());
        let metric = JudgeCriteriaMetric::new("faithfulness", "consistent with context", client)
            .unwrap();
        let r = metric.evaluate(&case()).await.unwrap();
        assert_eq!(r.score, 0.0);
        assert!(!r.passed);
        assert!(r.reason.contains("judge call failed"));
        assert!(r.reason.contains("fake judge provider error"));
    }

    #[tokio::test]
    async fn hung_judge_call_times_out_and_scores_zero() {
        struct HangingClient;

        #[async_trait]
        impl LlmClient for HangingClient {
            async fn complete(&self, _prompt: &str) -> anyhow::Result<LlmResponse> {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                unreachable!("sleep outlives the test timeout")
            }
            fn provider_name(&self) -> &'static str {
                "hanging"
            }
        }

        let metric = JudgeCriteriaMetric::new("relevance", "c", Arc::new(HangingClient))
            .unwrap()
            .with_call_timeout(Duration::from_millis(20));
        let r = metric.evaluate(&case()).await.unwrap();
        assert_eq!(r.score, 0.0);
        assert!(r.reason.contains("timed out"));
    }

    #[tokio::test]
    async fn empty_criteria_is_rejected_at_construction() {
        let err = JudgeCriteriaMetric::new("relevance", "   ", client_with("1")).unwrap_err();
        assert!(err.to_string().starts_with("config error:"));
    }

    #[tokio::test]
    async fn out_of_range_threshold_is_rejected() {
        let metric = JudgeCriteriaMetric::new("relevance", "c", client_with("1")).unwrap();
        assert!(metric.with_threshold(1.5).is_err());
    }

    #[tokio::test]
    async fn config_settings_drive_the_call_timeout() {
        let cfg = rubric_core::config::EvalConfig::from_yaml(
            "suite: s\nsettings:\n  timeout_seconds: 5\ncases: []",
        )
        .unwrap();
        let metric = JudgeCriteriaMetric::new("relevance", "c", client_with("1"))
            .unwrap()
            .with_settings(&cfg.settings);
        assert_eq!(metric.call_timeout, Duration::from_secs(5));

        // Absent setting keeps the fixed default bound.
        let metric = JudgeCriteriaMetric::new("relevance", "c", client_with("1"))
            .unwrap()
            .with_settings(&Settings::default());
        assert_eq!(metric.call_timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[tokio::test]
    async fn canned_rubrics_use_expected_names_and_defaults() {
        let client = client_with("score: 0.9, grounded in the context");
        let metric = JudgeCriteriaMetric::faithfulness(client);
        assert_eq!(metric.name(), "faithfulness");
        assert_eq!(metric.threshold(), 0.5);
        let r = metric.evaluate(&case()).await.unwrap();
        assert_eq!(r.score, 0.9);
        assert!(r.passed);
    }
}
