use crate::errors::RubricError;
use serde::{Deserialize, Serialize};

/// One evaluation case: a query, the answer the system under test produced
/// for it, the ground-truth answer, and the context the backend claims to
/// have retrieved. Constructed once at batch-build time and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalCase {
    pub input: String,
    /// Empty string signals an upstream backend failure, not a data error.
    pub actual_output: String,
    pub expected_output: String,
    #[serde(default)]
    pub retrieval_context: Vec<String>,
}

impl EvalCase {
    pub fn new(
        input: impl Into<String>,
        actual_output: impl Into<String>,
        expected_output: impl Into<String>,
        retrieval_context: Vec<String>,
    ) -> Result<Self, RubricError> {
        let input = input.into();
        let expected_output = expected_output.into();
        if input.is_empty() {
            return Err(RubricError::Config("case input must be non-empty".into()));
        }
        if expected_output.is_empty() {
            return Err(RubricError::Config(
                "case expected_output must be non-empty".into(),
            ));
        }
        Ok(Self {
            input,
            actual_output: actual_output.into(),
            expected_output,
            retrieval_context,
        })
    }
}

/// Batch input unit: one (query, expected answer) pair authored by the test
/// writer. The actual output is filled in by the backend at build time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CasePair {
    pub input: String,
    pub expected_output: String,
}

/// Normalized response from the system under test.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendResponse {
    #[serde(default)]
    pub output: String,
    #[serde(default)]
    pub retrieval_context: Vec<String>,
}

/// Raw completion from a judge provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmResponse {
    pub text: String,
    pub provider: String,
    pub model: String,
}

#[cfg(test)]
mod tests {
    use super::EvalCase;

    #[test]
    fn rejects_empty_input_and_expected() {
        assert!(EvalCase::new("", "a", "b", vec![]).is_err());
        assert!(EvalCase::new("q", "a", "", vec![]).is_err());
    }

    #[test]
    fn empty_actual_output_is_well_formed() {
        let case = EvalCase::new("q", "", "expected", vec![]).unwrap();
        assert!(case.actual_output.is_empty());
        assert_eq!(case.input, "q");
    }
}
