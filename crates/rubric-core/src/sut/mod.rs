pub mod mock;

pub use mock::MockBackend;

use crate::errors::RubricError;
use crate::model::{BackendResponse, CasePair, EvalCase};
use async_trait::async_trait;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// The system under test, as seen by the harness: a query in, an answer and
/// optional retrieval context out. Injectable so batches can be built
/// against deterministic fakes instead of a live service.
#[async_trait]
pub trait QueryBackend: Send + Sync {
    async fn fetch(&self, query: &str) -> anyhow::Result<BackendResponse>;
}

/// HTTP adapter for the `POST /query` contract:
/// request `{"input": <query>}`, response
/// `{"output": <string>, "retrieval_context": [<string>...]}` with missing
/// fields defaulting to empty.
pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            // Construction-time programming error; the per-call timeout
            // must never be silently dropped.
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
                .build()
                .expect("failed to construct backend http client"),
        }
    }
}

#[async_trait]
impl QueryBackend for HttpBackend {
    async fn fetch(&self, query: &str) -> anyhow::Result<BackendResponse> {
        let url = format!("{}/query", self.base_url);
        let resp = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "input": query }))
            .send()
            .await?;

        if !resp.status().is_success() {
            anyhow::bail!("backend returned status {}", resp.status());
        }

        let mut body: BackendResponse = resp.json().await?;
        body.output = body.output.trim().to_string();
        Ok(body)
    }
}

/// Build the batch: one backend call per pair, in input order, completed
/// before any metric runs. A failed call degrades to an empty answer with a
/// logged diagnostic; it never aborts the batch. Malformed pairs (empty
/// input or expected answer) are authoring mistakes and do fail fast.
pub async fn build_cases(
    backend: &dyn QueryBackend,
    pairs: &[CasePair],
) -> Result<Vec<EvalCase>, RubricError> {
    let mut cases = Vec::with_capacity(pairs.len());
    for pair in pairs {
        let resp = match backend.fetch(&pair.input).await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!(query = %pair.input, error = %e, "backend call failed, recording empty output");
                BackendResponse::default()
            }
        };
        cases.push(EvalCase::new(
            pair.input.clone(),
            resp.output,
            pair.expected_output.clone(),
            resp.retrieval_context,
        )?);
    }
    Ok(cases)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct DownBackend;

    #[async_trait]
    impl QueryBackend for DownBackend {
        async fn fetch(&self, _query: &str) -> anyhow::Result<BackendResponse> {
            anyhow::bail!("connection refused")
        }
    }

    fn pairs() -> Vec<CasePair> {
        vec![
            CasePair {
                input: "Tell me about crime rate".into(),
                expected_output: "NYPD data shows a 2% drop in overall crime in 2023.".into(),
            },
            CasePair {
                input: "Explain about burglary incidents".into(),
                expected_output: "Burglary incidents were highest in precincts 19 and 23 last year."
                    .into(),
            },
        ]
    }

    #[test]
    fn http_backend_constructs_with_its_fixed_timeout() {
        // Construction panics rather than falling back to an unbounded client.
        let _ = HttpBackend::new("http://127.0.0.1:8000");
    }

    #[tokio::test]
    async fn failed_backend_call_degrades_to_empty_case() {
        let cases = build_cases(&DownBackend, &pairs()).await.unwrap();
        assert_eq!(cases.len(), 2);
        for case in &cases {
            assert!(case.actual_output.is_empty());
            assert!(case.retrieval_context.is_empty());
            assert!(!case.expected_output.is_empty());
        }
    }

    #[tokio::test]
    async fn mock_backend_fills_output_and_context() {
        let cases = build_cases(&MockBackend::default(), &pairs()).await.unwrap();
        assert!(cases[0].actual_output.contains("2%"));
        assert_eq!(
            cases[0].retrieval_context,
            vec!["NYPD data shows a 2% drop in overall crime in 2023.".to_string()]
        );
    }

    #[tokio::test]
    async fn malformed_pair_fails_fast() {
        let bad = vec![CasePair {
            input: String::new(),
            expected_output: "x".into(),
        }];
        assert!(build_cases(&MockBackend::default(), &bad).await.is_err());
    }
}
