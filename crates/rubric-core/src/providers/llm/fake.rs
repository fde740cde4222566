use super::LlmClient;
use crate::model::LlmResponse;
use async_trait::async_trait;

/// Deterministic in-process judge for tests: returns a fixed response, or
/// fails every call when constructed with `failing`.
#[derive(Debug)]
pub struct FakeClient {
    model: String,
    fixed_response: Option<String>,
    fail: bool,
}

impl FakeClient {
    pub fn new(model: String) -> Self {
        Self {
            model,
            fixed_response: None,
            fail: false,
        }
    }

    pub fn with_response(mut self, response: String) -> Self {
        self.fixed_response = Some(response);
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }
}

#[async_trait]
impl LlmClient for FakeClient {
    async fn complete(&self, _prompt: &str) -> anyhow::Result<LlmResponse> {
        if self.fail {
            anyhow::bail!("fake judge provider error");
        }
        let text = self
            .fixed_response
            .clone()
            // Default: an unrecognizable response, lands on the neutral score.
            .unwrap_or_else(|| "no verdict".to_string());

        Ok(LlmResponse {
            text,
            provider: "fake".to_string(),
            model: self.model.clone(),
        })
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}
