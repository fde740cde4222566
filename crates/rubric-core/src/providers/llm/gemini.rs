use super::LlmClient;
use crate::model::LlmResponse;
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub struct GeminiClient {
    pub model: String,
    pub api_key: String,
    client: reqwest::Client,
    base_url: String,
}

impl GeminiClient {
    pub fn new(model: String, api_key: String) -> Self {
        Self::with_base_url(
            model,
            api_key,
            "https://generativelanguage.googleapis.com/v1beta".to_string(),
        )
    }

    /// Override the API host; used to point the client at a local stub.
    pub fn with_base_url(model: String, api_key: String, base_url: String) -> Self {
        Self {
            model,
            api_key,
            // Construction-time programming error; the per-call timeout
            // must never be silently dropped.
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
                .build()
                .expect("failed to construct judge http client"),
            base_url,
        }
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn complete(&self, prompt: &str) -> anyhow::Result<LlmResponse> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
        });

        tracing::debug!(model = %self.model, "sending judge completion request");
        let resp = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let error_text = resp.text().await.unwrap_or_else(|_| String::new());
            anyhow::bail!("Gemini API error (status {}): {}", status, error_text);
        }

        let json: serde_json::Value = resp.json().await?;

        // Parse candidates[0].content.parts[0].text
        let text = json
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(|v| v.as_str())
            .ok_or_else(|| anyhow::anyhow!("Gemini API response missing candidate text"))?
            .trim()
            .to_string();

        Ok(LlmResponse {
            text,
            provider: "gemini".to_string(),
            model: self.model.clone(),
        })
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }
}
