mod fake;
mod gemini;

pub use fake::FakeClient;
pub use gemini::GeminiClient;

use crate::model::LlmResponse;
use async_trait::async_trait;

/// A text-completion provider used purely as a grader: one prompt in, one
/// free-text response out. No conversation history, no streaming.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> anyhow::Result<LlmResponse>;
    fn provider_name(&self) -> &'static str;
}
