//! Answer generation with a hosted language model

pub mod chat;
pub mod prompt;

pub use chat::ChatCompletionClient;
pub use prompt::PromptBuilder;

use async_trait::async_trait;

use crate::error::Result;

/// Trait for prompt-in, text-out answer generation
///
/// Implementations:
/// - `ChatCompletionClient`: OpenAI-compatible chat-completion endpoint (Groq by default)
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send one prompt and return the model's reply
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Get provider name for logging
    fn name(&self) -> &str;

    /// Get the model being used
    fn model(&self) -> &str;
}
