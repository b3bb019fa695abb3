//! Provider trait for generation backends

use async_trait::async_trait;

use super::{error::LlmError, types::GenerationResult};

/// Interface the HTTP handlers use to reach a text-generation backend
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Generate text for `prompt` with `model`
    ///
    /// Implementations apply their own retry policy; the returned error is
    /// final.
    async fn generate(&self, model: &str, prompt: &str) -> Result<GenerationResult, LlmError>;

    /// Identifiers of the models that support content generation
    async fn list_models(&self) -> Result<Vec<String>, LlmError>;
}
