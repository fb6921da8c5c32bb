use async_trait::async_trait;

use crate::errors::AppError;

/// In-process text generation. Sampling parameters are fixed at construction.
#[async_trait]
pub trait LocalGenerator: Send + Sync {
    /// Returns the first generated sequence for `prompt`.
    async fn generate(&self, prompt: String) -> Result<String, AppError>;

    /// False while the weights have not been loaded yet.
    fn is_warm(&self) -> bool {
        true
    }
}
