use async_trait::async_trait;

use crate::errors::AppError;

/// Sentence-embedding backend. Returns one fixed-dimension vector per input, in order.
///
/// Carried in `AppState` as a `ModelHandle<dyn SentenceEmbedder>`.
#[async_trait]
pub trait SentenceEmbedder: Send + Sync {
    async fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, AppError>;
}
