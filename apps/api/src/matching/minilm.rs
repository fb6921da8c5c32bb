use async_trait::async_trait;
use rust_bert::pipelines::sentence_embeddings::{
    SentenceEmbeddingsBuilder, SentenceEmbeddingsModel, SentenceEmbeddingsModelType,
};

use crate::errors::AppError;
use crate::inference::{ModelWorker, WorkerError};
use crate::matching::embedder::SentenceEmbedder;

/// all-MiniLM-L6-v2 sentence embeddings (384 dimensions).
pub struct MiniLmEmbedder {
    worker: ModelWorker<SentenceEmbeddingsModel>,
}

impl MiniLmEmbedder {
    /// Downloads (first run) and loads the model. Blocking.
    pub fn load() -> Result<Self, WorkerError> {
        let worker = ModelWorker::spawn("sentence-embeddings", || {
            let model = SentenceEmbeddingsBuilder::remote(SentenceEmbeddingsModelType::AllMiniLmL6V2)
                .create_model()?;
            Ok(model)
        })?;
        Ok(Self { worker })
    }
}

#[async_trait]
impl SentenceEmbedder for MiniLmEmbedder {
    async fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, AppError> {
        self.worker
            .run(move |model| model.encode(&texts).map_err(|e| e.to_string()))
            .await
            .map_err(|e| AppError::Processing(e.to_string()))?
            .map_err(|e| AppError::Processing(format!("Embedding failed: {e}")))
    }
}
