//! BERT (CoNLL-03) entity recognizer backed by rust-bert.

use async_trait::async_trait;
use rust_bert::pipelines::ner::NERModel;

use crate::errors::AppError;
use crate::extraction::document::{Entity, EntityLabel, EntityRecognizer, ResumeDocument};
use crate::inference::{ModelWorker, WorkerError};

pub struct BertEntityRecognizer {
    worker: ModelWorker<NERModel>,
}

impl BertEntityRecognizer {
    /// Downloads (first run) and loads the model. Blocking.
    pub fn load() -> Result<Self, WorkerError> {
        let worker = ModelWorker::spawn("ner", || Ok(NERModel::new(Default::default())?))?;
        Ok(Self { worker })
    }
}

#[async_trait]
impl EntityRecognizer for BertEntityRecognizer {
    async fn annotate(&self, text: &str) -> Result<ResumeDocument, AppError> {
        let input = text.to_string();
        let predictions = self
            .worker
            .run(move |model| model.predict_full_entities(&[input.as_str()]))
            .await
            .map_err(|e| AppError::Processing(e.to_string()))?;

        let entities = predictions
            .into_iter()
            .next()
            .unwrap_or_default()
            .into_iter()
            .map(|e| Entity::new(e.word, EntityLabel::from_tag(&e.label)))
            .collect();

        Ok(ResumeDocument::new(text, entities))
    }
}
