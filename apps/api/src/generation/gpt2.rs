//! GPT-2 text generation via rust-bert.
//!
//! The pipeline is loaded on the first request rather than at startup. The load
//! outcome is cached either way, so a failed load is reported on every later call.
//! `tch::manual_seed` runs before each generation, making output a function of the
//! prompt and the configured sampling parameters.

use async_trait::async_trait;
use rust_bert::gpt2::{
    Gpt2ConfigResources, Gpt2MergesResources, Gpt2ModelResources, Gpt2VocabResources,
};
use rust_bert::pipelines::common::{ModelResource, ModelType};
use rust_bert::pipelines::text_generation::{TextGenerationConfig, TextGenerationModel};
use rust_bert::resources::RemoteResource;
use tracing::{error, info};

use crate::config::GenerationSettings;
use crate::errors::AppError;
use crate::generation::local::LocalGenerator;
use crate::inference::{LazySlot, ModelWorker};

/// Base GPT-2 (124M) with plain top-k sampling and a single returned sequence.
fn gpt2_config(settings: &GenerationSettings) -> TextGenerationConfig {
    TextGenerationConfig {
        model_type: ModelType::GPT2,
        model_resource: ModelResource::Torch(Box::new(RemoteResource::from_pretrained(
            Gpt2ModelResources::GPT2,
        ))),
        config_resource: Box::new(RemoteResource::from_pretrained(Gpt2ConfigResources::GPT2)),
        vocab_resource: Box::new(RemoteResource::from_pretrained(Gpt2VocabResources::GPT2)),
        merges_resource: Some(Box::new(RemoteResource::from_pretrained(
            Gpt2MergesResources::GPT2,
        ))),
        max_length: Some(i64::from(settings.max_length)),
        do_sample: true,
        temperature: settings.temperature,
        top_k: 50,
        top_p: 1.0,
        num_beams: 1,
        no_repeat_ngram_size: 0,
        num_return_sequences: 1,
        ..Default::default()
    }
}

pub struct Gpt2Generator {
    settings: GenerationSettings,
    worker: LazySlot<ModelWorker<TextGenerationModel>>,
}

impl Gpt2Generator {
    pub fn new(settings: GenerationSettings) -> Self {
        Self {
            settings,
            worker: LazySlot::new(),
        }
    }

    async fn worker(&self) -> Result<&ModelWorker<TextGenerationModel>, AppError> {
        let settings = self.settings.clone();
        self.worker
            .get_or_load(move || async move {
                let loaded = tokio::task::spawn_blocking(move || {
                    ModelWorker::spawn("gpt2", move || {
                        Ok(TextGenerationModel::new(gpt2_config(&settings))?)
                    })
                })
                .await;

                match loaded {
                    Ok(Ok(worker)) => {
                        info!("GPT-2 pipeline loaded");
                        Ok(worker)
                    }
                    Ok(Err(e)) => {
                        error!("Failed to load GPT-2 pipeline: {e}");
                        Err(e.to_string())
                    }
                    Err(e) => Err(format!("spawn_blocking failed loading GPT-2: {e}")),
                }
            })
            .await
            .map_err(|reason| AppError::Generation(format!("Failed to load GPT-2 pipeline: {reason}")))
    }
}

#[async_trait]
impl LocalGenerator for Gpt2Generator {
    async fn generate(&self, prompt: String) -> Result<String, AppError> {
        let worker = self.worker().await?;
        let seed = self.settings.seed;

        let outputs = worker
            .run(move |model| {
                tch::manual_seed(seed);
                model
                    .generate(&[prompt.as_str()], None)
                    .map_err(|e| e.to_string())
            })
            .await
            .map_err(|e| AppError::Generation(e.to_string()))?
            .map_err(|e| AppError::Generation(format!("GPT-2 generation failed: {e}")))?;

        outputs
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Generation("GPT-2 returned no sequences".to_string()))
    }

    fn is_warm(&self) -> bool {
        self.worker.is_loaded()
    }
}
