//! Generation dispatch: validates the request, builds the prompt and routes it to
//! the local model or the hosted completion API.

use serde::Deserialize;
use tracing::info;

use crate::config::GenerationSettings;
use crate::errors::AppError;
use crate::generation::local::LocalGenerator;
use crate::generation::prompts::{build_prompt, TaskKind};
use crate::inference::ModelHandle;
use crate::llm_client::CompletionClient;

pub const LOCAL_MODEL_TAG: &str = "gpt-2";
pub const HOSTED_MODEL_TAG: &str = "openai";

fn default_model() -> String {
    LOCAL_MODEL_TAG.to_string()
}

/// Caller-supplied generation request. No server-side state is attached to it.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    pub task: String,
    #[serde(default)]
    pub cv_text: String,
    #[serde(default)]
    pub job_text: Option<String>,
    #[serde(default)]
    pub user_message: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub openai_api_key: Option<String>,
}

/// Which backend serves a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSelector {
    Local,
    Hosted { api_key: String },
}

impl ModelSelector {
    pub fn resolve(model: &str, api_key: Option<&str>) -> Result<Self, AppError> {
        match model {
            LOCAL_MODEL_TAG => Ok(ModelSelector::Local),
            HOSTED_MODEL_TAG => match api_key.map(str::trim).filter(|k| !k.is_empty()) {
                Some(key) => Ok(ModelSelector::Hosted {
                    api_key: key.to_string(),
                }),
                None => Err(AppError::InvalidInput(
                    "OpenAI API key must be provided for OpenAI model".to_string(),
                )),
            },
            other => Err(AppError::InvalidInput(format!("Unsupported model: '{other}'"))),
        }
    }
}

/// Backends and sampling parameters used by `generate_advice`.
pub struct Generators<'a> {
    pub local: &'a ModelHandle<dyn LocalGenerator>,
    pub hosted: &'a CompletionClient,
    pub settings: &'a GenerationSettings,
}

/// Full pipeline: task check → prompt → model selection → generation.
/// Every validation error is raised before any model is invoked.
pub async fn generate_advice(
    generators: &Generators<'_>,
    request: &GenerateRequest,
) -> Result<String, AppError> {
    let task = TaskKind::parse(&request.task)?;
    let prompt = build_prompt(
        task,
        &request.cv_text,
        request.job_text.as_deref(),
        request.user_message.as_deref(),
    );
    let selector = ModelSelector::resolve(&request.model, request.openai_api_key.as_deref())?;

    info!("Generating {:?} advice via {}", task, request.model);

    match selector {
        ModelSelector::Local => {
            let local = generators
                .local
                .get()
                .map_err(|e| AppError::Generation(e.to_string()))?;
            local.generate(prompt).await
        }
        ModelSelector::Hosted { api_key } => generators
            .hosted
            .complete(
                &api_key,
                &prompt,
                generators.settings.max_length,
                generators.settings.temperature,
            )
            .await
            .map_err(|e| AppError::Generation(e.to_string())),
    }
}
