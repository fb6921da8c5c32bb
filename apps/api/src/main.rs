mod config;
mod errors;
mod extraction;
mod generation;
mod inference;
mod llm_client;
mod matching;
mod models;
mod routes;
mod state;
#[cfg(test)]
mod test_support;

use anyhow::Result;
use std::net::SocketAddr;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::extraction::document::EntityRecognizer;
use crate::generation::local::LocalGenerator;
use crate::inference::ModelHandle;
use crate::llm_client::CompletionClient;
use crate::matching::embedder::SentenceEmbedder;
use crate::routes::build_router;
use crate::state::AppState;

/// Model handles built once at startup and shared read-only afterwards.
struct LoadedModels {
    recognizer: ModelHandle<dyn EntityRecognizer>,
    embedder: ModelHandle<dyn SentenceEmbedder>,
    local_generator: ModelHandle<dyn LocalGenerator>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (malformed env values abort startup)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Career AI service v{}", env!("CARGO_PKG_VERSION"));

    // Load models. A failure leaves that handle unavailable; the service still starts.
    let models = load_models(&config).await?;

    // Initialize hosted completion client (API key arrives per request)
    let completions = CompletionClient::new(
        config.openai_base_url.clone(),
        config.openai_completion_model.clone(),
        Duration::from_secs(config.hosted_request_timeout_secs),
    )?;
    info!(
        "Completion client initialized (model: {})",
        completions.model()
    );

    // Build app state
    let state = AppState {
        config: config.clone(),
        recognizer: models.recognizer,
        embedder: models.embedder,
        local_generator: models.local_generator,
        completions,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(feature = "local-models")]
async fn load_models(config: &Config) -> Result<LoadedModels> {
    use std::sync::Arc;
    use tracing::error;

    use crate::extraction::ner::BertEntityRecognizer;
    use crate::generation::gpt2::Gpt2Generator;
    use crate::matching::minilm::MiniLmEmbedder;

    // NER and embeddings are loaded eagerly, off the async runtime.
    let recognizer = match tokio::task::spawn_blocking(BertEntityRecognizer::load).await? {
        Ok(model) => {
            info!("NER model loaded");
            let model: Arc<dyn EntityRecognizer> = Arc::new(model);
            ModelHandle::ready("ner", model)
        }
        Err(e) => {
            error!("Failed to load NER model: {e}");
            ModelHandle::unavailable("ner", e.to_string())
        }
    };

    let embedder = match tokio::task::spawn_blocking(MiniLmEmbedder::load).await? {
        Ok(model) => {
            info!("Sentence embedding model loaded");
            let model: Arc<dyn SentenceEmbedder> = Arc::new(model);
            ModelHandle::ready("sentence-embeddings", model)
        }
        Err(e) => {
            error!("Failed to load sentence embedding model: {e}");
            ModelHandle::unavailable("sentence-embeddings", e.to_string())
        }
    };

    // GPT-2 loads on first /ai-generate call.
    let generator: Arc<dyn LocalGenerator> = Arc::new(Gpt2Generator::new(config.generation.clone()));
    info!(
        "GPT-2 generator registered (max_length: {}, temperature: {})",
        config.generation.max_length, config.generation.temperature
    );

    Ok(LoadedModels {
        recognizer,
        embedder,
        local_generator: ModelHandle::ready("gpt2", generator),
    })
}

#[cfg(not(feature = "local-models"))]
async fn load_models(_config: &Config) -> Result<LoadedModels> {
    const REASON: &str = "built without the `local-models` feature";
    tracing::warn!("Local models disabled: {REASON}");

    Ok(LoadedModels {
        recognizer: ModelHandle::unavailable("ner", REASON),
        embedder: ModelHandle::unavailable("sentence-embeddings", REASON),
        local_generator: ModelHandle::unavailable("gpt2", REASON),
    })
}
