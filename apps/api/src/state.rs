use crate::config::Config;
use crate::extraction::document::EntityRecognizer;
use crate::generation::local::LocalGenerator;
use crate::inference::ModelHandle;
use crate::llm_client::CompletionClient;
use crate::matching::embedder::SentenceEmbedder;

/// Shared application state injected into all route handlers via Axum extractors.
/// Model handles are loaded once at startup and only read afterwards.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub recognizer: ModelHandle<dyn EntityRecognizer>,
    pub embedder: ModelHandle<dyn SentenceEmbedder>,
    /// GPT-2 loads on first use; the handle itself is created at startup.
    pub local_generator: ModelHandle<dyn LocalGenerator>,
    pub completions: CompletionClient,
}
