//! Deterministic model stand-ins and router helpers shared by handler tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use crate::config::{Config, GenerationSettings};
use crate::errors::AppError;
use crate::extraction::document::{Entity, EntityLabel, EntityRecognizer, ResumeDocument};
use crate::generation::local::LocalGenerator;
use crate::inference::ModelHandle;
use crate::llm_client::CompletionClient;
use crate::matching::embedder::SentenceEmbedder;
use crate::routes::build_router;
use crate::state::AppState;

/// Tags each configured organisation name that occurs in the text.
pub struct StubRecognizer {
    organizations: Vec<String>,
}

#[async_trait]
impl EntityRecognizer for StubRecognizer {
    async fn annotate(&self, text: &str) -> Result<ResumeDocument, AppError> {
        let entities = self
            .organizations
            .iter()
            .filter(|org| text.contains(org.as_str()))
            .map(|org| Entity::new(org.clone(), EntityLabel::Organization))
            .collect();
        Ok(ResumeDocument::new(text, entities))
    }
}

pub fn recognizer_handle(organizations: &[&str]) -> ModelHandle<dyn EntityRecognizer> {
    let recognizer: Arc<dyn EntityRecognizer> = Arc::new(StubRecognizer {
        organizations: organizations.iter().map(|s| s.to_string()).collect(),
    });
    ModelHandle::ready("ner", recognizer)
}

pub fn unavailable_recognizer() -> ModelHandle<dyn EntityRecognizer> {
    ModelHandle::unavailable("ner", "not loaded in tests")
}

/// Loaded recognizer whose every call fails with `message`.
pub struct FailingRecognizer {
    message: String,
}

#[async_trait]
impl EntityRecognizer for FailingRecognizer {
    async fn annotate(&self, _text: &str) -> Result<ResumeDocument, AppError> {
        Err(AppError::Processing(self.message.clone()))
    }
}

pub fn failing_recognizer(message: &str) -> ModelHandle<dyn EntityRecognizer> {
    let recognizer: Arc<dyn EntityRecognizer> = Arc::new(FailingRecognizer {
        message: message.to_string(),
    });
    ModelHandle::ready("ner", recognizer)
}

const BAG_DIMENSIONS: usize = 1024;

/// Hashed word-count vectors. Shared words raise cosine similarity.
pub struct BagOfWordsEmbedder;

impl BagOfWordsEmbedder {
    fn vectorize(text: &str) -> Vec<f32> {
        let mut vector = vec![0.0; BAG_DIMENSIONS];
        for word in text.split_whitespace() {
            let token = word
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase();
            if token.is_empty() {
                continue;
            }
            vector[fnv1a(&token) % BAG_DIMENSIONS] += 1.0;
        }
        vector
    }
}

fn fnv1a(token: &str) -> usize {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in token.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0100_0000_01b3);
    }
    hash as usize
}

#[async_trait]
impl SentenceEmbedder for BagOfWordsEmbedder {
    async fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, AppError> {
        Ok(texts.iter().map(|t| Self::vectorize(t)).collect())
    }
}

/// Embedder that returns structurally wrong output.
pub enum MalformedEmbedder {
    /// One vector short of the input count.
    MissingVector,
    /// Every vector after the first has a different dimension.
    RaggedDimensions,
}

#[async_trait]
impl SentenceEmbedder for MalformedEmbedder {
    async fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, AppError> {
        let mut vectors = BagOfWordsEmbedder.embed(texts).await?;
        match self {
            MalformedEmbedder::MissingVector => {
                vectors.pop();
            }
            MalformedEmbedder::RaggedDimensions => {
                for vector in vectors.iter_mut().skip(1) {
                    vector.truncate(8);
                }
            }
        }
        Ok(vectors)
    }
}

pub fn embedder_handle(embedder: Arc<dyn SentenceEmbedder>) -> ModelHandle<dyn SentenceEmbedder> {
    ModelHandle::ready("sentence-embeddings", embedder)
}

/// Records the last prompt and answers with a canned reply or error.
pub struct StubGenerator {
    reply: Result<String, String>,
    warm: bool,
    last_prompt: Mutex<Option<String>>,
}

impl StubGenerator {
    pub fn ok() -> Self {
        Self {
            reply: Ok("1. Lead with your Python projects.".to_string()),
            warm: true,
            last_prompt: Mutex::new(None),
        }
    }

    /// Working generator whose weights have not been loaded yet.
    pub fn cold() -> Self {
        Self {
            warm: false,
            ..Self::ok()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            ..Self::ok()
        }
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl LocalGenerator for StubGenerator {
    async fn generate(&self, prompt: String) -> Result<String, AppError> {
        *self.last_prompt.lock().unwrap() = Some(prompt);
        self.reply.clone().map_err(AppError::Generation)
    }

    fn is_warm(&self) -> bool {
        self.warm
    }
}

pub fn local_generator_handle(generator: Arc<dyn LocalGenerator>) -> ModelHandle<dyn LocalGenerator> {
    ModelHandle::ready("gpt2", generator)
}

pub fn test_config() -> Config {
    Config {
        port: 0,
        rust_log: "debug".to_string(),
        job_match_top_k: 5,
        generation: GenerationSettings::default(),
        openai_base_url: "http://127.0.0.1:9".to_string(),
        openai_completion_model: "test-model".to_string(),
        hosted_request_timeout_secs: 1,
        max_upload_bytes: 1024 * 1024,
    }
}

fn test_completions(config: &Config) -> CompletionClient {
    CompletionClient::new(
        config.openai_base_url.clone(),
        config.openai_completion_model.clone(),
        Duration::from_secs(config.hosted_request_timeout_secs),
    )
    .unwrap()
}

/// State with every model backed by a deterministic stub.
pub fn test_state(organizations: &[&str], generator: StubGenerator) -> AppState {
    let config = test_config();
    AppState {
        completions: test_completions(&config),
        config,
        recognizer: recognizer_handle(organizations),
        embedder: embedder_handle(Arc::new(BagOfWordsEmbedder)),
        local_generator: local_generator_handle(Arc::new(generator)),
    }
}

/// State as seen by a build whose models all failed to load.
pub fn test_state_without_models() -> AppState {
    let config = test_config();
    AppState {
        completions: test_completions(&config),
        config,
        recognizer: unavailable_recognizer(),
        embedder: ModelHandle::unavailable("sentence-embeddings", "not loaded in tests"),
        local_generator: ModelHandle::unavailable("gpt2", "not loaded in tests"),
    }
}

pub async fn send(state: AppState, request: Request<Body>) -> (StatusCode, Value) {
    let response = build_router(state).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

pub async fn post_json(state: AppState, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(state, request).await
}

pub async fn get(state: AppState, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(state, request).await
}
