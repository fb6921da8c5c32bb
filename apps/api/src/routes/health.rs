use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::inference::ModelStatus;
use crate::state::AppState;

/// GET /
pub async fn root_handler() -> Json<Value> {
    Json(json!({ "message": "AI Service is running!" }))
}

/// GET /health
/// Returns service version and per-model readiness.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let local_generator = match state.local_generator.get() {
        Ok(generator) if generator.is_warm() => ModelStatus::Ready,
        Ok(_) => ModelStatus::Lazy,
        Err(_) => ModelStatus::Unavailable,
    };

    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "career-api",
        "models": {
            "entity_recognizer": status_of(state.recognizer.is_ready()),
            "sentence_embedder": status_of(state.embedder.is_ready()),
            "local_generator": local_generator,
        }
    }))
}

fn status_of(ready: bool) -> ModelStatus {
    if ready {
        ModelStatus::Ready
    } else {
        ModelStatus::Unavailable
    }
}
