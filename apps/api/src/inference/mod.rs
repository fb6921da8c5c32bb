// Process-wide model handles.
// Models are loaded once at startup. A failed load is recorded here and reported
// on every call instead of being retried per request.

pub mod lazy;
pub mod worker;

use std::sync::Arc;

use serde::Serialize;

use crate::errors::AppError;

pub use lazy::LazySlot;
pub use worker::{ModelWorker, WorkerError};

/// Readiness of a model handle, as reported by `GET /health`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelStatus {
    Ready,
    /// Handle exists but the weights load on first use.
    Lazy,
    Unavailable,
}

/// A load-once, read-only handle to a model backend.
pub struct ModelHandle<T: ?Sized> {
    name: &'static str,
    slot: Result<Arc<T>, Arc<str>>,
}

impl<T: ?Sized> Clone for ModelHandle<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            slot: self.slot.clone(),
        }
    }
}

impl<T: ?Sized> ModelHandle<T> {
    pub fn ready(name: &'static str, model: Arc<T>) -> Self {
        Self {
            name,
            slot: Ok(model),
        }
    }

    pub fn unavailable(name: &'static str, reason: impl Into<String>) -> Self {
        let reason: String = reason.into();
        Self {
            name,
            slot: Err(reason.into()),
        }
    }

    /// Returns the model, or `ModelUnavailable` if it failed to load.
    pub fn get(&self) -> Result<&T, AppError> {
        self.slot.as_deref().map_err(|reason| {
            AppError::ModelUnavailable(format!("{} model not loaded: {reason}", self.name))
        })
    }

    pub fn is_ready(&self) -> bool {
        self.slot.is_ok()
    }
}
