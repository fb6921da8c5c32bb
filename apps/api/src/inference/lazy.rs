//! Load-on-first-use slot for models too expensive to load at startup.
//!
//! The load future runs on its own task, so a caller that disconnects mid-load
//! does not cancel it. Later callers wait for that same load instead of starting
//! another. The outcome, success or failure, is kept for the life of the process.

#![cfg_attr(not(feature = "local-models"), allow(dead_code))]

use std::future::Future;
use std::sync::Arc;

use tokio::sync::OnceCell;

pub struct LazySlot<T> {
    cell: Arc<OnceCell<Result<T, String>>>,
}

impl<T: Send + Sync + 'static> Default for LazySlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + Sync + 'static> LazySlot<T> {
    pub fn new() -> Self {
        Self {
            cell: Arc::new(OnceCell::new()),
        }
    }

    /// True once a load has succeeded.
    pub fn is_loaded(&self) -> bool {
        matches!(self.cell.get(), Some(Ok(_)))
    }

    /// Returns the loaded value, running `load` only if no load has started yet.
    pub async fn get_or_load<F, Fut>(&self, load: F) -> Result<&T, String>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, String>> + Send + 'static,
    {
        if self.cell.get().is_none() {
            let cell = Arc::clone(&self.cell);
            tokio::spawn(async move {
                cell.get_or_init(load).await;
            })
            .await
            .map_err(|e| format!("load task failed: {e}"))?;
        }

        match self.cell.get() {
            Some(Ok(value)) => Ok(value),
            Some(Err(reason)) => Err(reason.clone()),
            None => Err("load finished without a result".to_string()),
        }
    }
}
