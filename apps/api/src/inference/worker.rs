//! Dedicated inference thread for models that cannot be shared across threads.
//!
//! The model is constructed on the worker thread and never leaves it. Async callers
//! submit closures over a bounded queue and await the reply on a oneshot channel,
//! so torch-backed pipelines never block the tokio scheduler.
#![cfg_attr(not(feature = "local-models"), allow(dead_code))]

use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc as std_mpsc;
use std::thread;

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error};

const QUEUE_DEPTH: usize = 64;

type Job<M> = Box<dyn FnOnce(&M) + Send + 'static>;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("{0} model failed to load: {1}")]
    Load(&'static str, String),

    #[error("{0} worker is not running")]
    Stopped(&'static str),

    #[error("{0} inference panicked")]
    Panicked(&'static str),
}

pub struct ModelWorker<M: 'static> {
    name: &'static str,
    jobs: mpsc::Sender<Job<M>>,
}

impl<M: 'static> Clone for ModelWorker<M> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            jobs: self.jobs.clone(),
        }
    }
}

impl<M: 'static> ModelWorker<M> {
    /// Spawns the worker thread and blocks until `load` has finished.
    /// Call from a blocking context (`spawn_blocking` or before the runtime starts).
    pub fn spawn<L>(name: &'static str, load: L) -> Result<Self, WorkerError>
    where
        L: FnOnce() -> anyhow::Result<M> + Send + 'static,
    {
        let (jobs_tx, mut jobs_rx) = mpsc::channel::<Job<M>>(QUEUE_DEPTH);
        let (ready_tx, ready_rx) = std_mpsc::sync_channel::<Result<(), String>>(1);

        thread::Builder::new()
            .name(format!("{name}-worker"))
            .spawn(move || {
                let model = match load() {
                    Ok(model) => {
                        let _ = ready_tx.send(Ok(()));
                        model
                    }
                    Err(e) => {
                        let _ = ready_tx.send(Err(format!("{e:#}")));
                        return;
                    }
                };
                while let Some(job) = jobs_rx.blocking_recv() {
                    job(&model);
                }
                debug!("{name} worker shutting down");
            })
            .map_err(|e| WorkerError::Load(name, e.to_string()))?;

        match ready_rx.recv() {
            Ok(Ok(())) => Ok(Self {
                name,
                jobs: jobs_tx,
            }),
            Ok(Err(reason)) => Err(WorkerError::Load(name, reason)),
            Err(_) => Err(WorkerError::Load(
                name,
                "worker thread exited while loading".to_string(),
            )),
        }
    }

    /// Runs `f` against the model on the worker thread.
    pub async fn run<R, F>(&self, f: F) -> Result<R, WorkerError>
    where
        F: FnOnce(&M) -> R + Send + 'static,
        R: Send + 'static,
    {
        let name = self.name;
        let (reply_tx, reply_rx) = oneshot::channel();
        let job: Job<M> = Box::new(move |model: &M| {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| f(model)));
            if outcome.is_err() {
                error!("{name} inference panicked");
            }
            let _ = reply_tx.send(outcome.ok());
        });

        self.jobs
            .send(job)
            .await
            .map_err(|_| WorkerError::Stopped(name))?;

        reply_rx
            .await
            .map_err(|_| WorkerError::Stopped(name))?
            .ok_or(WorkerError::Panicked(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    // Deliberately !Sync: the worker must never need to share it.
    struct Counter {
        calls: Cell<u32>,
    }

    fn spawn_counter() -> ModelWorker<Counter> {
        ModelWorker::spawn("counter", || {
            Ok(Counter {
                calls: Cell::new(0),
            })
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_run_executes_on_worker_in_order() {
        let worker = tokio::task::spawn_blocking(spawn_counter).await.unwrap();
        for expected in 1..=3 {
            let seen = worker
                .run(|c: &Counter| {
                    c.calls.set(c.calls.get() + 1);
                    c.calls.get()
                })
                .await
                .unwrap();
            assert_eq!(seen, expected);
        }
    }

    #[test]
    fn test_load_failure_is_reported() {
        let result = ModelWorker::<Counter>::spawn("broken", || anyhow::bail!("no weights"));
        match result {
            Err(WorkerError::Load(name, reason)) => {
                assert_eq!(name, "broken");
                assert!(reason.contains("no weights"));
            }
            _ => panic!("expected load error"),
        }
    }

    #[tokio::test]
    async fn test_panicking_job_does_not_kill_worker() {
        let worker = tokio::task::spawn_blocking(spawn_counter).await.unwrap();

        let err = worker
            .run(|_c: &Counter| -> u32 { panic!("tensor shape mismatch") })
            .await
            .unwrap_err();
        assert!(matches!(err, WorkerError::Panicked("counter")));

        let still_alive = worker.run(|c: &Counter| c.calls.get()).await.unwrap();
        assert_eq!(still_alive, 0);
    }
}
