//! The bounded worker pool.
//!
//! Workers share the queue's receiving channel and run one job at a time
//! per slot. Suspension points are only the channel wait and store I/O;
//! a job's steps never yield to each other.

use crate::job::JobId;
use crate::processor::Processor;
use crate::queue::FeedbackQueue;
use crate::PipelineConfig;
use std::sync::Arc;
use tokio::sync::{mpsc, watch, Mutex};
use tokio::task::JoinHandle;

/// Handle to the spawned worker tasks.
pub struct WorkerPool {
    shutdown_tx: watch::Sender<bool>,
    handles: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawn `config.concurrency` workers draining the queue's channel.
    pub fn spawn(
        queue: Arc<FeedbackQueue>,
        rx: mpsc::Receiver<JobId>,
        processor: Arc<Processor>,
        config: PipelineConfig,
    ) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let rx = Arc::new(Mutex::new(rx));

        let handles = (0..config.concurrency)
            .map(|slot| {
                tokio::spawn(worker_loop(
                    slot,
                    queue.clone(),
                    rx.clone(),
                    processor.clone(),
                    config.clone(),
                    shutdown_rx.clone(),
                ))
            })
            .collect();

        Self {
            shutdown_tx,
            handles,
        }
    }

    /// Signal shutdown and wait for in-flight jobs to finish.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        for handle in self.handles {
            let _ = handle.await;
        }
    }
}

async fn worker_loop(
    slot: usize,
    queue: Arc<FeedbackQueue>,
    rx: Arc<Mutex<mpsc::Receiver<JobId>>>,
    processor: Arc<Processor>,
    config: PipelineConfig,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    tracing::debug!(slot, "worker started");
    loop {
        let id = {
            let mut guard = rx.lock().await;
            tokio::select! {
                _ = shutdown_rx.changed() => break,
                id = guard.recv() => match id {
                    Some(id) => id,
                    None => break,
                },
            }
        };

        run_job(&queue, &processor, &config, id).await;
    }
    tracing::debug!(slot, "worker stopped");
}

/// Run one job to a terminal state, retrying transient failures from the
/// top with exponential backoff.
async fn run_job(
    queue: &FeedbackQueue,
    processor: &Processor,
    config: &PipelineConfig,
    id: JobId,
) {
    let Some(record) = queue.job(&id) else {
        tracing::warn!(job = %id, "dequeued job has no record, skipping");
        return;
    };
    let event = record.event;

    let mut attempt = 0;
    loop {
        attempt += 1;
        queue.mark_active(&id);

        match processor.process(&event).await {
            Ok(outcome) => {
                queue.mark_completed(&id);
                tracing::debug!(job = %id, ?outcome, attempt, "job completed");
                return;
            }
            Err(err) => {
                queue.record_attempt_error(&id, &err.to_string());
                if attempt >= config.max_attempts {
                    queue.mark_failed(&id, &err.to_string());
                    tracing::error!(
                        job = %id,
                        attempts = attempt,
                        error = %err,
                        "job failed, retries exhausted"
                    );
                    return;
                }

                let delay = config.backoff_for_attempt(attempt);
                tracing::warn!(
                    job = %id,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "job attempt failed, retrying"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}
