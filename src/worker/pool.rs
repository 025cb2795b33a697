//! Bounded worker pool
//!
//! Architecture:
//! 1. `run` spawns `min(workers, tasks)` worker loops into a `JoinSet`
//! 2. Tasks are sent in input order into one bounded mpsc queue (capacity = workers)
//! 3. Each worker locks the receiver, takes the next task, releases the lock, processes it
//! 4. A full queue blocks the dispatcher (backpressure)
//! 5. Dropping the sender lets workers drain and exit; `run` returns after all have joined
//!
//! Each task runs in its own spawned future so a panic is contained to that
//! task and the worker keeps pulling.

use super::{FetchTask, TaskProcessor};
use crate::observability::{RunCounters, RunSummary};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

type TaskQueue = Arc<Mutex<mpsc::Receiver<FetchTask>>>;

pub struct WorkerPool<P: TaskProcessor> {
    processor: Arc<P>,
    workers: usize,
}

impl<P: TaskProcessor> WorkerPool<P> {
    /// A pool size of 0 is treated as 1
    pub fn new(processor: P, workers: usize) -> Self {
        Self {
            processor: Arc::new(processor),
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Process every task and return the tallies once all have resolved
    pub async fn run(&self, tasks: Vec<FetchTask>) -> RunSummary {
        let counters = Arc::new(RunCounters::new());

        if tasks.is_empty() {
            debug!("No tasks to run");
            return counters.snapshot();
        }

        let worker_count = self.workers.min(tasks.len());
        info!(tasks = tasks.len(), workers = worker_count, "Starting worker pool");

        let (tx, rx) = mpsc::channel(self.workers);
        let queue: TaskQueue = Arc::new(Mutex::new(rx));

        let mut join_set = JoinSet::new();
        for worker_id in 0..worker_count {
            join_set.spawn(worker_loop(
                worker_id,
                Arc::clone(&queue),
                Arc::clone(&self.processor),
                Arc::clone(&counters),
            ));
        }

        for task in tasks {
            let identifier = task.identifier.clone();
            if tx.send(task).await.is_err() {
                warn!(%identifier, "All workers exited, remaining tasks not dispatched");
                break;
            }
            counters.task_dispatched();
            debug!(%identifier, "Task dispatched");
        }
        drop(tx);

        while let Some(res) = join_set.join_next().await {
            if let Err(e) = res {
                error!(error = %e, "Worker exited abnormally");
            }
        }

        counters.snapshot()
    }
}

async fn worker_loop<P: TaskProcessor>(
    worker_id: usize,
    queue: TaskQueue,
    processor: Arc<P>,
    counters: Arc<RunCounters>,
) {
    debug!(worker_id, "Worker started");
    let mut processed = 0usize;

    loop {
        let next = queue.lock().await.recv().await;
        let Some(task) = next else {
            break;
        };

        let identifier = task.identifier.clone();
        let processor = Arc::clone(&processor);

        match tokio::spawn(async move { processor.process(task).await }).await {
            Ok(outcome) => counters.record(&outcome),
            Err(e) => error!(worker_id, %identifier, error = %e, "Task aborted"),
        }
        processed += 1;
    }

    debug!(worker_id, processed, "Worker drained");
}
