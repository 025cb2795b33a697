//! Fetch-persist worker pool
//!
//! A fixed number of workers pull [`FetchTask`]s from one bounded queue,
//! download each document, store valid PDFs, and record one
//! [`FetchOutcome`] per task into shared run counters.

pub mod http;
pub mod pool;
pub mod runner;
pub mod task;

pub use pool::WorkerPool;
pub use runner::FetchWorker;
pub use task::{FetchTask, TaskTemplate, sanitize_file_name};

use async_trait::async_trait;
use reqwest::StatusCode;

/// Result of processing one task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Valid PDF written to `location`
    Success { location: String, size: usize },
    /// Anything other than 200 + `application/pdf`
    InvalidResponse { status: StatusCode },
    Timeout,
    TransportError { cause: String },
    /// Valid PDF received but could not be stored
    PersistFailed { cause: String },
}

impl FetchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Success { .. })
    }
}

/// Processes one task to completion; failures are reported, never raised
#[async_trait]
pub trait TaskProcessor: Send + Sync + 'static {
    async fn process(&self, task: FetchTask) -> FetchOutcome;
}
