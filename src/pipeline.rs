//! One download run: identifiers in, PDFs and a summary out

use crate::config::Config;
use crate::observability::RunSummary;
use crate::source::IdentifierSource;
use crate::storage::{StorageClient, StorageError};
use crate::worker::http::{DownloadError, HttpClient, HttpConfig};
use crate::worker::{FetchWorker, TaskTemplate, WorkerPool};
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Cannot create output directory {path}: {source}")]
    OutputDir { path: PathBuf, source: io::Error },

    #[error(transparent)]
    HttpClient(#[from] DownloadError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Run the whole pipeline for one configuration
///
/// An unreadable identifier file is logged and yields an empty summary.
pub async fn run(config: &Config) -> Result<RunSummary, PipelineError> {
    let output_dir = &config.output.dir;
    tokio::fs::create_dir_all(output_dir)
        .await
        .map_err(|source| PipelineError::OutputDir {
            path: output_dir.clone(),
            source,
        })?;

    let source = IdentifierSource::from_config(&config.source);
    let identifiers = match source.read() {
        Ok(identifiers) => identifiers,
        Err(e) => {
            error!(error = %e, "Failed to read identifiers, nothing to download");
            return Ok(RunSummary::default());
        }
    };

    info!(
        path = %source.path().display(),
        count = identifiers.len(),
        "Loaded identifiers"
    );

    let tasks = TaskTemplate::from_config(&config.fetch, &config.output).plan(identifiers);

    let http = HttpClient::new(HttpConfig::from(&config.fetch))?;
    let storage = StorageClient::local(output_dir)?;
    let pool = WorkerPool::new(FetchWorker::new(http, storage), config.pool.workers);

    let summary = pool.run(tasks).await;

    info!(
        failed = summary.failed(),
        breakdown = %summary,
        "Total files: {}, downloaded: {}",
        summary.total,
        summary.succeeded
    );

    Ok(summary)
}
