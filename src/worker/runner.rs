//! Task runner - fetches one document and persists it

use super::http::{DownloadError, HttpClient};
use super::{FetchOutcome, FetchTask, TaskProcessor};
use crate::storage::StorageClient;
use async_trait::async_trait;
use tracing::{error, info, warn};

/// Production [`TaskProcessor`]: HTTP fetch into document storage
#[derive(Clone)]
pub struct FetchWorker {
    http: HttpClient,
    storage: StorageClient,
}

impl FetchWorker {
    pub fn new(http: HttpClient, storage: StorageClient) -> Self {
        Self { http, storage }
    }
}

#[async_trait]
impl TaskProcessor for FetchWorker {
    async fn process(&self, task: FetchTask) -> FetchOutcome {
        let FetchTask {
            identifier,
            url,
            file_name,
        } = task;

        let body = match self.http.fetch_pdf(&url).await {
            Ok(body) => body,
            Err(DownloadError::Rejected {
                status,
                content_type,
            }) => {
                warn!(%identifier, %url, status = status.as_u16(), content_type = %content_type, "Document not downloadable");
                return FetchOutcome::InvalidResponse { status };
            }
            Err(DownloadError::Timeout) => {
                error!(%identifier, %url, "Request timed out");
                return FetchOutcome::Timeout;
            }
            Err(e) => {
                error!(%identifier, %url, error = %e, "Download failed");
                return FetchOutcome::TransportError {
                    cause: e.to_string(),
                };
            }
        };

        match self.storage.put(&file_name, body).await {
            Ok(stored) => {
                info!(%identifier, key = %stored.key, path = %stored.location, size = stored.size, "PDF downloaded");
                FetchOutcome::Success {
                    location: stored.location,
                    size: stored.size,
                }
            }
            Err(e) => {
                error!(%identifier, file_name = %file_name, error = %e, "Failed to store PDF");
                FetchOutcome::PersistFailed {
                    cause: e.to_string(),
                }
            }
        }
    }
}
