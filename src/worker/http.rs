//! HTTP client for fetching PDF documents

use crate::config::FetchConfig;
use bytes::Bytes;
use reqwest::{Client, StatusCode, header};
use std::error::Error as _;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("unexpected response: HTTP {status} (content-type: {content_type})")]
    Rejected { status: StatusCode, content_type: String },

    #[error("request timed out")]
    Timeout,

    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),
}

pub type Result<T> = std::result::Result<T, DownloadError>;

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self::from(&FetchConfig::default())
    }
}

impl From<&FetchConfig> for HttpConfig {
    fn from(config: &FetchConfig) -> Self {
        Self {
            connect_timeout: config.connect_timeout.as_duration(),
            request_timeout: config.timeout.as_duration(),
            user_agent: config.user_agent.clone(),
        }
    }
}

/// Shared PDF fetcher
///
/// Cloning is cheap and every clone shares one connection pool.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(config: HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| DownloadError::ClientBuild(e.to_string()))?;

        Ok(Self { client })
    }

    /// Single GET; only a 200 `application/pdf` response yields a body
    pub async fn fetch_pdf(&self, url: &str) -> Result<Bytes> {
        debug!(url, "Requesting document");

        let response = self.client.get(url).send().await.map_err(classify)?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        if !is_pdf_response(status, &content_type) {
            return Err(DownloadError::Rejected {
                status,
                content_type,
            });
        }

        let bytes = response.bytes().await.map_err(classify)?;

        debug!(url, size = bytes.len(), "Document received");

        Ok(bytes)
    }
}

/// Status must be exactly 200 and the content type must mention `application/pdf`
pub fn is_pdf_response(status: StatusCode, content_type: &str) -> bool {
    status == StatusCode::OK
        && content_type
            .to_ascii_lowercase()
            .contains(mime::APPLICATION_PDF.essence_str())
}

fn classify(err: reqwest::Error) -> DownloadError {
    if err.is_timeout() {
        DownloadError::Timeout
    } else {
        DownloadError::RequestFailed(error_chain(&err))
    }
}

/// Flatten the source chain so logs show the root cause
fn error_chain(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
