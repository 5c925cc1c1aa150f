use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};

use crate::{QuakeflowError, Result};

/// Status line and body of one feed response.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedResponse {
    pub status: u16,
    /// e.g. "500 Internal Server Error"
    pub status_text: String,
    pub body: String,
}

impl FeedResponse {
    pub fn new(
        status: u16,
        status_text: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport used by the ingestor. One call is one request; no retries.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Issues a GET for `url`.
    ///
    /// Transport failures are reported as `FetchFailed`. Non-success
    /// statuses are returned as responses and judged by the caller.
    async fn get(
        &self,
        url: &str,
    ) -> Result<FeedResponse>;
}

/// reqwest-backed source.
#[derive(Debug, Clone)]
pub struct HttpFeedSource {
    client: reqwest::Client,
}

impl HttpFeedSource {
    pub fn new(timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/geo+json, application/json"));

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|err| QuakeflowError::Config(err.to_string()))?;

        Ok(Self {
            client,
        })
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn get(
        &self,
        url: &str,
    ) -> Result<FeedResponse> {
        let res = self.client.get(url).send().await.map_err(|err| QuakeflowError::FetchFailed(format!("Http error: {}", err)))?;
        let status = res.status();
        let body = res.text().await.map_err(|err| QuakeflowError::FetchFailed(err.to_string()))?;

        Ok(FeedResponse {
            status: status.as_u16(),
            status_text: status.to_string(),
            body,
        })
    }
}
