//! Feed ingestion: one request per call, then per-record normalization.

mod source;

use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    QuakeflowError, Result,
    config::FeedConfig,
    model::{Event, FeedWindow, RawFeed},
    normalize::Normalizer,
};

pub use source::{FeedResponse, FeedSource, HttpFeedSource};

pub struct FeedIngestor {
    endpoints: FeedConfig,
    source: Arc<dyn FeedSource>,
    normalizer: Arc<Normalizer>,
}

impl FeedIngestor {
    pub fn new(
        endpoints: FeedConfig,
        source: Arc<dyn FeedSource>,
        normalizer: Arc<Normalizer>,
    ) -> Self {
        Self {
            endpoints,
            source,
            normalizer,
        }
    }

    pub fn normalizer(&self) -> &Arc<Normalizer> {
        &self.normalizer
    }

    /// Fetches and normalizes the feed for `window`.
    ///
    /// Fails with `FetchFailed` on transport errors, non-success statuses and
    /// unparseable bodies, and with `NoData` when the feature list is missing
    /// or empty. Rejected records are dropped, so the result may still be
    /// empty.
    pub async fn fetch(
        &self,
        window: FeedWindow,
    ) -> Result<Vec<Event>> {
        let url = self.endpoints.url(window);
        debug!("ingest::fetch({}, {})", window, url);

        let res = self.source.get(url).await.map_err(|err| match err {
            QuakeflowError::FetchFailed(_) => err,
            other => QuakeflowError::FetchFailed(other.to_string()),
        })?;
        if !res.is_success() {
            warn!("ingest: {} answered {}", url, res.status_text);
            return Err(QuakeflowError::FetchFailed(res.status_text));
        }

        let feed = RawFeed::from_json(&res.body).map_err(|err| QuakeflowError::FetchFailed(format!("invalid feed body: {}", err)))?;
        let features = match feed.features {
            Some(features) if !features.is_empty() => features,
            _ => return Err(QuakeflowError::NoData),
        };

        let events = self.normalizer.normalize_batch(&features);
        debug!("ingest: {} of {} features kept for {}", events.len(), features.len(), window);
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::{locale::LocaleRegistry, resolver::CountryResolver};

    struct StaticSource {
        response: Result<FeedResponse>,
        requests: Mutex<Vec<String>>,
    }

    impl StaticSource {
        fn new(response: Result<FeedResponse>) -> Arc<Self> {
            Arc::new(Self {
                response,
                requests: Mutex::new(Vec::new()),
            })
        }

        fn ok(body: serde_json::Value) -> Arc<Self> {
            Self::new(Ok(FeedResponse::new(200, "200 OK", body.to_string())))
        }
    }

    #[async_trait]
    impl FeedSource for StaticSource {
        async fn get(
            &self,
            url: &str,
        ) -> Result<FeedResponse> {
            self.requests.lock().unwrap().push(url.to_string());
            self.response.clone()
        }
    }

    fn ingestor(source: Arc<StaticSource>) -> FeedIngestor {
        let registry = Arc::new(LocaleRegistry::builtin().unwrap());
        let normalizer = Normalizer::new(Arc::new(CountryResolver::new(registry))).unwrap();
        let endpoints = FeedConfig {
            daily_url: "http://feed/day".to_string(),
            weekly_url: "http://feed/week".to_string(),
            timeout_ms: 1000,
        };
        FeedIngestor::new(endpoints, source, Arc::new(normalizer))
    }

    fn feature(
        id: &str,
        mag: serde_json::Value,
    ) -> serde_json::Value {
        json!({
            "id": id,
            "geometry": { "coordinates": [139.7, 35.7] },
            "properties": { "place": "10km SE of Tokyo, Japan", "mag": mag, "time": 1700000000000i64 }
        })
    }

    #[tokio::test]
    async fn test_fetch_selects_endpoint_by_window() {
        let source = StaticSource::ok(json!({ "features": [feature("ev1", json!(4.2))] }));
        let ingestor = ingestor(source.clone());
        ingestor.fetch(FeedWindow::Daily).await.unwrap();
        ingestor.fetch(FeedWindow::Weekly).await.unwrap();
        ingestor.fetch(FeedWindow::Weekly).await.unwrap();
        let requests = source.requests.lock().unwrap().clone();
        assert_eq!(requests, vec!["http://feed/day", "http://feed/week", "http://feed/week"]);
    }

    #[tokio::test]
    async fn test_fetch_normalizes_features() {
        let source = StaticSource::ok(json!({ "features": [feature("ev1", json!(4.2)), feature("ev2", json!(null)), feature("ev3", json!(1.0))] }));
        let events = ingestor(source).fetch(FeedWindow::Daily).await.unwrap();
        let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["ev1", "ev3"]);
    }

    #[tokio::test]
    async fn test_fetch_all_rejected_is_empty_not_no_data() {
        let source = StaticSource::ok(json!({ "features": [feature("ev1", json!(null))] }));
        let events = ingestor(source).fetch(FeedWindow::Daily).await.unwrap();
        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_no_data() {
        let source = StaticSource::ok(json!({ "features": [] }));
        assert_eq!(ingestor(source).fetch(FeedWindow::Daily).await.unwrap_err(), QuakeflowError::NoData);

        let source = StaticSource::ok(json!({ "type": "FeatureCollection" }));
        assert_eq!(ingestor(source).fetch(FeedWindow::Weekly).await.unwrap_err(), QuakeflowError::NoData);
    }

    #[tokio::test]
    async fn test_fetch_failed_status() {
        let source = StaticSource::new(Ok(FeedResponse::new(500, "500 Internal Server Error", "oops")));
        assert_eq!(
            ingestor(source).fetch(FeedWindow::Daily).await.unwrap_err(),
            QuakeflowError::FetchFailed("500 Internal Server Error".to_string())
        );
    }

    #[tokio::test]
    async fn test_fetch_failed_transport_and_body() {
        let source = StaticSource::new(Err(QuakeflowError::FetchFailed("connection refused".to_string())));
        assert_eq!(
            ingestor(source).fetch(FeedWindow::Daily).await.unwrap_err(),
            QuakeflowError::FetchFailed("connection refused".to_string())
        );

        let source = StaticSource::new(Ok(FeedResponse::new(200, "200 OK", "<html></html>")));
        assert!(matches!(ingestor(source).fetch(FeedWindow::Daily).await, Err(QuakeflowError::FetchFailed(_))));
    }
}
