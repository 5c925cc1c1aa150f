//! Raw shapes of the upstream GeoJSON feed.
//!
//! Features are kept as plain JSON at the top level so that one malformed
//! record can be rejected without failing the whole document.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawFeed {
    #[serde(default)]
    pub metadata: Option<RawMetadata>,
    #[serde(default)]
    pub features: Option<Vec<JsonValue>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawMetadata {
    #[serde(default)]
    pub generated: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub count: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawFeature {
    pub id: String,
    pub geometry: RawGeometry,
    pub properties: RawProperties,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawGeometry {
    /// `[longitude, latitude, depth?]`
    pub coordinates: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawProperties {
    #[serde(default)]
    pub place: Option<String>,
    pub mag: f64,
    pub time: i64,
    #[serde(default)]
    pub url: Option<String>,
}

impl RawFeed {
    /// Parses a response body.
    pub fn from_json(s: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str::<RawFeed>(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_without_features() {
        let feed = RawFeed::from_json(r#"{"type":"FeatureCollection"}"#).unwrap();
        assert!(feed.features.is_none());
        assert!(feed.metadata.is_none());
    }

    #[test]
    fn test_feed_metadata() {
        let feed = RawFeed::from_json(r#"{"metadata":{"generated":1700000000000,"title":"USGS All Earthquakes, Past Day","count":2},"features":[{},{}]}"#).unwrap();
        let metadata = feed.metadata.unwrap();
        assert_eq!(metadata.count, Some(2));
        assert_eq!(metadata.generated, Some(1_700_000_000_000));
        assert_eq!(feed.features.unwrap().len(), 2);
    }

    #[test]
    fn test_feed_rejects_non_json() {
        assert!(RawFeed::from_json("<html>").is_err());
    }
}
