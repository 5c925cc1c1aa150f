use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Place used when the upstream record has none.
pub const UNKNOWN_PLACE: &str = "Unknown";

/// Normalized two-letter country identifier, always upper case.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct CountryCode(String);

impl CountryCode {
    /// Builds a code from two ASCII letters, upper-casing them.
    pub fn new(code: &str) -> Option<Self> {
        let code = code.trim();
        if code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()) {
            Some(Self(code.to_ascii_uppercase()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CountryCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CountryCode {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Canonical seismic record. Built once by the normalizer and never mutated.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Event {
    /// Identity key, unique within one ingested collection.
    pub id: String,
    /// Free-text locality, e.g. "10km SE of Example, Country".
    pub place: String,
    pub magnitude: f64,
    /// Event time in milliseconds since the epoch.
    pub timestamp_millis: i64,
    /// WGS84 degrees, passed through without clamping.
    pub latitude: f64,
    /// WGS84 degrees, passed through without clamping.
    pub longitude: f64,
    /// Hypocenter depth in kilometres, when upstream provides it.
    pub depth_km: Option<f64>,
    /// Upstream detail page.
    pub url: Option<String>,
    /// Absent when the locality tail matched no known country.
    pub country_code: Option<CountryCode>,
}

impl Event {
    /// Upstream event time, `None` if the millis overflow chrono's range.
    pub fn time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp_millis)
    }

    /// Trailing comma-delimited segment of `place`.
    pub fn locality_tail(&self) -> Option<&str> {
        locality_tail(&self.place)
    }
}

/// Returns the last trimmed comma-delimited segment of a place description.
///
/// A place with a single segment has no tail; neither does one whose last
/// segment is blank.
pub(crate) fn locality_tail(place: &str) -> Option<&str> {
    let mut segments = place.split(',').map(str::trim);
    let first = segments.next();
    let last = segments.last();
    match (first, last) {
        (Some(_), Some(tail)) if !tail.is_empty() => Some(tail),
        _ => None,
    }
}
