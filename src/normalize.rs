//! Record normalization: one raw GeoJSON feature to one [`Event`].

use std::{collections::HashSet, sync::Arc};

use jsonschema::Validator;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::{
    QuakeflowError, Result,
    locale::Locale,
    model::{Event, RawFeature, UNKNOWN_PLACE},
    resolver::CountryResolver,
};

pub struct Normalizer {
    resolver: Arc<CountryResolver>,
    validator: Validator,
}

impl Normalizer {
    pub fn new(resolver: Arc<CountryResolver>) -> Result<Self> {
        let validator = jsonschema::validator_for(&Self::schema()).map_err(|err| QuakeflowError::Config(err.to_string()))?;
        Ok(Self {
            resolver,
            validator,
        })
    }

    /// Shape a feature must have to be accepted.
    pub fn schema() -> JsonValue {
        serde_json::json!({
            "type": "object",
            "required": ["id", "geometry", "properties"],
            "properties": {
                "id": { "type": "string" },
                "geometry": {
                    "type": "object",
                    "required": ["coordinates"],
                    "properties": {
                        "coordinates": {
                            "type": "array",
                            "minItems": 2,
                            "items": { "type": "number" },
                            "description": "[longitude, latitude, depth?]"
                        }
                    }
                },
                "properties": {
                    "type": "object",
                    "required": ["mag", "time"],
                    "properties": {
                        "place": { "type": ["string", "null"] },
                        "mag": { "type": "number" },
                        "time": { "type": "integer" },
                        "url": { "type": ["string", "null"] }
                    }
                }
            }
        })
    }

    pub fn resolver(&self) -> &Arc<CountryResolver> {
        &self.resolver
    }

    /// Converts one raw feature, or fails with `RecordRejected`.
    pub fn normalize(
        &self,
        raw: &JsonValue,
    ) -> Result<Event> {
        self.validator.validate(raw).map_err(|err| QuakeflowError::RecordRejected(err.to_string()))?;
        let feature = RawFeature::deserialize(raw).map_err(|err| QuakeflowError::RecordRejected(err.to_string()))?;

        let coordinates = &feature.geometry.coordinates;
        let (longitude, latitude) = match coordinates.as_slice() {
            [lon, lat, ..] => (*lon, *lat),
            _ => return Err(QuakeflowError::RecordRejected(format!("feature {} has fewer than two coordinates", feature.id))),
        };

        let place = feature.properties.place.unwrap_or_else(|| UNKNOWN_PLACE.to_string());
        let country_code = crate::model::locality_tail(&place).and_then(|tail| self.resolver.resolve_code(tail));

        Ok(Event {
            id: feature.id,
            place,
            magnitude: feature.properties.mag,
            timestamp_millis: feature.properties.time,
            latitude,
            longitude,
            depth_km: coordinates.get(2).copied(),
            url: feature.properties.url,
            country_code,
        })
    }

    /// Normalizes a batch, dropping rejected records and repeated ids.
    pub fn normalize_batch(
        &self,
        features: &[JsonValue],
    ) -> Vec<Event> {
        let mut seen = HashSet::new();
        let mut events = Vec::with_capacity(features.len());
        for raw in features {
            match self.normalize(raw) {
                Ok(event) => {
                    if seen.insert(event.id.clone()) {
                        events.push(event);
                    } else {
                        debug!("normalize: duplicate id {} dropped", event.id);
                    }
                }
                Err(err) => debug!("normalize: {}", err),
            }
        }
        events
    }

    /// Country label for display.
    ///
    /// Falls back to the raw code when the locale has no table, and to the
    /// locality tail of `place` when the event has no code.
    pub fn format_country(
        &self,
        event: &Event,
        locale: &Locale,
    ) -> String {
        match &event.country_code {
            Some(code) => self.resolver.display_name(code, locale).unwrap_or_else(|err| {
                debug!("normalize: {}", err);
                code.to_string()
            }),
            None => event.locality_tail().unwrap_or(UNKNOWN_PLACE).to_string(),
        }
    }
}
