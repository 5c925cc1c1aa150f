//! Query engine: magnitude filter, place search and the "load more" window.
//!
//! Everything here is a pure function of its inputs. Results keep the
//! relative order of the input collection.

use serde::{Deserialize, Serialize};

use crate::model::Event;

/// Magnitude bucket. Bounds are inclusive below, exclusive above.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, strum::AsRefStr, strum::EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MagnitudeBand {
    /// `[0, 3)`
    Minor,
    /// `[3, 5)`
    Light,
    /// `[5, 7)`
    Strong,
    /// `[7, ∞)`
    Major,
}

/// Marker colour for the map widget.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, strum::AsRefStr, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MarkerColor {
    Green,
    Gold,
    Orange,
    Red,
}

impl MagnitudeBand {
    /// Band for colouring. Anything below 3, negatives included, is `Minor`.
    pub fn from_magnitude(magnitude: f64) -> Self {
        if magnitude < 3.0 {
            MagnitudeBand::Minor
        } else if magnitude < 5.0 {
            MagnitudeBand::Light
        } else if magnitude < 7.0 {
            MagnitudeBand::Strong
        } else {
            MagnitudeBand::Major
        }
    }

    /// `(lower, upper)`; `upper` is `None` for the open-ended band.
    pub fn bounds(&self) -> (f64, Option<f64>) {
        match self {
            MagnitudeBand::Minor => (0.0, Some(3.0)),
            MagnitudeBand::Light => (3.0, Some(5.0)),
            MagnitudeBand::Strong => (5.0, Some(7.0)),
            MagnitudeBand::Major => (7.0, None),
        }
    }

    pub fn contains(
        &self,
        magnitude: f64,
    ) -> bool {
        let (lower, upper) = self.bounds();
        magnitude >= lower && upper.is_none_or(|upper| magnitude < upper)
    }

    pub fn color(&self) -> MarkerColor {
        match self {
            MagnitudeBand::Minor => MarkerColor::Green,
            MagnitudeBand::Light => MarkerColor::Gold,
            MagnitudeBand::Strong => MarkerColor::Orange,
            MagnitudeBand::Major => MarkerColor::Red,
        }
    }

    pub fn label_key(&self) -> &'static str {
        match self {
            MagnitudeBand::Minor => "filter.minor",
            MagnitudeBand::Light => "filter.light",
            MagnitudeBand::Strong => "filter.strong",
            MagnitudeBand::Major => "filter.major",
        }
    }
}

/// Magnitude range selector.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, strum::AsRefStr, strum::EnumString, strum::Display, strum::EnumIter)]
pub enum RangeFilter {
    #[default]
    #[serde(rename = "all")]
    #[strum(serialize = "all")]
    All,
    #[serde(rename = "0-3")]
    #[strum(serialize = "0-3")]
    Minor,
    #[serde(rename = "3-5")]
    #[strum(serialize = "3-5")]
    Light,
    #[serde(rename = "5-7")]
    #[strum(serialize = "5-7")]
    Strong,
    #[serde(rename = "7+")]
    #[strum(serialize = "7+")]
    Major,
}

impl RangeFilter {
    /// `None` for `All`.
    pub fn band(&self) -> Option<MagnitudeBand> {
        match self {
            RangeFilter::All => None,
            RangeFilter::Minor => Some(MagnitudeBand::Minor),
            RangeFilter::Light => Some(MagnitudeBand::Light),
            RangeFilter::Strong => Some(MagnitudeBand::Strong),
            RangeFilter::Major => Some(MagnitudeBand::Major),
        }
    }

    pub fn matches(
        &self,
        magnitude: f64,
    ) -> bool {
        self.band().is_none_or(|band| band.contains(magnitude))
    }

    pub fn label_key(&self) -> &'static str {
        self.band().map_or("filter.all", |band| band.label_key())
    }
}

/// Query parameters, rebuilt from view state on every render.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct FeedQuery {
    pub range: RangeFilter,
    pub search: String,
    /// Size of the visible prefix. The caller keeps it a multiple of the page size.
    pub visible_count: usize,
}

/// Visible rows plus the number of events that passed the filters.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPage<'a> {
    pub rows: Vec<&'a Event>,
    pub matched: usize,
    pub visible_count: usize,
}

impl QueryPage<'_> {
    /// Whether "load more" would reveal further rows.
    pub fn has_more(&self) -> bool {
        self.matched > self.rows.len()
    }
}

impl FeedQuery {
    pub fn new(
        range: RangeFilter,
        search: impl Into<String>,
        visible_count: usize,
    ) -> Self {
        Self {
            range,
            search: search.into(),
            visible_count,
        }
    }

    /// Range filter, then search filter.
    pub fn matches(
        &self,
        event: &Event,
    ) -> bool {
        self.range.matches(event.magnitude) && search_matches(&event.place, &self.search)
    }
}

/// Case-insensitive substring match. Blank needles match everything.
fn search_matches(
    place: &str,
    needle: &str,
) -> bool {
    let needle = needle.trim();
    needle.is_empty() || place.to_lowercase().contains(&needle.to_lowercase())
}

/// First `visible_count` events passing the filters, in input order.
pub fn query<'a>(
    events: &'a [Event],
    params: &FeedQuery,
) -> Vec<&'a Event> {
    events.iter().filter(|event| params.matches(event)).take(params.visible_count).collect()
}

/// Like [`query`], also counting every match.
pub fn query_page<'a>(
    events: &'a [Event],
    params: &FeedQuery,
) -> QueryPage<'a> {
    let matched: Vec<&Event> = events.iter().filter(|event| params.matches(event)).collect();
    let count = matched.len();
    QueryPage {
        rows: matched.into_iter().take(params.visible_count).collect(),
        matched: count,
        visible_count: params.visible_count,
    }
}
