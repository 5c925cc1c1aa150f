//! # Quakeflow
//!
//! Quakeflow ingests the USGS earthquake feed, normalizes every record into a
//! canonical [`Event`] and answers the queries an interactive map/table view
//! needs.
//!
//! ## Pipeline
//!
//! ```text
//! FeedSource -> FeedIngestor -> Normalizer (+ CountryResolver) -> Vec<Event> -> query -> rows
//! ```
//!
//! - **Ingestion**: one request per fetch, no retries; `FetchFailed` and
//!   `NoData` are the only errors meant for the user
//! - **Normalization**: malformed records are dropped, place strings are
//!   resolved to country codes through a locale-keyed registry
//! - **Query**: magnitude band, case-insensitive place search and a growing
//!   "load more" window, all order-preserving
//! - **Explorer**: view state with stale-response protection
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use quakeflow::{ExplorerBuilder, FeedWindow, Locale, RangeFilter};
//!
//! let explorer = ExplorerBuilder::new().build()?;
//! explorer.set_window(FeedWindow::Weekly).await?;
//! explorer.set_range(RangeFilter::Strong);
//! explorer.set_locale(Locale::new("es"));
//! for row in explorer.rows() {
//!     println!("{} {} {}", row.magnitude, row.place, row.country);
//! }
//! ```

mod builder;
mod common;
mod config;
mod error;
mod events;
mod explorer;
mod ingest;
mod locale;
mod model;
mod normalize;
mod query;
mod resolver;
mod utils;

use std::sync::{Arc, RwLock};

pub use builder::ExplorerBuilder;
pub use config::{Config, DAILY_FEED_URL, FeedConfig, ViewConfig, WEEKLY_FEED_URL};
pub use error::QuakeflowError;
pub use events::ExplorerEvent;
pub use explorer::{EventRow, Explorer, FeedStatus, FetchTicket};
pub use ingest::{FeedIngestor, FeedResponse, FeedSource, HttpFeedSource};
pub use locale::{Locale, LocaleRegistry, LocaleTable};
pub use model::*;
pub use normalize::Normalizer;
pub use query::{FeedQuery, MagnitudeBand, MarkerColor, QueryPage, RangeFilter, query, query_page};
pub use resolver::CountryResolver;
pub use utils::time::format_millis;

/// Result type alias for Quakeflow operations.
pub type Result<T> = std::result::Result<T, QuakeflowError>;

/// Thread-safe shared lock wrapper using Arc<RwLock<T>>.
pub(crate) type ShareLock<T> = Arc<RwLock<T>>;
