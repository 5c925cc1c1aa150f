mod event;
mod feed;
mod window;

pub use event::{CountryCode, Event, UNKNOWN_PLACE};
pub use feed::{RawFeature, RawFeed, RawGeometry, RawMetadata, RawProperties};
pub use window::FeedWindow;

pub(crate) use event::locality_tail;
