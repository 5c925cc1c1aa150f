//! Notifications published by the [`Explorer`](crate::Explorer).
//!
//! A view layer subscribes to these to know when to re-render or show a
//! message, instead of polling the explorer state.

use serde::{Deserialize, Serialize};

use crate::model::FeedWindow;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExplorerEvent {
    /// A fetch was applied and the collection replaced.
    Loaded {
        window: FeedWindow,
        count: usize,
    },
    /// The feed answered with no features; the collection is empty.
    NoData {
        window: FeedWindow,
    },
    /// The fetch failed; the collection is empty.
    FetchFailed {
        window: FeedWindow,
        message: String,
    },
    /// A response arrived after a newer fetch had started and was dropped.
    Discarded {
        window: FeedWindow,
        seq: u64,
    },
}

impl ExplorerEvent {
    pub fn window(&self) -> FeedWindow {
        match self {
            ExplorerEvent::Loaded {
                window,
                ..
            }
            | ExplorerEvent::NoData {
                window,
            }
            | ExplorerEvent::FetchFailed {
                window,
                ..
            }
            | ExplorerEvent::Discarded {
                window,
                ..
            } => *window,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ExplorerEvent::NoData { .. } | ExplorerEvent::FetchFailed { .. })
    }
}
