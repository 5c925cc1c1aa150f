use serde::{Deserialize, Serialize};

/// Upstream time range selector.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, strum::AsRefStr, strum::EnumString, strum::Display, strum::EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FeedWindow {
    /// Last 24 hours.
    #[default]
    Daily,
    /// Last 7 days.
    Weekly,
}

impl FeedWindow {
    /// Label key used to look up the window's display name.
    pub fn label_key(&self) -> &'static str {
        match self {
            FeedWindow::Daily => "window.daily",
            FeedWindow::Weekly => "window.weekly",
        }
    }
}
