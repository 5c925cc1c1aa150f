use std::{fs, path::Path, time::Duration};

use serde::Deserialize;

use crate::{FeedWindow, Locale, QuakeflowError, Result};

pub const DAILY_FEED_URL: &str = "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_day.geojson";
pub const WEEKLY_FEED_URL: &str = "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_week.geojson";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// feed endpoints
    pub feed: FeedConfig,
    /// view defaults
    pub view: ViewConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// endpoint for the past day
    pub daily_url: String,
    /// endpoint for the past week
    pub weekly_url: String,
    /// http request timeout in milliseconds, defaults to 10000
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// rows added per "load more", defaults to 20
    pub page_size: usize,
    pub default_window: FeedWindow,
    pub default_locale: Locale,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            daily_url: DAILY_FEED_URL.to_string(),
            weekly_url: WEEKLY_FEED_URL.to_string(),
            timeout_ms: 10_000,
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            page_size: 20,
            default_window: FeedWindow::Daily,
            default_locale: Locale::default(),
        }
    }
}

impl FeedConfig {
    /// Endpoint for `window`.
    pub fn url(
        &self,
        window: FeedWindow,
    ) -> &str {
        match window {
            FeedWindow::Daily => &self.daily_url,
            FeedWindow::Weekly => &self.weekly_url,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Config {
    pub fn create<T: AsRef<Path>>(path: T) -> Result<Self> {
        let data = fs::read_to_string(path.as_ref()).map_err(|err| QuakeflowError::Config(format!("failed to load config file {:?}: {}", path.as_ref(), err)))?;

        Self::load_from_str(data.as_str())
    }

    pub fn load_from_str(toml_str: &str) -> Result<Self> {
        let config = toml::from_str::<Config>(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.view.page_size == 0 {
            return Err(QuakeflowError::Config("view.page_size must be positive".to_string()));
        }
        if self.feed.daily_url.is_empty() || self.feed.weekly_url.is_empty() {
            return Err(QuakeflowError::Config("feed urls must not be empty".to_string()));
        }
        Ok(())
    }
}
