//! Explorer - the stateful entry point for Quakeflow.
//!
//! The explorer owns everything a view needs between renders:
//! - the selected feed window and locale
//! - the magnitude filter, search text and visible row count
//! - the current event collection, replaced wholesale on every applied fetch
//! - the selected event
//!
//! Fetches are numbered. A response is applied only if no newer fetch was
//! started after it, so a slow response can never overwrite a newer one.

use std::sync::{
    Arc, RwLock,
    atomic::{AtomicU64, Ordering},
};

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::{
    QuakeflowError, Result, ShareLock,
    common::BroadcastQueue,
    events::ExplorerEvent,
    ingest::FeedIngestor,
    locale::{Locale, LocaleRegistry},
    model::{Event, FeedWindow},
    normalize::Normalizer,
    query::{FeedQuery, MagnitudeBand, MarkerColor, RangeFilter, query_page},
    utils,
};

/// Size of the notification queue.
const EVENT_QUEUE_SIZE: usize = 64;

/// Where the explorer stands with respect to its last fetch.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum FeedStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    NoData,
    Failed(String),
}

/// Handle for one started fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    window: FeedWindow,
}

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn window(&self) -> FeedWindow {
        self.window
    }
}

/// One table row, with locale-dependent strings already resolved.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EventRow {
    pub id: String,
    pub place: String,
    pub magnitude: f64,
    pub color: MarkerColor,
    pub time: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub url: Option<String>,
}

#[derive(Debug, Clone)]
struct ExplorerState {
    window: FeedWindow,
    locale: Locale,
    range: RangeFilter,
    search: String,
    visible_count: usize,
    selected: Option<String>,
    status: FeedStatus,
    events: Arc<Vec<Event>>,
    /// Millis at which the current collection was applied.
    loaded_at: Option<i64>,
}

pub struct Explorer {
    ingestor: Arc<FeedIngestor>,
    page_size: usize,
    default_locale: Locale,
    /// Sequence number of the latest started fetch.
    seq: AtomicU64,
    state: ShareLock<ExplorerState>,
    queue: Arc<BroadcastQueue<ExplorerEvent>>,
}

impl Explorer {
    pub(crate) fn new(
        ingestor: Arc<FeedIngestor>,
        page_size: usize,
        window: FeedWindow,
        locale: Locale,
    ) -> Self {
        let state = ExplorerState {
            window,
            locale: locale.clone(),
            range: RangeFilter::All,
            search: String::new(),
            visible_count: page_size,
            selected: None,
            status: FeedStatus::Idle,
            events: Arc::new(Vec::new()),
            loaded_at: None,
        };

        Self {
            ingestor,
            page_size,
            default_locale: locale,
            seq: AtomicU64::new(0),
            state: Arc::new(RwLock::new(state)),
            queue: BroadcastQueue::new(EVENT_QUEUE_SIZE),
        }
    }

    fn normalizer(&self) -> &Arc<Normalizer> {
        self.ingestor.normalizer()
    }

    fn registry(&self) -> &Arc<LocaleRegistry> {
        self.normalizer().resolver().registry()
    }

    fn publish(
        &self,
        event: ExplorerEvent,
    ) {
        // No subscriber is not an error for the explorer.
        let _ = self.queue.send(event);
    }

    /// Receives every notification published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<ExplorerEvent> {
        self.queue.subscribe()
    }

    /// Starts a fetch for `window`, superseding any fetch still in flight.
    pub fn begin_fetch(
        &self,
        window: FeedWindow,
    ) -> FetchTicket {
        let mut state = self.state.write().unwrap();
        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        state.window = window;
        state.status = FeedStatus::Loading;
        debug!("explorer::begin_fetch({}, seq={})", window, seq);
        FetchTicket {
            seq,
            window,
        }
    }

    /// Applies the outcome of the fetch behind `ticket`.
    ///
    /// Returns `false` and leaves the state untouched when a newer fetch has
    /// been started since. On `FetchFailed` or `NoData` the collection is
    /// cleared.
    pub fn complete(
        &self,
        ticket: FetchTicket,
        result: Result<Vec<Event>>,
    ) -> bool {
        let notification = {
            let mut state = self.state.write().unwrap();
            if ticket.seq != self.seq.load(Ordering::SeqCst) {
                debug!("explorer: stale response seq={} dropped", ticket.seq);
                drop(state);
                self.publish(ExplorerEvent::Discarded {
                    window: ticket.window,
                    seq: ticket.seq,
                });
                return false;
            }

            state.visible_count = self.page_size;
            state.loaded_at = Some(utils::time::time_millis());
            match result {
                Ok(events) => {
                    info!("explorer: {} events loaded for {}", events.len(), ticket.window);
                    let keep_selection = state.selected.as_ref().is_some_and(|id| events.iter().any(|event| &event.id == id));
                    if !keep_selection {
                        state.selected = None;
                    }
                    let count = events.len();
                    state.events = Arc::new(events);
                    state.status = FeedStatus::Ready;
                    ExplorerEvent::Loaded {
                        window: ticket.window,
                        count,
                    }
                }
                Err(err) => {
                    warn!("explorer: fetch for {} failed: {}", ticket.window, err);
                    state.events = Arc::new(Vec::new());
                    state.selected = None;
                    match err {
                        QuakeflowError::NoData => {
                            state.status = FeedStatus::NoData;
                            ExplorerEvent::NoData {
                                window: ticket.window,
                            }
                        }
                        QuakeflowError::FetchFailed(message) => {
                            state.status = FeedStatus::Failed(message.clone());
                            ExplorerEvent::FetchFailed {
                                window: ticket.window,
                                message,
                            }
                        }
                        other => {
                            let message = other.to_string();
                            state.status = FeedStatus::Failed(message.clone());
                            ExplorerEvent::FetchFailed {
                                window: ticket.window,
                                message,
                            }
                        }
                    }
                }
            }
        };

        self.publish(notification);
        true
    }

    /// Fetches `window` and applies the result if it is still the latest.
    ///
    /// Returns `Ok(false)` when a newer fetch superseded this one, whatever
    /// its outcome. `FetchFailed` and `NoData` are returned as errors only
    /// when they were applied to the state.
    pub async fn load(
        &self,
        window: FeedWindow,
    ) -> Result<bool> {
        let ticket = self.begin_fetch(window);
        let result = self.ingestor.fetch(window).await;
        let err = result.as_ref().err().cloned();
        if !self.complete(ticket, result) {
            return Ok(false);
        }
        match err {
            Some(err) => Err(err),
            None => Ok(true),
        }
    }

    /// Re-fetches the current window.
    pub async fn refresh(&self) -> Result<bool> {
        let window = self.window();
        self.load(window).await
    }

    /// Switches the feed window and fetches it.
    pub async fn set_window(
        &self,
        window: FeedWindow,
    ) -> Result<bool> {
        self.load(window).await
    }

    /// Switches the display locale. The collection is not re-fetched; rows
    /// pick up the new locale on the next [`rows`](Self::rows) call.
    pub fn set_locale(
        &self,
        locale: Locale,
    ) {
        debug!("explorer::set_locale({})", locale);
        self.state.write().unwrap().locale = locale;
    }

    /// Changes the magnitude filter and shrinks the view back to one page.
    pub fn set_range(
        &self,
        range: RangeFilter,
    ) {
        let mut state = self.state.write().unwrap();
        state.range = range;
        state.visible_count = self.page_size;
    }

    /// Changes the search text and shrinks the view back to one page.
    pub fn set_search(
        &self,
        search: impl Into<String>,
    ) {
        let mut state = self.state.write().unwrap();
        state.search = search.into();
        state.visible_count = self.page_size;
    }

    /// Grows the visible window by one page and returns the new count.
    pub fn load_more(&self) -> usize {
        let mut state = self.state.write().unwrap();
        state.visible_count = state.visible_count.saturating_add(self.page_size);
        state.visible_count
    }

    /// Marks `id` as selected and returns it as the fly-to target.
    pub fn select(
        &self,
        id: &str,
    ) -> Option<Event> {
        let mut state = self.state.write().unwrap();
        let event = state.events.iter().find(|event| event.id == id).cloned();
        state.selected = event.as_ref().map(|event| event.id.clone());
        event
    }

    pub fn clear_selection(&self) {
        self.state.write().unwrap().selected = None;
    }

    pub fn selected(&self) -> Option<Event> {
        let state = self.state.read().unwrap();
        let id = state.selected.as_ref()?;
        state.events.iter().find(|event| &event.id == id).cloned()
    }

    /// Query built from the current view state.
    pub fn query(&self) -> FeedQuery {
        let state = self.state.read().unwrap();
        FeedQuery::new(state.range, state.search.clone(), state.visible_count)
    }

    /// Collection, query and locale read under a single guard.
    fn snapshot(&self) -> (Arc<Vec<Event>>, FeedQuery, Locale) {
        let state = self.state.read().unwrap();
        let params = FeedQuery::new(state.range, state.search.clone(), state.visible_count);
        (state.events.clone(), params, state.locale.clone())
    }

    /// Events currently visible, in feed order.
    pub fn visible(&self) -> Vec<Event> {
        let (events, params, _) = self.snapshot();
        query_page(&events, &params).rows.into_iter().cloned().collect()
    }

    /// Number of events passing the filters, visible or not.
    pub fn matched(&self) -> usize {
        let (events, params, _) = self.snapshot();
        query_page(&events, &params).matched
    }

    /// Whether [`load_more`](Self::load_more) would reveal more rows.
    pub fn has_more(&self) -> bool {
        let (events, params, _) = self.snapshot();
        query_page(&events, &params).has_more()
    }

    /// Visible events rendered for the current locale.
    pub fn rows(&self) -> Vec<EventRow> {
        let (events, params, locale) = self.snapshot();
        let normalizer = self.normalizer();
        query_page(&events, &params)
            .rows
            .into_iter()
            .map(|event| EventRow {
                id: event.id.clone(),
                place: event.place.clone(),
                magnitude: event.magnitude,
                color: MagnitudeBand::from_magnitude(event.magnitude).color(),
                time: utils::time::format_millis(event.timestamp_millis),
                country: normalizer.format_country(event, &locale),
                latitude: event.latitude,
                longitude: event.longitude,
                url: event.url.clone(),
            })
            .collect()
    }

    /// UI label for the current locale, then the default locale, then the key itself.
    pub fn label(
        &self,
        key: &str,
    ) -> String {
        let locale = self.locale();
        let registry = self.registry();
        registry
            .label(&locale, key)
            .or_else(|_| registry.label(&self.default_locale, key))
            .map(str::to_string)
            .unwrap_or_else(|err| {
                debug!("explorer: {}", err);
                key.to_string()
            })
    }

    /// Localized message for the loading, no-data and failed states.
    pub fn status_message(&self) -> Option<String> {
        match self.status() {
            FeedStatus::Idle | FeedStatus::Ready => None,
            FeedStatus::Loading => Some(self.label("message.loading")),
            FeedStatus::NoData => Some(self.label("message.no_data")),
            FeedStatus::Failed(message) => Some(format!("{}: {}", self.label("message.fetch_failed"), message)),
        }
    }

    pub fn events(&self) -> Arc<Vec<Event>> {
        self.state.read().unwrap().events.clone()
    }

    pub fn status(&self) -> FeedStatus {
        self.state.read().unwrap().status.clone()
    }

    pub fn window(&self) -> FeedWindow {
        self.state.read().unwrap().window
    }

    pub fn locale(&self) -> Locale {
        self.state.read().unwrap().locale.clone()
    }

    pub fn loaded_at(&self) -> Option<i64> {
        self.state.read().unwrap().loaded_at
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Locales with registered tables.
    pub fn locales(&self) -> Vec<Locale> {
        self.registry().locales()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::{
        ExplorerBuilder,
        config::Config,
        ingest::{FeedResponse, FeedSource},
    };

    struct FixedSource(serde_json::Value);

    #[async_trait]
    impl FeedSource for FixedSource {
        async fn get(
            &self,
            _url: &str,
        ) -> Result<FeedResponse> {
            Ok(FeedResponse::new(200, "200 OK", self.0.to_string()))
        }
    }

    fn feature(
        id: &str,
        place: &str,
        mag: f64,
    ) -> serde_json::Value {
        json!({
            "id": id,
            "geometry": { "coordinates": [139.7, 35.7, 10.0] },
            "properties": { "place": place, "mag": mag, "time": 1700000000000i64 }
        })
    }

    fn event(
        id: &str,
        mag: f64,
    ) -> Event {
        Event {
            id: id.to_string(),
            place: format!("{}km N of Osaka, Japan", id.len()),
            magnitude: mag,
            timestamp_millis: 1_700_000_000_000,
            latitude: 34.7,
            longitude: 135.5,
            depth_km: None,
            url: None,
            country_code: None,
        }
    }

    fn explorer(page_size: usize) -> Explorer {
        let features: Vec<serde_json::Value> = (0..5).map(|i| feature(&format!("ev{}", i), "10km SE of Tokyo, Japan", 1.0 + i as f64)).collect();
        let mut config = Config::default();
        config.view.page_size = page_size;
        ExplorerBuilder::new().config(config).source(Arc::new(FixedSource(json!({ "features": features })))).build().unwrap()
    }

    #[test]
    fn test_initial_state() {
        let explorer = explorer(20);
        assert_eq!(explorer.status(), FeedStatus::Idle);
        assert_eq!(explorer.window(), FeedWindow::Daily);
        assert_eq!(explorer.locale(), Locale::new("en"));
        assert!(explorer.visible().is_empty());
        assert_eq!(explorer.query(), FeedQuery::new(RangeFilter::All, "", 20));
        assert!(explorer.status_message().is_none());
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let explorer = explorer(20);
        let first = explorer.begin_fetch(FeedWindow::Daily);
        let second = explorer.begin_fetch(FeedWindow::Weekly);
        assert!(second.seq() > first.seq());

        assert!(explorer.complete(second, Ok(vec![event("new", 2.0)])));
        assert!(!explorer.complete(first, Ok(vec![event("old", 2.0)])));

        let ids: Vec<String> = explorer.events().iter().map(|e| e.id.clone()).collect();
        assert_eq!(ids, vec!["new"]);
        assert_eq!(explorer.window(), FeedWindow::Weekly);
        assert_eq!(explorer.status(), FeedStatus::Ready);
    }

    #[test]
    fn test_stale_error_does_not_clear() {
        let explorer = explorer(20);
        let first = explorer.begin_fetch(FeedWindow::Daily);
        let second = explorer.begin_fetch(FeedWindow::Daily);
        assert!(explorer.complete(second, Ok(vec![event("a", 2.0)])));
        assert!(!explorer.complete(first, Err(QuakeflowError::FetchFailed("timeout".into()))));
        assert_eq!(explorer.events().len(), 1);
    }

    #[test]
    fn test_failure_clears_collection() {
        let explorer = explorer(20);
        let ticket = explorer.begin_fetch(FeedWindow::Daily);
        explorer.complete(ticket, Ok(vec![event("a", 2.0)]));
        explorer.select("a");

        let ticket = explorer.begin_fetch(FeedWindow::Daily);
        assert_eq!(explorer.status(), FeedStatus::Loading);
        explorer.complete(ticket, Err(QuakeflowError::FetchFailed("500 Internal Server Error".into())));
        assert!(explorer.events().is_empty());
        assert!(explorer.selected().is_none());
        assert_eq!(explorer.status(), FeedStatus::Failed("500 Internal Server Error".into()));
        assert_eq!(explorer.status_message().unwrap(), "Could not load the earthquake feed: 500 Internal Server Error");

        let ticket = explorer.begin_fetch(FeedWindow::Daily);
        explorer.complete(ticket, Err(QuakeflowError::NoData));
        assert_eq!(explorer.status(), FeedStatus::NoData);
        assert!(explorer.visible().is_empty());
    }

    #[test]
    fn test_load_more_and_filter_reset() {
        let explorer = explorer(2);
        let ticket = explorer.begin_fetch(FeedWindow::Daily);
        explorer.complete(ticket, Ok((0..5).map(|i| event(&format!("e{}", i), 1.0 + i as f64)).collect()));

        let first: Vec<String> = explorer.visible().into_iter().map(|e| e.id).collect();
        assert_eq!(first, vec!["e0", "e1"]);
        assert!(explorer.has_more());

        assert_eq!(explorer.load_more(), 4);
        let second: Vec<String> = explorer.visible().into_iter().map(|e| e.id).collect();
        assert_eq!(second, vec!["e0", "e1", "e2", "e3"]);
        assert_eq!(&second[..2], &first[..]);

        explorer.set_range(RangeFilter::Light);
        assert_eq!(explorer.query().visible_count, 2);
        let light: Vec<String> = explorer.visible().into_iter().map(|e| e.id).collect();
        assert_eq!(light, vec!["e2", "e3"]);
        assert_eq!(explorer.matched(), 2);
        assert!(!explorer.has_more());

        explorer.load_more();
        explorer.set_search("nothing matches");
        assert_eq!(explorer.query().visible_count, 2);
        assert!(explorer.visible().is_empty());
    }

    #[test]
    fn test_select() {
        let explorer = explorer(20);
        let ticket = explorer.begin_fetch(FeedWindow::Daily);
        explorer.complete(ticket, Ok(vec![event("a", 2.0), event("b", 6.0)]));

        let target = explorer.select("b").unwrap();
        assert_eq!((target.latitude, target.longitude), (34.7, 135.5));
        assert_eq!(explorer.selected().unwrap().id, "b");
        assert!(explorer.select("missing").is_none());
        assert!(explorer.selected().is_none());

        explorer.select("a");
        let ticket = explorer.begin_fetch(FeedWindow::Daily);
        explorer.complete(ticket, Ok(vec![event("b", 6.0)]));
        assert!(explorer.selected().is_none());

        explorer.select("b");
        explorer.clear_selection();
        assert!(explorer.selected().is_none());
    }

    #[tokio::test]
    async fn test_locale_change_relabels_without_refetch() {
        let explorer = explorer(20);
        assert!(explorer.refresh().await.unwrap());
        let loaded_at = explorer.loaded_at();

        let rows = explorer.rows();
        assert_eq!(rows[0].country, "Japan");
        assert_eq!(rows[0].color, MarkerColor::Green);
        assert_eq!(rows[0].time, "2023-11-14 22:13:20 UTC");

        explorer.set_locale(Locale::new("es"));
        assert_eq!(explorer.rows()[0].country, "Japón");
        assert_eq!(explorer.label("column.country"), "País");
        assert_eq!(explorer.loaded_at(), loaded_at);

        explorer.set_locale(Locale::new("de"));
        assert_eq!(explorer.label("column.country"), "Country");
        assert_eq!(explorer.label("no.such.key"), "no.such.key");
        assert_eq!(explorer.rows()[0].country, "JP");
    }

    /// Answers the daily feed slowly with a failure and the weekly feed at once.
    struct RacingSource;

    #[async_trait]
    impl FeedSource for RacingSource {
        async fn get(
            &self,
            url: &str,
        ) -> Result<FeedResponse> {
            if url.contains("all_day") {
                tokio::time::sleep(Duration::from_millis(200)).await;
                return Err(QuakeflowError::FetchFailed("timeout".to_string()));
            }
            Ok(FeedResponse::new(200, "200 OK", json!({ "features": [feature("ev1", "10km SE of Tokyo, Japan", 4.2)] }).to_string()))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_load_reports_no_error() {
        let explorer = ExplorerBuilder::new().source(Arc::new(RacingSource)).build().unwrap();

        let (old, new) = tokio::join!(explorer.load(FeedWindow::Daily), async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            explorer.load(FeedWindow::Weekly).await
        });

        assert_eq!(old, Ok(false));
        assert_eq!(new, Ok(true));
        assert_eq!(explorer.status(), FeedStatus::Ready);
        assert_eq!(explorer.window(), FeedWindow::Weekly);
        assert_eq!(explorer.events().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_applied_failure_is_returned() {
        let explorer = ExplorerBuilder::new().source(Arc::new(RacingSource)).build().unwrap();
        assert_eq!(explorer.load(FeedWindow::Daily).await, Err(QuakeflowError::FetchFailed("timeout".to_string())));
        assert_eq!(explorer.status(), FeedStatus::Failed("timeout".to_string()));
    }

    #[test]
    fn test_load_more_saturates() {
        let explorer = explorer(usize::MAX / 2 + 1);
        assert_eq!(explorer.load_more(), usize::MAX);
        assert_eq!(explorer.load_more(), usize::MAX);
    }

    #[tokio::test]
    async fn test_notifications() {
        let explorer = explorer(20);
        let mut rx = explorer.subscribe();
        explorer.set_window(FeedWindow::Weekly).await.unwrap();
        assert_eq!(
            rx.recv().await.unwrap(),
            ExplorerEvent::Loaded {
                window: FeedWindow::Weekly,
                count: 5
            }
        );

        let stale = explorer.begin_fetch(FeedWindow::Daily);
        explorer.begin_fetch(FeedWindow::Daily);
        explorer.complete(stale, Ok(Vec::new()));
        assert_eq!(
            rx.recv().await.unwrap(),
            ExplorerEvent::Discarded {
                window: FeedWindow::Daily,
                seq: stale.seq()
            }
        );
    }
}
