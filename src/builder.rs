use std::sync::Arc;

use crate::{
    Config, CountryResolver, Explorer, FeedIngestor, FeedSource, HttpFeedSource, LocaleRegistry, Normalizer, QuakeflowError, Result,
};

pub struct ExplorerBuilder {
    config: Config,
    source: Option<Arc<dyn FeedSource>>,
    registry: Option<Arc<LocaleRegistry>>,
}

impl Default for ExplorerBuilder {
    fn default() -> Self {
        Self {
            config: Config::default(),
            source: None,
            registry: None,
        }
    }
}

impl ExplorerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(
        mut self,
        config: Config,
    ) -> Self {
        self.config = config;
        self
    }

    /// Replaces the HTTP source, e.g. with an in-memory one.
    pub fn source(
        mut self,
        source: Arc<dyn FeedSource>,
    ) -> Self {
        self.source = Some(source);
        self
    }

    pub fn registry(
        mut self,
        registry: Arc<LocaleRegistry>,
    ) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn build(&self) -> Result<Explorer> {
        if self.config.view.page_size == 0 {
            return Err(QuakeflowError::Config("page size must be positive".to_string()));
        }

        let registry = match &self.registry {
            Some(registry) => registry.clone(),
            None => Arc::new(LocaleRegistry::builtin()?),
        };
        let source: Arc<dyn FeedSource> = match &self.source {
            Some(source) => source.clone(),
            None => Arc::new(HttpFeedSource::new(self.config.feed.timeout())?),
        };

        let resolver = Arc::new(CountryResolver::new(registry));
        let normalizer = Arc::new(Normalizer::new(resolver)?);
        let ingestor = Arc::new(FeedIngestor::new(self.config.feed.clone(), source, normalizer));

        Ok(Explorer::new(
            ingestor,
            self.config.view.page_size,
            self.config.view.default_window,
            self.config.view.default_locale.clone(),
        ))
    }
}
