//! Country resolution over the locale registry.

use std::sync::Arc;

use crate::{
    Result,
    locale::{Locale, LocaleRegistry},
    model::CountryCode,
};

/// Maps locality tails to country codes and codes to localized names.
#[derive(Debug, Clone)]
pub struct CountryResolver {
    registry: Arc<LocaleRegistry>,
}

impl CountryResolver {
    pub fn new(registry: Arc<LocaleRegistry>) -> Self {
        Self {
            registry,
        }
    }

    pub fn registry(&self) -> &Arc<LocaleRegistry> {
        &self.registry
    }

    /// Exact match of the trimmed tail against the English alias table.
    pub fn resolve_code(
        &self,
        locality_tail: &str,
    ) -> Option<CountryCode> {
        self.registry.code_for(locality_tail).cloned()
    }

    /// Localized name, or `LocalizationMissing` if the locale has no table.
    pub fn display_name(
        &self,
        code: &CountryCode,
        locale: &Locale,
    ) -> Result<String> {
        self.registry.country_name(code, locale).map(str::to_string)
    }
}
