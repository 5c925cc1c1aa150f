//! Locale identifiers and the locale-keyed lookup registry.
//!
//! The registry is built once at startup and shared behind an `Arc`. It holds
//! the English alias table used for country resolution plus, per locale, a
//! country name table and a UI label table.

mod tables;

use std::{collections::HashMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{QuakeflowError, Result, model::CountryCode};

/// Normalized locale identifier, e.g. `en`, `es-mx`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub struct Locale(String);

impl Locale {
    /// Trims, lower-cases and converts `_` to `-` (`en_US` -> `en-us`).
    pub fn new(s: &str) -> Self {
        Self(s.trim().replace('_', "-").to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Primary language subtag, `es` for `es-mx`.
    pub fn language(&self) -> Locale {
        let lang = self.0.split('-').next().unwrap_or_default();
        Self(lang.to_string())
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::new("en")
    }
}

impl FromStr for Locale {
    type Err = QuakeflowError;

    fn from_str(s: &str) -> Result<Self> {
        let locale = Self::new(s);
        if locale.0.is_empty() {
            return Err(QuakeflowError::Config("empty locale identifier".to_string()));
        }
        Ok(locale)
    }
}

impl From<String> for Locale {
    fn from(s: String) -> Self {
        Self::new(&s)
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.0
    }
}

impl fmt::Display for Locale {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Strings registered for one locale.
#[derive(Debug, Clone, Default)]
pub struct LocaleTable {
    countries: HashMap<CountryCode, String>,
    labels: HashMap<String, String>,
}

impl LocaleTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_country(
        mut self,
        code: CountryCode,
        name: impl Into<String>,
    ) -> Self {
        self.countries.insert(code, name.into());
        self
    }

    pub fn with_label(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    pub fn country(
        &self,
        code: &CountryCode,
    ) -> Option<&str> {
        self.countries.get(code).map(String::as_str)
    }

    pub fn label(
        &self,
        key: &str,
    ) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }
}

/// Locale-keyed lookup tables plus the English alias -> code table.
#[derive(Debug, Clone, Default)]
pub struct LocaleRegistry {
    codes: HashMap<String, CountryCode>,
    locales: HashMap<Locale, LocaleTable>,
}

impl LocaleRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in English, Spanish and French tables.
    pub fn builtin() -> Result<Self> {
        let mut registry = Self::new();
        let mut locale_tables: Vec<LocaleTable> = tables::LOCALES.iter().map(|_| LocaleTable::new()).collect();

        for (code, en, es, fr) in tables::COUNTRIES {
            let code = CountryCode::new(code).ok_or_else(|| QuakeflowError::Config(format!("invalid country code '{}'", code)))?;
            registry.register_code(en, code.clone());
            for (table, name) in locale_tables.iter_mut().zip([en, es, fr]) {
                table.countries.insert(code.clone(), name.to_string());
            }
        }

        for (alias, code) in tables::ALIASES {
            let code = CountryCode::new(code).ok_or_else(|| QuakeflowError::Config(format!("invalid country code '{}' for alias '{}'", code, alias)))?;
            registry.register_code(alias, code);
        }

        let labels = [tables::LABELS_EN, tables::LABELS_ES, tables::LABELS_FR];
        for ((locale, mut table), labels) in tables::LOCALES.iter().zip(locale_tables).zip(labels) {
            for (key, value) in labels {
                table.labels.insert(key.to_string(), value.to_string());
            }
            registry.register_locale(Locale::new(locale), table);
        }

        Ok(registry)
    }

    /// Maps an English country name or alias to a code.
    pub fn register_code(
        &mut self,
        alias: &str,
        code: CountryCode,
    ) {
        self.codes.insert(alias.trim().to_string(), code);
    }

    pub fn register_locale(
        &mut self,
        locale: Locale,
        table: LocaleTable,
    ) {
        trace!("locale::register({})", locale);
        self.locales.insert(locale, table);
    }

    /// Exact alias lookup. Case and accents are significant.
    pub fn code_for(
        &self,
        alias: &str,
    ) -> Option<&CountryCode> {
        self.codes.get(alias.trim())
    }

    /// Registered locales, sorted.
    pub fn locales(&self) -> Vec<Locale> {
        let mut locales: Vec<Locale> = self.locales.keys().cloned().collect();
        locales.sort_by(|a, b| a.0.cmp(&b.0));
        locales
    }

    /// Every code reachable through the alias table.
    pub fn codes(&self) -> Vec<CountryCode> {
        let mut codes: Vec<CountryCode> = self.codes.values().cloned().collect();
        codes.sort();
        codes.dedup();
        codes
    }

    /// Table for `locale`, falling back to its language subtag.
    pub fn table(
        &self,
        locale: &Locale,
    ) -> Result<&LocaleTable> {
        self.locales
            .get(locale)
            .or_else(|| self.locales.get(&locale.language()))
            .ok_or_else(|| QuakeflowError::LocalizationMissing(locale.to_string()))
    }

    /// Localized country name.
    pub fn country_name(
        &self,
        code: &CountryCode,
        locale: &Locale,
    ) -> Result<&str> {
        self.table(locale)?.country(code).ok_or_else(|| QuakeflowError::LocalizationMissing(format!("{}: {}", locale, code)))
    }

    /// Localized UI label.
    pub fn label(
        &self,
        locale: &Locale,
        key: &str,
    ) -> Result<&str> {
        self.table(locale)?.label(key).ok_or_else(|| QuakeflowError::LocalizationMissing(format!("{}: {}", locale, key)))
    }
}
