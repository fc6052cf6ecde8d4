//! Per-locale collections of named formatters

use std::collections::{
    BTreeMap,
    HashMap,
};
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{
    I18nError,
    Result,
};
use crate::resource::read_file;

/// A formatter that can be declared per locale in a formatter resource file.
pub trait LocaleFormatter: Sized {
    /// Value accepted by [`LocaleFormatter::format`]
    type Value: ?Sized;

    /// Builds every formatter declared for `locale`, built-ins included.
    ///
    /// `declarations` is the locale's entry of the `formatters` object.
    fn build_locale(locale: &str, declarations: &Value) -> Result<BTreeMap<String, Self>>;

    /// Renders `value`.
    fn format(&self, value: &Self::Value) -> Result<String>;
}

/// Shape of a formatter resource file.
#[derive(Debug, Deserialize)]
struct FormatterDocument {
    /// Locale → formatter declarations
    formatters: serde_json::Map<String, Value>,
}

/// Named formatters grouped by locale, with a default locale for lookups.
#[derive(Debug, Clone)]
pub struct FormatterRegistry<F> {
    /// Locale of lookups that name none
    locale: String,
    /// Locale → formatter name → formatter
    formatters: HashMap<String, BTreeMap<String, F>>,
}

impl<F: LocaleFormatter> FormatterRegistry<F> {
    /// Empty registry with `locale` as the default.
    ///
    /// # Errors
    /// `InvalidArgument` when `locale` is empty.
    pub fn new(locale: impl Into<String>) -> Result<Self> {
        let locale = locale.into();
        if locale.is_empty() {
            return Err(I18nError::invalid_argument("Invalid locale."));
        }
        Ok(Self { locale, formatters: HashMap::new() })
    }

    /// Default locale used when none is passed.
    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Adds the formatters declared in a JSON file.
    pub fn add_resource(&mut self, path: &Path) -> Result<()> {
        let contents = read_file(path)?;
        self.add_resource_str(&contents)
    }

    /// Adds the formatters declared in `{"formatters": {locale: {...}}}` text.
    ///
    /// Formatters of a later resource replace same-named ones of the same locale.
    pub fn add_resource_str(&mut self, json: &str) -> Result<()> {
        let document: FormatterDocument = serde_json::from_str(json)?;

        let mut built = Vec::with_capacity(document.formatters.len());
        for (locale, declarations) in &document.formatters {
            built.push((locale.clone(), F::build_locale(locale, declarations)?));
        }

        for (locale, formatters) in built {
            tracing::debug!(%locale, count = formatters.len(), "Registering formatters");
            self.formatters.entry(locale).or_default().extend(formatters);
        }
        Ok(())
    }

    /// Renders `value` with the named formatter of `locale`, or of the default locale.
    pub fn format(&self, value: &F::Value, formatter: &str, locale: Option<&str>) -> Result<String> {
        self.get_formatter(formatter, locale)?.format(value)
    }

    /// Named formatter of `locale`, or of the default locale.
    ///
    /// # Errors
    /// `InvalidArgument` when the locale has no formatters or none by that name.
    pub fn get_formatter(&self, formatter: &str, locale: Option<&str>) -> Result<&F> {
        let locale = locale.unwrap_or(&self.locale);
        self.formatters
            .get(locale)
            .ok_or_else(|| I18nError::invalid_argument("Locale data not found."))?
            .get(formatter)
            .ok_or_else(|| I18nError::invalid_argument("Formatter not found for specified locale."))
    }

    /// Locales with at least one registered formatter.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.formatters.keys().map(String::as_str)
    }
}
