//! The translation store: per-locale resources plus array group definitions

use std::collections::HashMap;

use serde_json::Value;

use super::array_groups::ArrayGroupRegistry;
use super::deep_array;
use super::payload::{
    ResourceInput,
    ResourceKind,
    ResourcePayload,
    Subresource,
};
use crate::config::Settings;
use crate::error::{
    I18nError,
    Result,
};
use crate::format::sprintf;
use crate::resource::{
    self,
    Resource,
};
use crate::types::FormatArgs;

/// Aggregates translation resources and resolves lookups against them.
///
/// Resources only ever grow: adding data for a locale that is already loaded
/// merges into it, with incoming keys winning.
#[derive(Debug, Clone)]
pub struct TranslationStore {
    /// Locale used when a lookup names none
    language: String,
    /// Lookup policy
    settings: Settings,
    /// Merged resource per locale
    resources: HashMap<String, Resource>,
    /// Array groups declared by every loaded resource
    array_groups: ArrayGroupRegistry,
}

impl TranslationStore {
    /// Creates an empty, strict store with `language` as the default locale.
    ///
    /// # Errors
    /// `InvalidArgument` when `language` is empty.
    pub fn new(language: impl Into<String>) -> Result<Self> {
        let mut store = Self {
            language: String::new(),
            settings: Settings::default(),
            resources: HashMap::new(),
            array_groups: ArrayGroupRegistry::new(),
        };
        store.set_language(language)?;
        Ok(store)
    }

    /// Changes the default locale.
    ///
    /// # Errors
    /// `InvalidArgument` when `language` is empty; the previous locale is kept.
    pub fn set_language(&mut self, language: impl Into<String>) -> Result<()> {
        let language = language.into();
        if language.is_empty() {
            return Err(I18nError::invalid_argument(format!("Invalid language {language}")));
        }
        self.language = language;
        Ok(())
    }

    /// Default locale of lookups.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Replaces the lookup policy.
    pub const fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// Current lookup policy.
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Adds a structured payload, JSON text or resource file.
    ///
    /// Either every locale of the payload is merged or, on error, none is.
    pub fn add_resource(&mut self, input: impl Into<ResourceInput>) -> Result<()> {
        let payload = match input.into() {
            ResourceInput::Structured(payload) => payload,
            ResourceInput::Json(text) => parse_payload(&text)?,
            ResourceInput::File(path) => parse_payload(&resource::read_file(&path)?)?,
        };
        self.add_payload(payload)
    }

    /// Adds a resource given as text, interpreted according to `kind`
    /// (`"json"` or `"file"`).
    pub fn add_resource_str(&mut self, text: &str, kind: &str) -> Result<()> {
        let kind: ResourceKind = kind.parse()?;
        self.add_resource(ResourceInput::from_kind(text, kind))
    }

    /// Merges one locale's data into the store.
    pub fn add_subresource(&mut self, subresource: Subresource, locale: &str) -> Result<()> {
        let resource = build_subresource(subresource, locale)?;
        self.merge_resource(locale.to_string(), resource);
        Ok(())
    }

    /// Resolves every subresource first, then ingests metadata and merges.
    fn add_payload(&mut self, payload: ResourcePayload) -> Result<()> {
        let resolved = payload
            .entries
            .into_iter()
            .map(|(locale, subresource)| {
                let resource = build_subresource(subresource, &locale)?;
                Ok((locale, resource))
            })
            .collect::<Result<Vec<_>>>()?;

        if let Some(metadata) = &payload.metadata {
            self.array_groups.ingest(metadata);
        }
        for (locale, resource) in resolved {
            self.merge_resource(locale, resource);
        }
        Ok(())
    }

    /// Merges into the locale's existing resource, incoming keys winning.
    fn merge_resource(&mut self, locale: String, resource: Resource) {
        tracing::debug!(%locale, keys = resource.len(), "Adding resource");
        match self.resources.get_mut(&locale) {
            Some(existing) => existing.merge(&resource, true),
            None => {
                self.resources.insert(locale, resource);
            }
        }
    }

    /// Localized text for `key`.
    ///
    /// In lenient mode a missing key resolves to the key itself.
    ///
    /// # Errors
    /// - `UnknownLocale` when no resource is loaded for the locale
    /// - `UnknownKey` when the key is missing and the store is strict
    pub fn translate<'a>(&'a self, key: &'a str, locale: Option<&str>) -> Result<&'a str> {
        Ok(self.lookup(key, locale)?.unwrap_or(key))
    }

    /// Localized text for `key` with `args` substituted into its placeholders.
    ///
    /// A key missing in lenient mode is returned as is, without substitution.
    pub fn translate_formatted(
        &self,
        key: &str,
        args: impl Into<FormatArgs>,
        locale: Option<&str>,
    ) -> Result<String> {
        match self.lookup(key, locale)? {
            Some(template) => sprintf(template, &args.into().into_vec()),
            None => Ok(key.to_string()),
        }
    }

    /// `Ok(None)` only for a missing key in lenient mode.
    fn lookup<'a>(&'a self, key: &str, locale: Option<&str>) -> Result<Option<&'a str>> {
        let locale = locale.unwrap_or(&self.language);
        let resource = self
            .resources
            .get(locale)
            .ok_or_else(|| I18nError::UnknownLocale(locale.to_string()))?;

        match resource.get(key) {
            Some(text) => Ok(Some(text)),
            None if self.settings.is_strict() => Err(I18nError::UnknownKey(key.to_string())),
            None => {
                tracing::trace!(%key, %locale, "Missing key, falling back to the key");
                Ok(None)
            }
        }
    }

    /// Collapses the fields of `group` in every record nested `depth` levels
    /// inside `node`.
    ///
    /// A missing or `null` node yields `None`.
    ///
    /// # Errors
    /// - `InvalidArgument` for a negative depth
    /// - `StructureDepth` when the data is nested less deeply than `depth`
    /// - `UnknownGroup`, `UnknownLocale` or `InvalidIndex` from flattening a record
    pub fn localize_deep_array(
        &self,
        node: Option<&Value>,
        group: &str,
        depth: i64,
        locale: Option<&str>,
    ) -> Result<Option<Value>> {
        let Some(node) = node.filter(|node| !node.is_null()) else {
            return Ok(None);
        };
        let depth = u64::try_from(depth).map_err(|_| {
            I18nError::invalid_argument(format!(
                "Depth must be a non-negative integer, {depth} given"
            ))
        })?;
        let locale = locale.unwrap_or(&self.language);

        deep_array::localize(node, group, depth, locale, &self.array_groups).map(Some)
    }

    /// Merged resource of `locale`, if loaded.
    #[must_use]
    pub fn resource(&self, locale: &str) -> Option<&Resource> {
        self.resources.get(locale)
    }

    /// Loaded locales, sorted.
    #[must_use]
    pub fn locales(&self) -> Vec<&str> {
        let mut locales: Vec<&str> = self.resources.keys().map(String::as_str).collect();
        locales.sort_unstable();
        locales
    }

    /// Every array group declared so far.
    #[must_use]
    pub const fn array_groups(&self) -> &ArrayGroupRegistry {
        &self.array_groups
    }
}

/// Parses JSON text into a structured payload.
fn parse_payload(text: &str) -> Result<ResourcePayload> {
    let value: Value = serde_json::from_str(text)?;
    ResourcePayload::try_from(value)
}

/// Builds the container of one locale from its subresource.
fn build_subresource(subresource: Subresource, locale: &str) -> Result<Resource> {
    match subresource {
        Subresource::Container(resource) => Ok(resource),
        Subresource::Strings(data) => resource::from_map(data, locale),
        Subresource::File(path) => resource::from_file(&path, locale),
    }
}
