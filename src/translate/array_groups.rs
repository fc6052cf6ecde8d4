//! Named array groups: which locale-suffixed field feeds each flattened field

use std::collections::{
    BTreeMap,
    HashMap,
};

use super::payload::Metadata;
use crate::error::{
    I18nError,
    Result,
};

/// Locale → source field name of one group.
pub type GroupFields = BTreeMap<String, String>;

/// Array groups accumulated from every loaded resource.
///
/// Groups are only ever added to; a later declaration for the same
/// `(group, locale)` pair replaces the field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArrayGroupRegistry {
    /// Group name → locale → source field
    groups: HashMap<String, GroupFields>,
}

impl ArrayGroupRegistry {
    /// Registry without any group.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers every group declared in a metadata block.
    ///
    /// Field names are not validated here; a bad name surfaces when a node is
    /// flattened.
    pub fn ingest(&mut self, metadata: &Metadata) {
        for (group, fields) in &metadata.array_groups {
            for (locale, field) in fields {
                self.insert(group, locale, field);
            }
            tracing::debug!(%group, locales = fields.len(), "Registered array group");
        }
    }

    /// Registers `field` as the source of `group` for `locale`.
    pub fn insert(&mut self, group: &str, locale: &str, field: &str) {
        self.groups
            .entry(group.to_string())
            .or_default()
            .insert(locale.to_string(), field.to_string());
    }

    /// Every locale's source field of `group`.
    #[must_use]
    pub fn group(&self, group: &str) -> Option<&GroupFields> {
        self.groups.get(group)
    }

    /// Field name registered for `(group, locale)`.
    ///
    /// # Errors
    /// - `UnknownGroup` when `group` was never declared
    /// - `UnknownLocale` when the group has no field for `locale`
    pub fn resolve(&self, group: &str, locale: &str) -> Result<&str> {
        let fields =
            self.group(group).ok_or_else(|| I18nError::UnknownGroup(group.to_string()))?;
        fields
            .get(locale)
            .map(String::as_str)
            .ok_or_else(|| I18nError::UnknownLocale(locale.to_string()))
    }

    /// Declared group names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Number of declared groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether no group is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    /// Metadata declaring one group
    fn metadata(group: &str, pairs: &[(&str, &str)]) -> Metadata {
        let fields = pairs.iter().map(|(l, f)| ((*l).to_string(), (*f).to_string())).collect();
        Metadata { array_groups: BTreeMap::from([(group.to_string(), fields)]) }
    }

    /// `ingest`: later declarations add locales to a group
    #[googletest::test]
    fn test_ingest_unions_locales() {
        let mut registry = ArrayGroupRegistry::new();

        registry.ingest(&metadata("headsign", &[("en-CA", "headsign_en")]));
        registry.ingest(&metadata("headsign", &[("fr-CA", "headsign_fr")]));

        expect_that!(registry.len(), eq(1));
        expect_that!(registry.group("headsign").map(GroupFields::len), some(eq(2)));
        expect_that!(registry.resolve("headsign", "en-CA").ok(), some(eq("headsign_en")));
        expect_that!(registry.resolve("headsign", "fr-CA").ok(), some(eq("headsign_fr")));
    }

    /// `ingest`: a redeclared locale takes the new field
    #[googletest::test]
    fn test_ingest_last_writer_wins_per_pair() {
        let mut registry = ArrayGroupRegistry::new();

        registry.ingest(&metadata("station", &[("en-CA", "station_en"), ("fr-CA", "station_fr")]));
        registry.ingest(&metadata("station", &[("en-CA", "station_english")]));

        expect_that!(registry.resolve("station", "en-CA").ok(), some(eq("station_english")));
        expect_that!(registry.resolve("station", "fr-CA").ok(), some(eq("station_fr")));
    }

    /// `resolve`: group never declared
    #[rstest]
    fn test_resolve_unknown_group() {
        let registry = ArrayGroupRegistry::new();

        let result = registry.resolve("endpoint", "en-CA");

        assert!(matches!(result, Err(I18nError::UnknownGroup(g)) if g == "endpoint"));
    }

    /// `resolve`: declared group without the locale
    #[rstest]
    fn test_resolve_unknown_locale() {
        let mut registry = ArrayGroupRegistry::new();
        registry.insert("headsign", "en-CA", "headsign_en");

        let result = registry.resolve("headsign", "zh-CN");

        assert!(matches!(result, Err(I18nError::UnknownLocale(l)) if l == "zh-CN"));
    }

    /// `names`: one entry per group however many locales it has
    #[rstest]
    fn test_names() {
        let mut registry = ArrayGroupRegistry::new();
        registry.ingest(&metadata("headsign", &[("en-CA", "headsign_en"), ("fr-CA", "headsign_fr")]));
        registry.insert("subtext", "en-CA", "subtext_en");

        let mut names: Vec<&str> = registry.names().collect();
        names.sort_unstable();

        assert_eq!(names, vec!["headsign", "subtext"]);
    }
}
