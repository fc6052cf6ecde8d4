//! Per-locale string table

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::io;

use serde::Serialize;
use serde_json::ser::{
    CharEscape,
    CompactFormatter,
    Formatter,
    Serializer,
};

use crate::error::{
    I18nError,
    Result,
};

/// Flat key → string mapping of one locale.
pub type ResourceData = BTreeMap<String, String>;

/// One locale's translation strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    /// Locale as given, separators untouched
    locale: String,
    /// Flat key → string map
    data: ResourceData,
}

impl Resource {
    /// Container for `locale` holding `data`.
    ///
    /// # Errors
    /// `InvalidArgument` when `locale` is empty.
    pub fn new(locale: impl Into<String>, data: ResourceData) -> Result<Self> {
        let locale = locale.into();
        if locale.trim().is_empty() {
            return Err(I18nError::invalid_argument("Invalid locale"));
        }
        Ok(Self { locale, data })
    }

    /// Reads a `{locale: {key: value}}` document, using its first entry.
    pub fn from_json(json: &str) -> Result<Self> {
        let document: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
        let Some((locale, value)) = document.into_iter().next() else {
            return Err(I18nError::invalid_argument("Invalid locale"));
        };
        super::builder::from_value(&value, &locale)
    }

    /// Locale with `_` separators written as `-` (e.g. `en_CA` → `en-CA`).
    #[must_use]
    pub fn locale(&self) -> String {
        self.locale.replace('_', "-")
    }

    /// Primary language subtag of the locale.
    #[must_use]
    pub fn language(&self) -> &str {
        self.locale.split(['-', '_']).next().unwrap_or(&self.locale)
    }

    /// Every key and its string.
    #[must_use]
    pub const fn data(&self) -> &ResourceData {
        &self.data
    }

    /// Adds entries; incoming values win when `overwrite` is set, existing ones otherwise.
    pub fn add_data(&mut self, data: ResourceData, overwrite: bool) {
        if overwrite {
            self.data.extend(data);
        } else {
            for (key, value) in data {
                self.data.entry(key).or_insert(value);
            }
        }
    }

    /// Shallow key union with `other`.
    ///
    /// Resources of different locales are still merged; the mismatch is
    /// reported as a warning.
    pub fn merge(&mut self, other: &Self, overwrite: bool) {
        if self.locale() != other.locale() {
            tracing::warn!(
                locale = %self.locale(),
                incoming = %other.locale(),
                "Attempting to merge resources of different locale"
            );
        }
        self.add_data(other.data.clone(), overwrite);
    }

    /// String stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    /// Whether `key` has a string.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Sets one string, returning the one it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.data.insert(key.into(), value.into())
    }

    /// Drops one key.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.data.remove(key)
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether no key is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Keys and strings in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.data.iter()
    }

    /// Serializes as `{locale: {key: value}}` with `& ' " < >` hex-escaped.
    pub fn to_json(&self) -> Result<String> {
        let mut document = BTreeMap::new();
        document.insert(self.locale(), &self.data);

        let mut buffer = Vec::new();
        let mut serializer = Serializer::with_formatter(&mut buffer, HexEscapeFormatter);
        document.serialize(&mut serializer)?;

        String::from_utf8(buffer).map_err(|e| I18nError::invalid_argument(e.to_string()))
    }
}

impl<'a> IntoIterator for &'a Resource {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

/// Compact JSON output that keeps markup-sensitive characters out of strings.
struct HexEscapeFormatter;

impl Formatter for HexEscapeFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (index, c) in fragment.char_indices() {
            let escaped: &[u8] = match c {
                '&' => b"\\u0026",
                '\'' => b"\\u0027",
                '<' => b"\\u003C",
                '>' => b"\\u003E",
                _ => continue,
            };
            writer.write_all(fragment.get(start..index).unwrap_or_default().as_bytes())?;
            writer.write_all(escaped)?;
            start = index + 1;
        }
        writer.write_all(fragment.get(start..).unwrap_or_default().as_bytes())
    }

    fn write_char_escape<W>(&mut self, writer: &mut W, char_escape: CharEscape) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if matches!(char_escape, CharEscape::Quote) {
            return writer.write_all(b"\\u0022");
        }
        CompactFormatter.write_char_escape(writer, char_escape)
    }
}
