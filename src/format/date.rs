//! Locale-configured date formatting with strftime patterns

use std::collections::BTreeMap;
use std::fmt::Write;

use chrono::format::{
    Item,
    StrftimeItems,
};
use chrono::{
    DateTime,
    FixedOffset,
    NaiveDate,
    NaiveDateTime,
    TimeZone,
};
use serde::Deserialize;
use serde_json::Value;

use super::registry::{
    FormatterRegistry,
    LocaleFormatter,
};
use crate::error::{
    I18nError,
    Result,
};

/// Calendar requested by a declaration.
///
/// Only the Gregorian calendar is rendered; `traditional` is kept for
/// compatibility with existing resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Calendar {
    /// Gregorian calendar
    #[default]
    Gregorian,
    /// Locale's traditional calendar, rendered as Gregorian
    Traditional,
}

/// A named formatter declaration: `{"pattern": "%Y-%m-%d", "calendar": "gregorian"}`.
#[derive(Debug, Clone, Deserialize)]
struct DateSpec {
    /// strftime pattern
    pattern: String,
    /// Requested calendar
    #[serde(default)]
    calendar: Calendar,
}

/// A date-time accepted by [`DateFormatter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateInput {
    /// Date-time with a UTC offset
    Zoned(DateTime<FixedOffset>),
    /// Date-time without an offset
    Naive(NaiveDateTime),
    /// RFC 3339, `%Y-%m-%d %H:%M:%S` or `%Y-%m-%d`
    Text(String),
}

impl DateInput {
    /// Parses text input; other variants are returned as they are.
    fn to_naive_or_zoned(&self) -> Result<Self> {
        let Self::Text(text) = self else {
            return Ok(self.clone());
        };
        let text = text.trim();
        if let Ok(zoned) = DateTime::parse_from_rfc3339(text) {
            return Ok(Self::Zoned(zoned));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
            return Ok(Self::Naive(naive));
        }
        NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(Self::Naive)
            .ok_or_else(|| I18nError::invalid_argument(format!("Invalid date: {text}")))
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for DateInput {
    fn from(value: DateTime<Tz>) -> Self {
        Self::Zoned(value.fixed_offset())
    }
}

impl From<NaiveDateTime> for DateInput {
    fn from(value: NaiveDateTime) -> Self {
        Self::Naive(value)
    }
}

impl From<&str> for DateInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// One date format of one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormatter {
    /// strftime pattern, validated on construction
    pattern: String,
    /// Declared calendar
    calendar: Calendar,
}

impl DateFormatter {
    /// Formatter for a strftime `pattern`.
    ///
    /// # Errors
    /// `InvalidArgument` when `pattern` contains an unknown specifier.
    pub fn new(pattern: impl Into<String>, calendar: Calendar) -> Result<Self> {
        let pattern = pattern.into();
        if StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error)) {
            return Err(I18nError::invalid_argument(format!("Invalid date pattern: {pattern}")));
        }
        Ok(Self { pattern, calendar })
    }

    /// strftime pattern.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Declared calendar.
    #[must_use]
    pub const fn calendar(&self) -> Calendar {
        self.calendar
    }
}

impl LocaleFormatter for DateFormatter {
    type Value = DateInput;

    fn build_locale(locale: &str, declarations: &Value) -> Result<BTreeMap<String, Self>> {
        let declarations: BTreeMap<String, DateSpec> = BTreeMap::deserialize(declarations)
            .map_err(|e| I18nError::invalid_argument(format!("Invalid formatters for {locale}: {e}")))?;

        declarations
            .into_iter()
            .map(|(name, spec)| Ok((name, Self::new(spec.pattern, spec.calendar)?)))
            .collect()
    }

    fn format(&self, value: &DateInput) -> Result<String> {
        let mut out = String::new();
        let written = match value.to_naive_or_zoned()? {
            DateInput::Zoned(zoned) => write!(out, "{}", zoned.format(&self.pattern)),
            DateInput::Naive(naive) => write!(out, "{}", naive.format(&self.pattern)),
            DateInput::Text(_) => Ok(()),
        };
        written.map_err(|_| {
            I18nError::Format(format!("Pattern {} does not apply to {value:?}", self.pattern))
        })?;
        Ok(out)
    }
}

/// Registry of date formatters.
pub type DateFormat = FormatterRegistry<DateFormatter>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use chrono::Utc;
    use rstest::{
        fixture,
        rstest,
    };
    use tempfile::TempDir;

    use super::*;

    /// Formatter declarations for en-CA and fr-CA
    const RESOURCE: &str = r#"{
        "formatters": {
            "en-CA": {
                "short": { "pattern": "%Y-%m-%d" },
                "time": { "pattern": "%-I:%M %p" }
            },
            "fr-CA": {
                "time": { "pattern": "%Hh%M", "calendar": "traditional" }
            }
        }
    }"#;

    /// en-CA and fr-CA date formatters
    #[fixture]
    fn registry() -> DateFormat {
        let mut registry = DateFormat::new("en-CA").unwrap();
        registry.add_resource_str(RESOURCE).unwrap();
        registry
    }

    /// `format`: date, naive and RFC 3339 text
    #[rstest]
    #[case::date_only("2017-06-01", "short", "en-CA", "2017-06-01")]
    #[case::naive("2017-06-01 18:01:00", "time", "en-CA", "6:01 PM")]
    #[case::rfc3339("2017-06-01T18:01:00-04:00", "time", "fr-CA", "18h01")]
    fn test_format_text(
        registry: DateFormat,
        #[case] input: &str,
        #[case] formatter: &str,
        #[case] locale: &str,
        #[case] expected: &str,
    ) {
        let formatted = registry.format(&DateInput::from(input), formatter, Some(locale)).unwrap();

        assert_eq!(formatted, expected);
    }

    /// `format`: chrono values need no parsing
    #[rstest]
    fn test_format_chrono_value(registry: DateFormat) {
        let value = Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap();

        assert_eq!(registry.format(&value.into(), "short", None).unwrap(), "2020-01-02");
    }

    /// `get_formatter`: declared calendar and pattern
    #[rstest]
    fn test_traditional_calendar_is_kept(registry: DateFormat) {
        let formatter = registry.get_formatter("time", Some("fr-CA")).unwrap();

        assert_eq!(formatter.calendar(), Calendar::Traditional);
        assert_eq!(formatter.pattern(), "%Hh%M");
    }

    /// `format`: unparseable date text
    #[rstest]
    fn test_invalid_date_text(registry: DateFormat) {
        let result = registry.format(&DateInput::from("yesterday"), "short", None);

        assert!(matches!(result, Err(I18nError::InvalidArgument(_))));
    }

    /// `new`: unknown strftime specifier
    #[rstest]
    fn test_invalid_pattern() {
        assert!(matches!(DateFormatter::new("%Q", Calendar::Gregorian), Err(I18nError::InvalidArgument(_))));
    }

    /// `format`: undeclared locale or name
    #[rstest]
    fn test_unknown_locale_and_formatter(registry: DateFormat) {
        let value = DateInput::from("2017-06-01");

        assert!(registry.format(&value, "short", Some("zh-CN")).is_err());
        assert!(registry.format(&value, "long", None).is_err());
    }

    /// `add_resource`: declarations from a file
    #[rstest]
    fn test_add_resource_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("dates.json");
        fs::write(&path, RESOURCE).unwrap();

        let mut registry = DateFormat::new("fr-CA").unwrap();
        registry.add_resource(&path).unwrap();

        let formatted = registry.format(&"2017-06-01 09:05:00".into(), "time", None).unwrap();
        assert_eq!(formatted, "09h05");
    }

    /// `add_resource`: no file at the path
    #[rstest]
    fn test_add_resource_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let mut registry = DateFormat::new("fr-CA").unwrap();

        let result = registry.add_resource(&temp_dir.path().join("missing.json"));

        assert!(matches!(result, Err(I18nError::InvalidResource(_))));
    }
}
