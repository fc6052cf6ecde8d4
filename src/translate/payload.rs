//! Resource inputs accepted by the translation store

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};
use serde_json::Value;

use super::array_groups::GroupFields;
use crate::error::{
    I18nError,
    Result,
};
use crate::resource::{
    KEY_SEPARATOR,
    Resource,
    ResourceData,
    flatten_json,
};

/// Reserved top-level key of a resource payload.
pub const METADATA_KEY: &str = "@metadata";

/// The `@metadata` block of a resource payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Metadata {
    /// Group name → locale → source field name
    pub array_groups: BTreeMap<String, GroupFields>,
}

/// Data contributed for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subresource {
    /// Flat key → string map
    Strings(ResourceData),
    /// An already built container
    Container(Resource),
    /// Path of a JSON file holding the locale's strings
    File(PathBuf),
}

impl TryFrom<Value> for Subresource {
    type Error = I18nError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::String(path) => Ok(Self::File(PathBuf::from(path))),
            Value::Object(_) | Value::Array(_) => {
                Ok(Self::Strings(flatten_json(&value, KEY_SEPARATOR, None)))
            }
            _ => Err(I18nError::invalid_argument("Invalid subresource")),
        }
    }
}

impl From<ResourceData> for Subresource {
    fn from(value: ResourceData) -> Self {
        Self::Strings(value)
    }
}

impl From<Resource> for Subresource {
    fn from(value: Resource) -> Self {
        Self::Container(value)
    }
}

/// A structured resource: subresources keyed by locale plus optional metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourcePayload {
    /// Locale and its data, in document order
    pub entries: Vec<(String, Subresource)>,
    /// The `@metadata` block, if any
    pub metadata: Option<Metadata>,
}

impl ResourcePayload {
    /// Payload without locales or metadata.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the data of one locale.
    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>, data: impl Into<Subresource>) -> Self {
        self.entries.push((locale.into(), data.into()));
        self
    }

    /// Sets the metadata block.
    #[must_use]
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

impl TryFrom<Value> for ResourcePayload {
    type Error = I18nError;

    fn try_from(value: Value) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(I18nError::invalid_argument("Resource must be a JSON object keyed by locale"));
        };

        let mut payload = Self::new();
        for (locale, value) in map {
            if locale == METADATA_KEY {
                let metadata = Metadata::deserialize(value)
                    .map_err(|e| I18nError::invalid_argument(format!("Invalid metadata: {e}")))?;
                payload.metadata = Some(metadata);
                continue;
            }
            payload.entries.push((locale, Subresource::try_from(value)?));
        }
        Ok(payload)
    }
}

/// How a string resource argument is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResourceKind {
    /// JSON text
    Json,
    /// Path of a JSON file
    #[default]
    File,
}

impl FromStr for ResourceKind {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "json" => Ok(Self::Json),
            "file" => Ok(Self::File),
            _ => Err(I18nError::invalid_argument("Invalid resource type")),
        }
    }
}

/// Any input accepted by [`TranslationStore::add_resource`](super::TranslationStore::add_resource).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceInput {
    /// Already decomposed payload
    Structured(ResourcePayload),
    /// JSON text of a payload
    Json(String),
    /// Path of a JSON payload file
    File(PathBuf),
}

impl ResourceInput {
    /// Interprets `text` according to `kind`.
    #[must_use]
    pub fn from_kind(text: impl Into<String>, kind: ResourceKind) -> Self {
        match kind {
            ResourceKind::Json => Self::Json(text.into()),
            ResourceKind::File => Self::File(PathBuf::from(text.into())),
        }
    }
}

impl From<ResourcePayload> for ResourceInput {
    fn from(value: ResourcePayload) -> Self {
        Self::Structured(value)
    }
}

impl From<PathBuf> for ResourceInput {
    fn from(value: PathBuf) -> Self {
        Self::File(value)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    /// `try_from`: metadata, inline data and file references
    #[googletest::test]
    fn test_payload_from_value() {
        let value = json!({
            "@metadata": {
                "arrayGroups": {
                    "headsign": { "en-CA": "headsign_en", "fr-CA": "headsign_fr" }
                }
            },
            "en-CA": { "greet": "Hello" },
            "fr-CA": "locales/fr-CA.json"
        });

        let payload = ResourcePayload::try_from(value).unwrap();

        expect_that!(payload.entries.len(), eq(2));
        expect_that!(
            payload.entries.first().map(|(locale, _)| locale.as_str()),
            some(eq("en-CA"))
        );
        assert_eq!(
            payload.entries.get(1).map(|(_, sub)| sub),
            Some(&Subresource::File(PathBuf::from("locales/fr-CA.json")))
        );
        let groups = payload.metadata.unwrap().array_groups;
        expect_that!(groups.get("headsign").map(|g| g.len()), some(eq(2)));
    }

    /// `try_from`: scalar locale data other than a path
    #[rstest]
    #[case::null(json!({"en-CA": null}))]
    #[case::number(json!({"en-CA": 3}))]
    #[case::bool(json!({"en-CA": true}))]
    fn test_invalid_subresource(#[case] value: Value) {
        let result = ResourcePayload::try_from(value);

        assert!(matches!(result, Err(I18nError::InvalidArgument(m)) if m == "Invalid subresource"));
    }

    /// `try_from`: payloads are keyed by locale
    #[rstest]
    #[case::list(json!(["en-CA"]))]
    #[case::string(json!("en-CA"))]
    fn test_payload_must_be_object(#[case] value: Value) {
        assert!(matches!(ResourcePayload::try_from(value), Err(I18nError::InvalidArgument(_))));
    }

    /// `try_from`: a group must map locales to fields
    #[rstest]
    fn test_invalid_metadata() {
        let value = json!({"@metadata": {"arrayGroups": {"headsign": "headsign_en"}}});

        assert!(matches!(ResourcePayload::try_from(value), Err(I18nError::InvalidArgument(_))));
    }

    /// `try_from`: empty metadata block
    #[rstest]
    fn test_metadata_without_groups() {
        let payload = ResourcePayload::try_from(json!({"@metadata": {}})).unwrap();

        assert_eq!(payload.metadata, Some(Metadata::default()));
        assert!(payload.entries.is_empty());
    }

    /// `from_str`: only the exact kind names
    #[rstest]
    #[case("json", Some(ResourceKind::Json))]
    #[case("file", Some(ResourceKind::File))]
    #[case("foo", None)]
    #[case("JSON", None)]
    fn test_resource_kind_from_str(#[case] input: &str, #[case] expected: Option<ResourceKind>) {
        assert_eq!(input.parse::<ResourceKind>().ok(), expected);
    }

    /// `from_kind`: text becomes JSON or a path
    #[rstest]
    fn test_input_from_kind() {
        assert_eq!(ResourceInput::from_kind("{}", ResourceKind::Json), ResourceInput::Json("{}".into()));
        assert_eq!(
            ResourceInput::from_kind("a.json", ResourceKind::File),
            ResourceInput::File(PathBuf::from("a.json"))
        );
    }
}
