//! Construction of [`Resource`]s from maps, JSON values, JSON text and files

use std::path::Path;

use serde_json::Value;

use super::{
    Resource,
    ResourceData,
};
use crate::error::{
    I18nError,
    Result,
};

/// Separator used when nested objects are flattened into keys.
pub const KEY_SEPARATOR: &str = ".";

/// Builds a resource from an in-memory string map.
pub fn from_map(data: ResourceData, locale: &str) -> Result<Resource> {
    Resource::new(locale, data)
}

/// Builds a resource from a parsed JSON object.
///
/// Nested objects and arrays become dot/bracket keys and non-string scalars
/// are stringified.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use json_i18n::resource::from_value;
///
/// let value = json!({
///     "menu": { "open": "Open" },
///     "stops": ["Campus", "Lincoln Fields"]
/// });
///
/// let resource = from_value(&value, "en-CA").unwrap();
/// assert_eq!(resource.get("menu.open"), Some("Open"));
/// assert_eq!(resource.get("stops[1]"), Some("Lincoln Fields"));
/// ```
pub fn from_value(value: &Value, locale: &str) -> Result<Resource> {
    if !matches!(value, Value::Object(_) | Value::Array(_)) {
        return Err(I18nError::invalid_argument(format!(
            "Resource data for {locale} must be a JSON object"
        )));
    }
    Resource::new(locale, flatten_json(value, KEY_SEPARATOR, None))
}

/// Builds a resource from JSON text.
pub fn from_json_str(input: &str, locale: &str) -> Result<Resource> {
    let value: Value = serde_json::from_str(input)?;
    from_value(&value, locale)
}

/// Builds a resource from a JSON file.
pub fn from_file(path: &Path, locale: &str) -> Result<Resource> {
    let contents = read_file(path)?;
    from_json_str(&contents, locale)
}

/// Reads a resource file, distinguishing a missing file from a failed read.
pub(crate) fn read_file(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(I18nError::InvalidResource(path.to_path_buf()));
    }
    tracing::debug!("Reading resource file: {:?}", path);
    std::fs::read_to_string(path)
        .map_err(|source| I18nError::Io { path: path.to_path_buf(), source })
}

/// Flattens nested JSON into translation keys.
///
/// Object members are joined with `separator` and list items get a `[n]`
/// suffix. Numbers and booleans are kept as their JSON text; `null` leaves
/// the key out so lookups treat it as missing.
#[must_use]
pub fn flatten_json(json: &Value, separator: &str, prefix: Option<&str>) -> ResourceData {
    let mut data = ResourceData::new();
    let mut pending = vec![(prefix.map(str::to_string), json)];

    while let Some((path, node)) = pending.pop() {
        match node {
            Value::Object(members) => pending.extend(members.iter().rev().map(|(name, child)| {
                let key = match &path {
                    Some(parent) => format!("{parent}{separator}{name}"),
                    None => name.clone(),
                };
                (Some(key), child)
            })),
            Value::Array(items) => pending.extend(items.iter().enumerate().rev().map(|(n, child)| {
                (Some(format!("{}[{n}]", path.as_deref().unwrap_or_default())), child)
            })),
            Value::Null => {}
            Value::String(text) => {
                if let Some(key) = path {
                    data.insert(key, text.clone());
                }
            }
            Value::Bool(_) | Value::Number(_) => {
                if let Some(key) = path {
                    data.insert(key, node.to_string());
                }
            }
        }
    }
    data
}
