//! Depth-bounded flattening of locale-suffixed fields

use serde_json::{
    Map,
    Value,
};

use super::array_groups::ArrayGroupRegistry;
use crate::error::{
    I18nError,
    Result,
};

/// Rebuilds `node` with the fields of `group` collapsed into one `group` key.
///
/// `depth` is the number of container levels above the flat records: 0 for a
/// single record, 1 for a list of records, 2 for a map of lists of records.
/// The input is never modified.
pub(crate) fn localize(
    node: &Value,
    group: &str,
    depth: u64,
    locale: &str,
    registry: &ArrayGroupRegistry,
) -> Result<Value> {
    if depth == 0 {
        return flatten(node, group, locale, registry);
    }

    match node {
        Value::Array(children) => children
            .iter()
            .map(|child| localize_child(child, group, depth - 1, locale, registry))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        Value::Object(children) => children
            .iter()
            .map(|(key, child)| {
                Ok((key.clone(), localize_child(child, group, depth - 1, locale, registry)?))
            })
            .collect::<Result<Map<_, _>>>()
            .map(Value::Object),
        _ => Err(I18nError::StructureDepth),
    }
}

/// Recurses into a child that must itself be a container.
fn localize_child(
    child: &Value,
    group: &str,
    depth: u64,
    locale: &str,
    registry: &ArrayGroupRegistry,
) -> Result<Value> {
    if !matches!(child, Value::Array(_) | Value::Object(_)) {
        return Err(I18nError::StructureDepth);
    }
    localize(child, group, depth, locale, registry)
}

/// Promotes the locale's field to `group` and drops every field of the group.
fn flatten(
    node: &Value,
    group: &str,
    locale: &str,
    registry: &ArrayGroupRegistry,
) -> Result<Value> {
    let keep = registry.resolve(group, locale)?;
    let Some((source, kept)) = node.as_object().and_then(|record| Some((record, record.get(keep)?)))
    else {
        return Err(I18nError::InvalidIndex(keep.to_string()));
    };

    let mut record = source.clone();
    record.insert(group.to_string(), kept.clone());
    if let Some(fields) = registry.group(group) {
        for field in fields.values() {
            record.shift_remove(field);
        }
    }
    Ok(Value::Object(record))
}
