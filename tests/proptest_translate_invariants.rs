//! Property-based invariant tests for the translation store.
//!
//! 1. Merge: the last added value wins for overlapping keys, other keys survive
//! 2. Strict lookups either return the stored string or fail with a lookup error
//! 3. Lenient lookups of missing keys return the key for every loaded locale
//! 4. Flattening a record equals flattening it wrapped in a one-element list
//! 5. A null node localizes to null for any group and depth
//! 6. Array group declarations for disjoint locales accumulate

#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use std::collections::{
    BTreeMap,
    BTreeSet,
};

use json_i18n::translate::Metadata;
use json_i18n::{
    I18nError,
    ResourcePayload,
    Settings,
    TranslationStore,
};
use proptest::prelude::*;
use serde_json::{
    Value,
    json,
};

// ── Helpers ──────────────────────────────────────────────────────────

/// Lookup key
fn key() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z0-9_]{0,8}"
}

/// Flat string table
fn strings() -> impl Strategy<Value = BTreeMap<String, String>> {
    prop::collection::btree_map(key(), "[ -~]{0,16}", 0..8)
}

/// Locale, loaded or not
fn locale() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["en-CA", "fr-CA", "de-DE", "zh-CN"]).prop_map(str::to_string)
}

/// Store declaring the `headsign` group
fn headsign_store() -> TranslationStore {
    let mut store = TranslationStore::new("en-CA").unwrap();
    store
        .add_resource_str(
            r#"{"@metadata": {"arrayGroups": {"headsign": {"en-CA": "headsign_en", "fr-CA": "headsign_fr"}}}}"#,
            "json",
        )
        .unwrap();
    store
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Merge overwrite law
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    /// Later values win, earlier keys survive
    #[test]
    fn last_added_value_wins(first in strings(), second in strings(), locale in locale()) {
        let mut store = TranslationStore::new(locale.clone()).unwrap();
        store.add_resource(ResourcePayload::new().with_locale(locale.clone(), first.clone())).unwrap();
        store.add_resource(ResourcePayload::new().with_locale(locale.clone(), second.clone())).unwrap();

        for (key, value) in &second {
            prop_assert_eq!(store.translate(key, None).unwrap(), value.as_str());
        }
        for (key, value) in first.iter().filter(|(key, _)| !second.contains_key(*key)) {
            prop_assert_eq!(store.translate(key, None).unwrap(), value.as_str());
        }
        let resource = store.resource(&locale).unwrap();
        let expected_len = first.keys().chain(second.keys()).collect::<BTreeSet<_>>().len();
        prop_assert_eq!(resource.len(), expected_len);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Strict-mode totality
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    /// Strict lookups never fall back
    #[test]
    fn strict_lookup_returns_or_fails(data in strings(), probe in key(), locale in locale()) {
        let mut store = TranslationStore::new("en-CA").unwrap();
        store.add_resource(ResourcePayload::new().with_locale("en-CA", data.clone())).unwrap();

        match store.translate(&probe, Some(locale.as_str())) {
            Ok(text) => prop_assert_eq!(Some(text), data.get(&probe).map(String::as_str)),
            Err(I18nError::UnknownKey(missing)) => {
                prop_assert_eq!(locale.as_str(), "en-CA");
                prop_assert!(!data.contains_key(&missing));
            }
            Err(I18nError::UnknownLocale(missing)) => prop_assert_ne!(missing.as_str(), "en-CA"),
            Err(other) => prop_assert!(false, "unexpected error {:?}", other),
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Lenient fallback is the key itself
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    /// Lenient misses return the key
    #[test]
    fn lenient_lookup_echoes_missing_key(data in strings(), probe in key()) {
        prop_assume!(!data.contains_key(&probe));
        let mut store = TranslationStore::new("en-CA").unwrap();
        store.set_settings(Settings::lenient());
        store
            .add_resource(
                ResourcePayload::new().with_locale("en-CA", data.clone()).with_locale("fr-CA", data),
            )
            .unwrap();

        for locale in store.locales() {
            prop_assert_eq!(store.translate(&probe, Some(locale)).unwrap(), probe.as_str());
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Depth/shape duality
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    /// Depth 0 on a record equals depth 1 on `[record]`
    #[test]
    fn flattening_commutes_with_wrapping(
        en in "[ -~]{0,12}",
        fr in "[ -~]{0,12}",
        extra in strings(),
        french in any::<bool>(),
    ) {
        let store = headsign_store();
        let locale = if french { "fr-CA" } else { "en-CA" };
        let mut record: serde_json::Map<String, Value> =
            extra.into_iter().map(|(k, v)| (format!("x_{k}"), Value::String(v))).collect();
        record.insert("headsign_en".into(), json!(en));
        record.insert("headsign_fr".into(), json!(fr));
        let record = Value::Object(record);

        let direct = store.localize_deep_array(Some(&record), "headsign", 0, Some(locale)).unwrap();
        let wrapped = store
            .localize_deep_array(Some(&json!([record])), "headsign", 1, Some(locale))
            .unwrap();

        let unwrapped = wrapped.and_then(|list| list.as_array().and_then(|l| l.first()).cloned());
        prop_assert_eq!(direct.clone(), unwrapped);
        let expected = if french { fr } else { en };
        prop_assert_eq!(direct.unwrap().get("headsign").cloned(), Some(json!(expected)));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Null propagation
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    /// Null in, null out
    #[test]
    fn null_localizes_to_null(group in key(), depth in 0_i64..64) {
        let store = headsign_store();

        prop_assert_eq!(store.localize_deep_array(None, &group, depth, None).unwrap(), None);
        prop_assert_eq!(
            store.localize_deep_array(Some(&Value::Null), &group, depth, None).unwrap(),
            None
        );
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Array group metadata accumulates
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    /// Group locales union across resources
    #[test]
    fn disjoint_group_locales_accumulate(group in key(), first in key(), second in key()) {
        let metadata = |locale: &str, field: &str| Metadata {
            array_groups: BTreeMap::from([(
                group.clone(),
                BTreeMap::from([(locale.to_string(), field.to_string())]),
            )]),
        };
        let mut store = TranslationStore::new("en-CA").unwrap();

        store.add_resource(ResourcePayload::new().with_metadata(metadata("en-CA", &first))).unwrap();
        store.add_resource(ResourcePayload::new().with_metadata(metadata("fr-CA", &second))).unwrap();

        let groups = store.array_groups();
        prop_assert_eq!(groups.resolve(&group, "en-CA").unwrap(), first.as_str());
        prop_assert_eq!(groups.resolve(&group, "fr-CA").unwrap(), second.as_str());
        prop_assert_eq!(groups.len(), 1);
    }
}
