//! json-i18n
//!
//! Runtime translation resources loaded from JSON: per-locale string tables,
//! strict or lenient lookups, printf-style formatting and flattening of
//! locale-suffixed fields in nested records.
//!
//! # Examples
//! ```
//! use json_i18n::TranslationStore;
//!
//! let mut store = TranslationStore::new("en-CA").unwrap();
//! store
//!     .add_resource_str(r#"{"en-CA": {"numBuses": "Transfer %d time(s)."}}"#, "json")
//!     .unwrap();
//!
//! assert_eq!(store.translate_formatted("numBuses", 2_i64, None).unwrap(), "Transfer 2 time(s).");
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod resource;
pub mod translate;
pub mod types;

pub use config::Settings;
pub use error::{
    I18nError,
    Result,
};
pub use resource::Resource;
pub use translate::{
    ResourceInput,
    ResourcePayload,
    Subresource,
    TranslationStore,
};
pub use types::{
    FormatArg,
    FormatArgs,
};
