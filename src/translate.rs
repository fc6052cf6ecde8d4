//! Resource aggregation, lookup and deep-array localization
/// Array group registry
mod array_groups;
/// Depth-bounded field flattening
mod deep_array;
/// Resource input variants
mod payload;
/// Translation store
mod store;

pub use array_groups::{
    ArrayGroupRegistry,
    GroupFields,
};
pub use payload::{
    METADATA_KEY,
    Metadata,
    ResourceInput,
    ResourceKind,
    ResourcePayload,
    Subresource,
};
pub use store::TranslationStore;
