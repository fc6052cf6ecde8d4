//! Resource containers and the builders that produce them
/// Construction from maps, JSON and files
mod builder;
/// Per-locale string table
mod container;

pub(crate) use builder::read_file;
pub use builder::{
    KEY_SEPARATOR,
    flatten_json,
    from_file,
    from_json_str,
    from_map,
    from_value,
};
pub use container::{
    Resource,
    ResourceData,
};
