//! Error kinds raised by the translation store and its collaborators

use std::path::PathBuf;

use thiserror::Error;

/// Errors that may occur while loading resources or resolving translations
#[derive(Error, Debug)]
pub enum I18nError {
    /// Malformed caller input (bad resource kind, negative depth, wrong argument shape, empty locale)
    #[error("{0}")]
    InvalidArgument(String),

    /// A referenced resource path does not point at a file
    #[error("{} is not a file", .0.display())]
    InvalidResource(PathBuf),

    /// An existing resource file could not be read
    #[error("Error reading file at {}: {source}", path.display())]
    Io {
        /// Path of the file being read
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// JSON input failed to parse
    #[error("Failed to parse JSON: {0}")]
    MalformedInput(#[from] serde_json::Error),

    /// No data is registered for the requested locale
    #[error("Invalid language: {0}")]
    UnknownLocale(String),

    /// Strict lookup of a key that does not exist
    #[error("Invalid key: {0}")]
    UnknownKey(String),

    /// Flattening against an unregistered array group
    #[error("Invalid group: {0}")]
    UnknownGroup(String),

    /// The field registered for a group and locale is missing from the node
    #[error("Invalid array index: {0}")]
    InvalidIndex(String),

    /// The requested depth exceeds the actual nesting of the data
    #[error("Exceeded depth when localizing deep array")]
    StructureDepth,

    /// A printf-style template could not be applied to its arguments
    #[error("Invalid format: {0}")]
    Format(String),
}

impl I18nError {
    /// Shorthand for [`I18nError::InvalidArgument`].
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Parser category of a [`I18nError::MalformedInput`] error.
    #[must_use]
    pub fn json_category(&self) -> Option<serde_json::error::Category> {
        match self {
            Self::MalformedInput(err) => Some(err.classify()),
            _ => None,
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T, E = I18nError> = std::result::Result<T, E>;
