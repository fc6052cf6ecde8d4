//! Settings file loader

use std::path::Path;

use super::{
    ConfigError,
    Settings,
};

/// Load settings from a JSON file.
///
/// # Returns
/// - `Ok(Some(settings))`: the file exists, parsed and validated
/// - `Ok(None)`: no file at `path`
/// - `Err(ConfigError)`: read, parse or validation failure
pub fn load_settings(path: &Path) -> Result<Option<Settings>, ConfigError> {
    if !path.exists() {
        tracing::debug!("Settings file not found: {:?}", path);
        return Ok(None);
    }

    tracing::debug!("Loading settings from: {:?}", path);

    let content = std::fs::read_to_string(path)
        .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
    let settings: Settings = serde_json::from_str(&content)?;
    settings.validate().map_err(ConfigError::Invalid)?;

    Ok(Some(settings))
}
