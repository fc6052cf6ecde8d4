//! Store settings and their validation

use std::path::PathBuf;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

/// One rejected setting.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid setting '{setting}': {message}")]
pub struct ValidationError {
    /// Name of the offending setting, `a/b` when two settings conflict
    pub setting: String,
    /// What is wrong with it
    pub message: String,
}

impl ValidationError {
    /// Rejects `setting` with `message`.
    #[must_use]
    pub fn new(setting: impl Into<String>, message: impl Into<String>) -> Self {
        Self { setting: setting.into(), message: message.into() }
    }
}

/// Errors from loading a settings file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file exists but could not be read
    #[error("Settings file {} could not be read: {source}", path.display())]
    Read {
        /// Path of the settings file
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// The file is not a JSON settings object
    #[error("Settings are not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The file parsed but one or more settings were rejected
    #[error("Settings rejected:{}", list_rejections(.0))]
    Invalid(Vec<ValidationError>),
}

/// Renders each rejection on its own indented line.
fn list_rejections(errors: &[ValidationError]) -> String {
    errors.iter().map(|err| format!("\n  - {err}")).collect()
}

/// Lookup policy of a translation store.
///
/// Both fields are optional so that a settings file naming only one of them is
/// read as written. With neither given the store is strict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Missing keys are errors when `true`; when `false` the key itself is returned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,

    /// Older name for the lenient policy: `fallbackWithKey: true` means `strict: false`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_with_key: Option<bool>,
}

impl Settings {
    /// Lenient settings: missing keys fall back to the key.
    #[must_use]
    pub const fn lenient() -> Self {
        Self { strict: Some(false), fallback_with_key: None }
    }

    /// Effective strictness once the legacy alias is taken into account.
    #[must_use]
    pub const fn is_strict(&self) -> bool {
        match (self.strict, self.fallback_with_key) {
            (Some(strict), _) => strict,
            (None, Some(fallback)) => !fallback,
            (None, None) => true,
        }
    }

    /// Checks that the given settings agree with each other.
    ///
    /// # Errors
    /// - `strict` and `fallbackWithKey` are both given and disagree
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let (Some(strict), Some(fallback)) = (self.strict, self.fallback_with_key)
            && strict == fallback
        {
            errors.push(ValidationError::new(
                "strict/fallbackWithKey",
                "'fallbackWithKey' contradicts 'strict'. Please use only 'strict'",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    /// default: strict with nothing set
    #[googletest::test]
    fn test_default_is_strict() {
        let settings = Settings::default();

        expect_that!(settings.strict, none());
        expect_that!(settings.is_strict(), eq(true));
        assert!(settings.validate().is_ok());
    }

    /// deserialize: either name alone selects the policy
    #[rstest]
    #[case::empty("{}", true)]
    #[case::lenient(r#"{"strict": false}"#, false)]
    #[case::strict(r#"{"strict": true}"#, true)]
    #[case::legacy_fallback_alone(r#"{"fallbackWithKey": true}"#, false)]
    #[case::legacy_no_fallback(r#"{"fallbackWithKey": false}"#, true)]
    #[case::both_agree(r#"{"strict": false, "fallbackWithKey": true}"#, false)]
    fn test_deserialize(#[case] json: &str, #[case] strict: bool) {
        let settings: Settings = serde_json::from_str(json).unwrap();

        assert_eq!(settings.is_strict(), strict);
        assert!(settings.validate().is_ok());
    }

    /// validate: both names given and in conflict
    #[rstest]
    #[case::strict_with_fallback(r#"{"strict": true, "fallbackWithKey": true}"#)]
    #[case::lenient_without_fallback(r#"{"strict": false, "fallbackWithKey": false}"#)]
    fn test_validate_contradicting_alias(#[case] json: &str) {
        let settings: Settings = serde_json::from_str(json).unwrap();

        let errors = settings.validate().unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().map(|e| e.setting.as_str()), Some("strict/fallbackWithKey"));
    }

    /// serialize: only the names that were set
    #[googletest::test]
    fn test_serialize_skips_unset() {
        let legacy = Settings { strict: None, fallback_with_key: Some(true) };

        expect_that!(serde_json::to_string(&legacy).unwrap(), eq(r#"{"fallbackWithKey":true}"#));
        expect_that!(
            serde_json::to_string(&Settings::lenient()).unwrap(),
            eq(r#"{"strict":false}"#)
        );
        expect_that!(serde_json::to_string(&Settings::default()).unwrap(), eq("{}"));
    }

    /// `ConfigError::Invalid`: one line per rejection
    #[rstest]
    fn test_invalid_settings_display() {
        let err = ConfigError::Invalid(vec![ValidationError::new("strict", "bad")]);

        assert_eq!(err.to_string(), "Settings rejected:\n  - Invalid setting 'strict': bad");
    }
}
