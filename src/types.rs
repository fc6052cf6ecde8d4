//! Argument types for formatted lookups.

use std::fmt;

use serde_json::Value;

use crate::error::I18nError;

/// A single scalar substituted into a printf-style template.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatArg {
    /// Text, also read as a number by numeric conversions
    Str(String),
    /// Integer
    Int(i64),
    /// Floating point number
    Float(f64),
}

impl fmt::Display for FormatArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
        }
    }
}

impl From<&str> for FormatArg {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for FormatArg {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for FormatArg {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for FormatArg {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for FormatArg {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for FormatArg {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl TryFrom<&Value> for FormatArg {
    type Error = I18nError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(Self::Str(s.clone())),
            Value::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .or_else(|| n.as_f64().map(Self::Float))
                .ok_or_else(|| I18nError::invalid_argument(format!("Unsupported number: {n}"))),
            _ => Err(invalid_strings()),
        }
    }
}

/// Arguments of a formatted lookup.
///
/// `None` substitutes an empty string into the first placeholder, `One` a
/// single scalar, and `Many` fills placeholders positionally.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FormatArgs {
    /// No value
    #[default]
    None,
    /// A single value
    One(FormatArg),
    /// Values in placeholder order
    Many(Vec<FormatArg>),
}

impl FormatArgs {
    /// Arguments in substitution order.
    #[must_use]
    pub fn into_vec(self) -> Vec<FormatArg> {
        match self {
            Self::None => vec![FormatArg::Str(String::new())],
            Self::One(arg) => vec![arg],
            Self::Many(args) => args,
        }
    }
}

impl From<FormatArg> for FormatArgs {
    fn from(value: FormatArg) -> Self {
        Self::One(value)
    }
}

impl From<Option<FormatArg>> for FormatArgs {
    fn from(value: Option<FormatArg>) -> Self {
        value.map_or(Self::None, Self::One)
    }
}

/// `From<$ty> for FormatArgs` through `FormatArg`.
macro_rules! impl_single_format_args {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FormatArgs {
                fn from(value: $ty) -> Self {
                    Self::One(value.into())
                }
            }
        )*
    };
}

impl_single_format_args!(&str, String, i64, i32, u32, f64);

impl From<Vec<FormatArg>> for FormatArgs {
    fn from(value: Vec<FormatArg>) -> Self {
        Self::Many(value)
    }
}

impl TryFrom<&Value> for FormatArgs {
    type Error = I18nError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Null => Ok(Self::None),
            Value::String(_) | Value::Number(_) => FormatArg::try_from(value).map(Self::One),
            Value::Array(items) => {
                items.iter().map(FormatArg::try_from).collect::<Result<_, _>>().map(Self::Many)
            }
            Value::Bool(_) | Value::Object(_) => Err(invalid_strings()),
        }
    }
}

/// Error for argument shapes that cannot be substituted.
fn invalid_strings() -> I18nError {
    I18nError::invalid_argument(
        "Strings must be a string or array to return a formatted localized string.",
    )
}
