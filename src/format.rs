//! Template substitution and the number/date formatter collaborators
/// Date formatters
mod date;
/// Number formatters
mod number;
/// `%`-style substitution
mod printf;
/// Locale → named formatter registry
mod registry;

pub use date::{
    Calendar,
    DateFormat,
    DateFormatter,
    DateInput,
};
pub use number::{
    NumberFormat,
    NumberFormatter,
    NumberStyle,
    NumberSymbols,
};
pub use printf::{
    MAX_FLOAT_PRECISION,
    MAX_WIDTH,
    sprintf,
};
pub use registry::{
    FormatterRegistry,
    LocaleFormatter,
};
