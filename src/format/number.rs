//! Locale-configured number formatting
//!
//! A number formatter resource declares, per locale, the separators and
//! currency symbol to use (`@symbols`) and any named formatters:
//!
//! ```json
//! {
//!   "formatters": {
//!     "fr-CA": {
//!       "@symbols": { "decimalSeparator": ",", "groupSeparator": " ", "currencySymbol": "$", "currencyAfter": true },
//!       "fare": { "style": "currency", "fractionDigits": 2 }
//!     }
//!   }
//! }
//! ```
//!
//! Every declared locale also gets the built-in `decimal`, `percent`,
//! `scientific` and `currency` formatters.

use std::collections::BTreeMap;

use serde::{
    Deserialize,
    Serialize,
};
use serde_json::Value;

use super::registry::{
    FormatterRegistry,
    LocaleFormatter,
};
use crate::error::{
    I18nError,
    Result,
};

/// Reserved declaration key holding a locale's symbols.
const SYMBOLS_KEY: &str = "@symbols";

/// Fraction digits shown by `decimal` when none are configured.
const DEFAULT_MAX_FRACTION_DIGITS: usize = 3;

/// How a number is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberStyle {
    /// Grouped digits, up to three fraction digits unless configured
    Decimal,
    /// The value times 100 followed by the percent sign
    Percent,
    /// Mantissa and exponent (`1.2345E4`)
    Scientific,
    /// Amount with the currency symbol, two fraction digits unless configured
    Currency,
}

impl NumberStyle {
    /// Styles registered for every locale, under their lowercase name.
    const BUILT_IN: [(&'static str, Self); 4] = [
        ("decimal", Self::Decimal),
        ("percent", Self::Percent),
        ("scientific", Self::Scientific),
        ("currency", Self::Currency),
    ];
}

/// Separators and symbols of one locale.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NumberSymbols {
    /// Between the integer and fraction digits
    pub decimal_separator: String,
    /// Between groups of three integer digits
    pub group_separator: String,
    /// Symbol of the locale's currency
    pub currency_symbol: String,
    /// Place the currency symbol after the amount (`12,50 $`).
    pub currency_after: bool,
    /// Appended by the percent style
    pub percent_sign: String,
}

impl Default for NumberSymbols {
    fn default() -> Self {
        Self {
            decimal_separator: ".".to_string(),
            group_separator: ",".to_string(),
            currency_symbol: "$".to_string(),
            currency_after: false,
            percent_sign: "%".to_string(),
        }
    }
}

/// A named formatter declaration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NumberSpec {
    /// Rendering style
    style: NumberStyle,
    /// Fixed fraction digits
    #[serde(default)]
    fraction_digits: Option<usize>,
    /// Group separator on or off
    #[serde(default)]
    grouping: Option<bool>,
}

/// One number format of one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberFormatter {
    /// Rendering style
    style: NumberStyle,
    /// Locale separators and symbols
    symbols: NumberSymbols,
    /// Fixed fraction digits; `None` uses the style's default
    fraction_digits: Option<usize>,
    /// Whether integer digits are grouped
    grouping: bool,
}

impl NumberFormatter {
    /// Formatter of `style` with the style's default digits and grouping.
    #[must_use]
    pub fn new(style: NumberStyle, symbols: NumberSymbols) -> Self {
        Self { style, symbols, fraction_digits: None, grouping: style != NumberStyle::Scientific }
    }

    /// Fixes the number of fraction digits.
    #[must_use]
    pub fn with_fraction_digits(mut self, digits: usize) -> Self {
        self.fraction_digits = Some(digits);
        self
    }

    /// Rendering style.
    #[must_use]
    pub const fn style(&self) -> NumberStyle {
        self.style
    }

    /// Formats `value` as a currency amount labelled with `currency` instead
    /// of the locale's symbol.
    pub fn format_currency(&self, value: f64, currency: &str) -> Result<String> {
        let mut formatter = self.clone();
        formatter.style = NumberStyle::Currency;
        formatter.symbols.currency_symbol = currency.to_string();
        formatter.format(&value)
    }

    /// Absolute value with `digits` fraction digits, grouped per settings.
    fn fixed(&self, value: f64, digits: usize) -> String {
        let formatted = format!("{:.*}", digits, value.abs());
        let (integer, fraction) = formatted.split_once('.').unwrap_or((formatted.as_str(), ""));

        let mut out = if self.grouping {
            group_digits(integer, &self.symbols.group_separator)
        } else {
            integer.to_string()
        };
        if !fraction.is_empty() {
            out.push_str(&self.symbols.decimal_separator);
            out.push_str(fraction);
        }
        out
    }
}

impl LocaleFormatter for NumberFormatter {
    type Value = f64;

    fn build_locale(locale: &str, declarations: &Value) -> Result<BTreeMap<String, Self>> {
        let empty = serde_json::Map::new();
        let declarations = match declarations {
            Value::Object(map) => map,
            Value::Null => &empty,
            _ => {
                return Err(I18nError::invalid_argument(format!(
                    "Formatter declarations for {locale} must be an object"
                )));
            }
        };

        let symbols = declarations
            .get(SYMBOLS_KEY)
            .map(|v| NumberSymbols::deserialize(v))
            .transpose()
            .map_err(|e| I18nError::invalid_argument(format!("Invalid symbols for {locale}: {e}")))?
            .unwrap_or_default();

        let mut formatters: BTreeMap<String, Self> = NumberStyle::BUILT_IN
            .iter()
            .map(|(name, style)| ((*name).to_string(), Self::new(*style, symbols.clone())))
            .collect();

        for (name, declaration) in declarations.iter().filter(|(name, _)| *name != SYMBOLS_KEY) {
            let spec = NumberSpec::deserialize(declaration).map_err(|e| {
                I18nError::invalid_argument(format!("Invalid formatter {name} for {locale}: {e}"))
            })?;
            let mut formatter = Self::new(spec.style, symbols.clone());
            if let Some(digits) = spec.fraction_digits {
                formatter = formatter.with_fraction_digits(digits);
            }
            if let Some(grouping) = spec.grouping {
                formatter.grouping = grouping;
            }
            formatters.insert(name.clone(), formatter);
        }

        Ok(formatters)
    }

    #[allow(clippy::float_arithmetic)]
    fn format(&self, value: &f64) -> Result<String> {
        let value = *value;
        if !value.is_finite() {
            return Err(I18nError::invalid_argument(format!("Cannot format {value}")));
        }
        let body = match self.style {
            NumberStyle::Decimal => match self.fraction_digits {
                Some(digits) => self.fixed(value, digits),
                None => trim_fraction(
                    &self.fixed(value, DEFAULT_MAX_FRACTION_DIGITS),
                    &self.symbols.decimal_separator,
                ),
            },
            NumberStyle::Percent => {
                let amount = self.fixed(value * 100.0, self.fraction_digits.unwrap_or(0));
                format!("{amount}{}", self.symbols.percent_sign)
            }
            NumberStyle::Scientific => {
                let formatted = match self.fraction_digits {
                    Some(digits) => format!("{:.*E}", digits, value.abs()),
                    None => format!("{:E}", value.abs()),
                };
                formatted.replacen('.', &self.symbols.decimal_separator, 1)
            }
            NumberStyle::Currency => {
                let amount = self.fixed(value, self.fraction_digits.unwrap_or(2));
                let symbol = &self.symbols.currency_symbol;
                if self.symbols.currency_after {
                    format!("{amount}\u{a0}{symbol}")
                } else {
                    format!("{symbol}{amount}")
                }
            }
        };

        // No sign when the value rounds to zero.
        let negative = value < 0.0 && body.bytes().any(|b| matches!(b, b'1'..=b'9'));
        Ok(if negative { format!("-{body}") } else { body })
    }
}

/// Registry of number formatters.
pub type NumberFormat = FormatterRegistry<NumberFormatter>;

impl FormatterRegistry<NumberFormatter> {
    /// Formats `value` in `currency` using the locale's `currency` formatter.
    pub fn format_foreign_currency(
        &self,
        value: f64,
        currency: &str,
        locale: Option<&str>,
    ) -> Result<String> {
        self.get_formatter("currency", locale)?.format_currency(value, currency)
    }
}

/// Inserts `separator` between groups of three digits.
fn group_digits(integer: &str, separator: &str) -> String {
    let len = integer.chars().count();
    let mut out = String::with_capacity(integer.len() + len / 3 * separator.len());
    for (index, c) in integer.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(c);
    }
    out
}

/// Drops trailing fraction zeros (and the separator if nothing is left).
fn trim_fraction(formatted: &str, decimal_separator: &str) -> String {
    match formatted.rsplit_once(decimal_separator) {
        Some((integer, fraction)) => {
            let fraction = fraction.trim_end_matches('0');
            if fraction.is_empty() {
                integer.to_string()
            } else {
                format!("{integer}{decimal_separator}{fraction}")
            }
        }
        None => formatted.to_string(),
    }
}
