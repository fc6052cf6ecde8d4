//! `%`-style template substitution
//!
//! Directives follow `%[argnum$][flags][width][.precision]conversion`:
//!
//! - flags: `-` (left-justify), `+` (always print a sign), `0` or space
//!   (padding character), `'c` (pad with `c`)
//! - conversions: `s d u f F e E x X o b c %`
//!
//! Strings substituted into numeric conversions contribute their leading
//! numeric prefix, so an empty string renders as `0`. Float precision is
//! capped at [`MAX_FLOAT_PRECISION`] digits and widths above [`MAX_WIDTH`]
//! are rejected.

use crate::error::{
    I18nError,
    Result,
};
use crate::types::FormatArg;

/// Most fraction digits a float conversion renders.
pub const MAX_FLOAT_PRECISION: usize = 53;

/// Widest field a directive may request.
pub const MAX_WIDTH: usize = 4096;

/// A parsed conversion directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Directive {
    /// Explicit 1-based argument position (`%2$s`)
    argnum: Option<usize>,
    /// `-`: pad on the right
    left_align: bool,
    /// `+`: print a sign for positive numbers too
    plus: bool,
    /// Padding character
    pad: char,
    /// Minimum field width
    width: usize,
    /// Fraction digits for floats, maximum length for strings
    precision: Option<usize>,
    /// Conversion character
    conversion: char,
}

/// Character cursor over a template.
struct Cursor<'a> {
    /// Template characters
    chars: &'a [char],
    /// Index of the next unread character
    pos: usize,
}

impl Cursor<'_> {
    /// Next character without consuming it.
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    /// Character `offset` places ahead of the cursor.
    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    /// Consumes one character.
    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    /// Consumes a decimal number, saturating on overflow.
    fn digits(&mut self) -> Option<usize> {
        let mut value: Option<usize> = None;
        while let Some(d) = self.peek().and_then(|c| c.to_digit(10)) {
            value = Some(value.unwrap_or(0).saturating_mul(10).saturating_add(d as usize));
            self.pos += 1;
        }
        value
    }

    /// Number of consecutive digits starting at the cursor.
    fn digit_run(&self) -> usize {
        let mut offset = 0;
        while self.peek_at(offset).is_some_and(|c| c.is_ascii_digit()) {
            offset += 1;
        }
        offset
    }
}

/// Substitutes `args` into `template`.
///
/// Surplus arguments are ignored.
///
/// # Errors
/// [`I18nError::Format`] when the template references more arguments than
/// given, uses argument position 0, asks for a width above [`MAX_WIDTH`] or
/// contains an unknown conversion.
///
/// # Examples
/// ```
/// use json_i18n::format::sprintf;
/// use json_i18n::FormatArg;
///
/// let text = sprintf("Board the %d at %s.", &[FormatArg::Int(95), "Campus".into()]).unwrap();
/// assert_eq!(text, "Board the 95 at Campus.");
/// ```
pub fn sprintf(template: &str, args: &[FormatArg]) -> Result<String> {
    let chars: Vec<char> = template.chars().collect();
    let mut cursor = Cursor { chars: &chars, pos: 0 };
    let mut output = String::with_capacity(template.len());
    let mut next_arg = 0;

    while let Some(c) = cursor.bump() {
        if c != '%' {
            output.push(c);
            continue;
        }
        if cursor.peek() == Some('%') {
            cursor.bump();
            output.push('%');
            continue;
        }

        let directive = parse_directive(&mut cursor)?;
        if directive.conversion == '%' {
            output.push('%');
            continue;
        }

        let index = match directive.argnum {
            Some(argnum) => argnum - 1,
            None => {
                next_arg += 1;
                next_arg - 1
            }
        };
        let arg = args.get(index).ok_or_else(|| {
            I18nError::Format(format!("{} arguments are required, {} given", index + 1, args.len()))
        })?;

        render(&directive, arg, &mut output)?;
    }

    Ok(output)
}

/// Reads the directive following a `%`.
fn parse_directive(cursor: &mut Cursor<'_>) -> Result<Directive> {
    let mut directive = Directive {
        argnum: None,
        left_align: false,
        plus: false,
        pad: ' ',
        width: 0,
        precision: None,
        conversion: 's',
    };

    let run = cursor.digit_run();
    if run > 0 && cursor.peek_at(run) == Some('$') {
        let argnum = cursor.digits().unwrap_or(0);
        cursor.bump();
        if argnum == 0 {
            return Err(I18nError::Format("Argument number must be greater than zero".into()));
        }
        directive.argnum = Some(argnum);
    }

    loop {
        match cursor.peek() {
            Some('-') => directive.left_align = true,
            Some('+') => directive.plus = true,
            Some('0') => directive.pad = '0',
            Some(' ') => directive.pad = ' ',
            Some('\'') => {
                cursor.bump();
                directive.pad = cursor
                    .peek()
                    .ok_or_else(|| I18nError::Format("Missing padding character".into()))?;
            }
            _ => break,
        }
        cursor.bump();
    }

    directive.width = cursor.digits().unwrap_or(0);
    if directive.width > MAX_WIDTH {
        return Err(I18nError::Format(format!(
            "Width must not exceed {MAX_WIDTH}, {} given",
            directive.width
        )));
    }

    if cursor.peek() == Some('.') {
        cursor.bump();
        directive.precision = Some(cursor.digits().unwrap_or(0));
    }

    directive.conversion = cursor
        .bump()
        .ok_or_else(|| I18nError::Format("Missing format specifier at end of string".into()))?;

    Ok(directive)
}

/// Appends one converted argument.
fn render(directive: &Directive, arg: &FormatArg, output: &mut String) -> Result<()> {
    let (sign, body) = match directive.conversion {
        's' => {
            let text = arg.to_string();
            let text = match directive.precision {
                Some(max) => text.chars().take(max).collect(),
                None => text,
            };
            pad(directive, "", &text, false, output);
            return Ok(());
        }
        'd' => {
            let value = to_int(arg);
            (sign_of(value < 0, directive.plus), value.unsigned_abs().to_string())
        }
        'u' => (String::new(), as_unsigned(to_int(arg)).to_string()),
        'f' | 'F' => {
            let value = to_float(arg);
            let precision = float_precision(directive);
            let sign = sign_of(value.is_sign_negative() && value != 0.0, directive.plus);
            (sign, format!("{:.*}", precision, value.abs()))
        }
        'e' | 'E' => {
            let value = to_float(arg);
            let precision = float_precision(directive);
            let body = exponent_notation(value.abs(), precision);
            let body = if directive.conversion == 'E' { body.to_uppercase() } else { body };
            (sign_of(value.is_sign_negative() && value != 0.0, directive.plus), body)
        }
        'x' => (String::new(), format!("{:x}", as_unsigned(to_int(arg)))),
        'X' => (String::new(), format!("{:X}", as_unsigned(to_int(arg)))),
        'o' => (String::new(), format!("{:o}", as_unsigned(to_int(arg)))),
        'b' => (String::new(), format!("{:b}", as_unsigned(to_int(arg)))),
        'c' => {
            let code = u32::try_from(to_int(arg)).ok().and_then(char::from_u32).ok_or_else(|| {
                I18nError::Format(format!("Invalid character code: {arg}"))
            })?;
            output.push(code);
            return Ok(());
        }
        other => return Err(I18nError::Format(format!("Unknown format specifier \"{other}\""))),
    };

    pad(directive, &sign, &body, true, output);
    Ok(())
}

/// Fraction digits of a float conversion: 6 by default, at most [`MAX_FLOAT_PRECISION`].
fn float_precision(directive: &Directive) -> usize {
    match directive.precision {
        None => 6,
        Some(requested) if requested > MAX_FLOAT_PRECISION => {
            tracing::debug!(
                requested,
                max = MAX_FLOAT_PRECISION,
                "Float precision truncated to the maximum"
            );
            MAX_FLOAT_PRECISION
        }
        Some(precision) => precision,
    }
}

/// Sign prefix of a number.
fn sign_of(negative: bool, plus: bool) -> String {
    if negative {
        "-".to_string()
    } else if plus {
        "+".to_string()
    } else {
        String::new()
    }
}

/// Writes `sign` + `body` padded to the directive's width.
///
/// Zero padding on numbers goes between the sign and the digits.
fn pad(directive: &Directive, sign: &str, body: &str, numeric: bool, output: &mut String) {
    let len = sign.chars().count() + body.chars().count();
    let fill = directive.width.saturating_sub(len);
    let padding = |c: char| std::iter::repeat_n(c, fill).collect::<String>();

    if directive.left_align {
        let c = if numeric && directive.pad == '0' { ' ' } else { directive.pad };
        output.push_str(sign);
        output.push_str(body);
        output.push_str(&padding(c));
    } else if numeric && directive.pad == '0' {
        output.push_str(sign);
        output.push_str(&padding('0'));
        output.push_str(body);
    } else {
        output.push_str(&padding(directive.pad));
        output.push_str(sign);
        output.push_str(body);
    }
}

/// `1.234560e+1` style: mantissa with `precision` digits and an unpadded signed exponent.
fn exponent_notation(value: f64, precision: usize) -> String {
    let formatted = format!("{:.*e}", precision, value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            if let Some(negative) = exponent.strip_prefix('-') {
                format!("{mantissa}e-{negative}")
            } else {
                format!("{mantissa}e+{exponent}")
            }
        }
        None => formatted,
    }
}

/// Two's complement reinterpretation, as `%u` and the radix conversions print it.
#[allow(clippy::cast_sign_loss)]
const fn as_unsigned(value: i64) -> u64 {
    value as u64
}

/// Integer value of an argument; floats are truncated.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn to_int(arg: &FormatArg) -> i64 {
    match arg {
        FormatArg::Int(i) => *i,
        FormatArg::Float(x) if x.is_finite() => x.trunc() as i64,
        FormatArg::Float(_) => 0,
        FormatArg::Str(s) => leading_int(s),
    }
}

/// Float value of an argument.
#[allow(clippy::cast_precision_loss)]
fn to_float(arg: &FormatArg) -> f64 {
    match arg {
        FormatArg::Int(i) => *i as f64,
        FormatArg::Float(x) => *x,
        FormatArg::Str(s) => leading_float(s),
    }
}

/// Integer value of the numeric prefix of `s` (`"12abc"` → 12, `""` → 0).
fn leading_int(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let magnitude = digits
        .chars()
        .map_while(|c| c.to_digit(10))
        .fold(0_i64, |acc, d| acc.saturating_mul(10).saturating_add(i64::from(d)));
    if negative { -magnitude } else { magnitude }
}

/// Float value of the longest numeric prefix of `s`.
fn leading_float(s: &str) -> f64 {
    let s = s.trim_start();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    let mut seen_exp = false;
    let bytes = s.as_bytes();

    while let Some(&b) = bytes.get(end) {
        match b {
            b'0'..=b'9' => seen_digit = true,
            b'+' | b'-' if end == 0 => {}
            b'+' | b'-' if seen_exp && matches!(bytes.get(end - 1), Some(b'e' | b'E')) => {}
            b'.' if !seen_dot && !seen_exp => seen_dot = true,
            b'e' | b'E' if seen_digit && !seen_exp => seen_exp = true,
            _ => break,
        }
        end += 1;
    }

    // Shrink until the prefix parses ("1e" → "1").
    (0..=end)
        .rev()
        .find_map(|len| s.get(..len).and_then(|prefix| prefix.parse::<f64>().ok()))
        .unwrap_or(0.0)
}
