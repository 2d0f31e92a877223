//! Per-column conversion of raw values into display strings.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::trace;

use crate::error::TableError;
use crate::value::Value;

/// Magnitude above which `Auto` switches to scientific notation.
const AUTO_EXPONENT_THRESHOLD: f64 = 1e8;

/// Signature of a caller-supplied cell formatter.
///
/// Receives the raw value and the table's precision. Returning `None`
/// makes the cell fall back to plain text.
pub type CustomFormatter = dyn Fn(&Value, usize) -> Option<String> + Send + Sync;

/// How the values of a column are turned into text.
#[derive(Clone, Default)]
pub enum ColumnType {
    /// The value's own string form, verbatim.
    Text,
    /// Rounded to the nearest integer (ties to even).
    Integer,
    /// Like `Integer`, with `,` between groups of thousands.
    IntegerGrouped,
    /// Fixed point with the table's precision.
    Fixed,
    /// Scientific notation with the table's precision, e.g. `1.230e+00`.
    Exponential,
    /// Picks one of the numeric formats based on the value, or text when
    /// the value is not numeric.
    #[default]
    Auto,
    /// A caller-supplied formatter.
    Custom(Arc<CustomFormatter>),
}

impl ColumnType {
    /// Wraps a closure as a custom column formatter.
    ///
    /// ```
    /// use tabby::{ColumnType, Value};
    ///
    /// let percent = ColumnType::custom(|v: &Value, p: usize| {
    ///     v.to_f64().map(|f| format!("{:.*}%", p, f * 100.0))
    /// });
    /// assert_eq!(tabby::format::format_cell(&percent, &Value::from(0.5), 1), "50.0%");
    /// ```
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&Value, usize) -> Option<String> + Send + Sync + 'static,
    {
        ColumnType::Custom(Arc::new(f))
    }

    /// The short code used in configuration files, if the type has one.
    pub fn code(&self) -> Option<char> {
        match self {
            ColumnType::Text => Some('t'),
            ColumnType::Integer => Some('i'),
            ColumnType::IntegerGrouped => Some('I'),
            ColumnType::Fixed => Some('f'),
            ColumnType::Exponential => Some('e'),
            ColumnType::Auto => Some('a'),
            ColumnType::Custom(_) => None,
        }
    }
}

impl fmt::Debug for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Custom(_) => f.write_str("Custom(..)"),
            other => write!(f, "{other}"),
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Text => "text",
            ColumnType::Integer => "integer",
            ColumnType::IntegerGrouped => "integer_grouped",
            ColumnType::Fixed => "fixed",
            ColumnType::Exponential => "exponential",
            ColumnType::Auto => "auto",
            ColumnType::Custom(_) => "custom",
        };
        f.write_str(name)
    }
}

impl FromStr for ColumnType {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Short codes are case sensitive: `i` and `I` differ.
        match s.trim() {
            "t" => return Ok(ColumnType::Text),
            "i" => return Ok(ColumnType::Integer),
            "I" => return Ok(ColumnType::IntegerGrouped),
            "f" => return Ok(ColumnType::Fixed),
            "e" => return Ok(ColumnType::Exponential),
            "a" => return Ok(ColumnType::Auto),
            _ => {}
        }
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "text" => Ok(ColumnType::Text),
            "integer" | "int" => Ok(ColumnType::Integer),
            "integer_grouped" | "grouped" => Ok(ColumnType::IntegerGrouped),
            "fixed" | "float" => Ok(ColumnType::Fixed),
            "exponential" | "exp" => Ok(ColumnType::Exponential),
            "auto" => Ok(ColumnType::Auto),
            _ => Err(TableError::InvalidConfig(format!(
                "unknown column type '{s}' (expected one of t, i, I, f, e, a)"
            ))),
        }
    }
}

impl Serialize for ColumnType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ColumnType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Signals that a numeric policy could not coerce a value.
///
/// Never leaves this module: [`format_cell`] turns it into text output.
#[derive(Debug)]
struct FormatFallback;

type Formatted = Result<String, FormatFallback>;

/// Formats `value` for display under `column_type`.
///
/// Numeric policies that cannot coerce the value fall back to the text
/// policy for this cell; this function never fails.
///
/// ## Examples
///
/// ```
/// use tabby::{ColumnType, Value, format::format_cell};
///
/// assert_eq!(format_cell(&ColumnType::Auto, &Value::from(543), 3), "543");
/// assert_eq!(format_cell(&ColumnType::Auto, &Value::from(23.45), 3), "23.450");
/// assert_eq!(format_cell(&ColumnType::Exponential, &Value::from(1.23), 3), "1.230e+00");
/// assert_eq!(format_cell(&ColumnType::Integer, &Value::from("n/a"), 3), "n/a");
/// ```
pub fn format_cell(column_type: &ColumnType, value: &Value, precision: usize) -> String {
    let formatted = match column_type {
        ColumnType::Text => Ok(fmt_text(value)),
        ColumnType::Integer => fmt_int(value),
        ColumnType::IntegerGrouped => fmt_int_grouped(value),
        ColumnType::Fixed => fmt_fixed(value, precision),
        ColumnType::Exponential => fmt_exp(value, precision),
        ColumnType::Auto => fmt_auto(value, precision),
        ColumnType::Custom(f) => f(value, precision).ok_or(FormatFallback),
    };

    formatted.unwrap_or_else(|FormatFallback| {
        trace!(%column_type, ?value, "falling back to text formatting");
        fmt_text(value)
    })
}

fn to_float(value: &Value) -> Result<f64, FormatFallback> {
    value.to_f64().ok_or(FormatFallback)
}

fn fmt_text(value: &Value) -> String {
    value.to_string()
}

fn rounded_integer(value: &Value) -> Result<String, FormatFallback> {
    let f = to_float(value)?;
    if !f.is_finite() {
        return Err(FormatFallback);
    }
    let rounded = f.round_ties_even();
    // Avoid printing "-0" for values that round to zero from below.
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    Ok(format!("{rounded:.0}"))
}

fn fmt_int(value: &Value) -> Formatted {
    rounded_integer(value)
}

fn fmt_int_grouped(value: &Value) -> Formatted {
    rounded_integer(value).map(|digits| group_thousands(&digits))
}

fn group_thousands(digits: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push_str(sign);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn fmt_fixed(value: &Value, precision: usize) -> Formatted {
    let f = to_float(value)?;
    Ok(format!("{f:.precision$}"))
}

fn fmt_exp(value: &Value, precision: usize) -> Formatted {
    let f = to_float(value)?;
    let raw = format!("{f:.precision$e}");

    // Rust prints `1.230e0`; tables show the C-style `1.230e+00`.
    let Some((mantissa, exponent)) = raw.split_once('e') else {
        return Ok(raw);
    };
    let exponent: i32 = exponent.parse().map_err(|_| FormatFallback)?;
    let sign = if exponent < 0 { '-' } else { '+' };
    Ok(format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs()))
}

fn fmt_auto(value: &Value, precision: usize) -> Formatted {
    let f = to_float(value)?;
    if f.abs() > AUTO_EXPONENT_THRESHOLD {
        fmt_exp(value, precision)
    } else if f.is_nan() {
        Ok(fmt_text(value))
    } else if f.fract() == 0.0 {
        fmt_int(value)
    } else {
        fmt_fixed(value, precision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(column_type: ColumnType, value: impl Into<Value>) -> String {
        format_cell(&column_type, &value.into(), 3)
    }

    #[test]
    fn test_auto_picks_integer_fixed_and_exponential() {
        assert_eq!(fmt(ColumnType::Auto, 543), "543");
        assert_eq!(fmt(ColumnType::Auto, 23.45), "23.450");
        assert_eq!(fmt(ColumnType::Auto, 5.0), "5");
        assert_eq!(fmt(ColumnType::Auto, 123456789.0), "1.235e+08");
        assert_eq!(fmt(ColumnType::Auto, "17"), "17");
    }

    #[test]
    fn test_auto_falls_back_to_text() {
        assert_eq!(fmt(ColumnType::Auto, "hello"), "hello");
        assert_eq!(fmt(ColumnType::Auto, "nan"), "nan");
        assert_eq!(format_cell(&ColumnType::Auto, &Value::Null, 3), "");
    }

    #[test]
    fn test_integer_rounds_half_to_even() {
        assert_eq!(fmt(ColumnType::Integer, 2.5), "2");
        assert_eq!(fmt(ColumnType::Integer, 3.5), "4");
        assert_eq!(fmt(ColumnType::Integer, -0.4), "0");
        assert_eq!(fmt(ColumnType::Integer, "12.7"), "13");
    }

    #[test]
    fn test_integer_grouped() {
        assert_eq!(fmt(ColumnType::IntegerGrouped, 1234567), "1,234,567");
        assert_eq!(fmt(ColumnType::IntegerGrouped, -1234.4), "-1,234");
        assert_eq!(fmt(ColumnType::IntegerGrouped, 999), "999");
        assert_eq!(fmt(ColumnType::IntegerGrouped, 100000), "100,000");
    }

    #[test]
    fn test_fixed_uses_precision() {
        assert_eq!(fmt(ColumnType::Fixed, 1), "1.000");
        assert_eq!(format_cell(&ColumnType::Fixed, &Value::from(3.14159), 2), "3.14");
        assert_eq!(format_cell(&ColumnType::Fixed, &Value::from(2.7), 0), "3");
    }

    #[test]
    fn test_exponential_format() {
        assert_eq!(fmt(ColumnType::Exponential, 1.23), "1.230e+00");
        assert_eq!(fmt(ColumnType::Exponential, 0.00012), "1.200e-04");
        assert_eq!(fmt(ColumnType::Exponential, -6.02e23), "-6.020e+23");
        assert_eq!(fmt(ColumnType::Exponential, 1e100), "1.000e+100");
    }

    #[test]
    fn test_numeric_policies_fall_back_to_text() {
        for column_type in [
            ColumnType::Integer,
            ColumnType::IntegerGrouped,
            ColumnType::Fixed,
            ColumnType::Exponential,
        ] {
            assert_eq!(fmt(column_type, "n/a"), "n/a");
        }
        assert_eq!(fmt(ColumnType::Integer, f64::INFINITY), "inf");
    }

    #[test]
    fn test_text_is_verbatim() {
        assert_eq!(fmt(ColumnType::Text, " 12.50 "), " 12.50 ");
        assert_eq!(fmt(ColumnType::Text, 7), "7");
    }

    #[test]
    fn test_custom_formatter_receives_precision() {
        let money = ColumnType::custom(|v: &Value, p: usize| v.to_f64().map(|f| format!("${f:.p$}")));
        assert_eq!(format_cell(&money, &Value::from(3), 2), "$3.00");
        assert_eq!(format_cell(&money, &Value::from("free"), 2), "free");
    }

    #[test]
    fn test_parse_codes_and_names() {
        assert!(matches!("I".parse::<ColumnType>(), Ok(ColumnType::IntegerGrouped)));
        assert!(matches!("i".parse::<ColumnType>(), Ok(ColumnType::Integer)));
        assert!(matches!("Exponential".parse::<ColumnType>(), Ok(ColumnType::Exponential)));
        assert!(matches!("integer-grouped".parse::<ColumnType>(), Ok(ColumnType::IntegerGrouped)));
        assert!(matches!("x".parse::<ColumnType>(), Err(TableError::InvalidConfig(_))));
    }

    #[test]
    fn test_serde_uses_names() {
        let types: Vec<ColumnType> = serde_json::from_str(r#"["a", "fixed", "I"]"#).unwrap();
        assert_eq!(types[1].to_string(), "fixed");
        assert_eq!(serde_json::to_string(&types).unwrap(), r#"["auto","fixed","integer_grouped"]"#);
    }
}
