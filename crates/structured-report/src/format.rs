//! printf-style cell format strings.
//!
//! A [`FormatSpec`] is parsed once when a column is defined and applied to
//! every cell of that column. Only the subset needed for single-value cells
//! is supported:
//!
//! | Conversion | Accepts | Example |
//! |------------|---------|---------|
//! | `%s` | any scalar | `"%-10s"` |
//! | `%d` `%i` `%u` | integers, floats (truncated), integer strings | `"%05d"` |
//! | `%f` `%F` | numbers, numeric strings | `"$%.2f"` |
//! | `%e` `%E` `%g` `%G` | numbers, numeric strings | `"%.3e"` |
//! | `%x` `%X` `%o` | same as `%d` | `"%#x"` |
//!
//! Flags `-`, `+`, space, `0` and `#` are honored, as are width and
//! `.precision`. `%%` emits a literal percent sign.
//!
//! ```rust
//! use structured_report::format::FormatSpec;
//! use serde_json::json;
//!
//! let spec = FormatSpec::parse("$%.2f").unwrap();
//! assert_eq!(spec.apply(&json!("10")).unwrap(), "$10.00");
//! ```

use crate::error::FormatCause;
use serde_json::Value;
use std::fmt;

/// A parsed format string holding at most one value conversion.
#[derive(Clone, Debug, PartialEq)]
pub struct FormatSpec {
    source: String,
    pieces: Vec<Piece>,
}

#[derive(Clone, Debug, PartialEq)]
enum Piece {
    Literal(String),
    Conversion(Conversion),
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Flags {
    left: bool,
    plus: bool,
    space: bool,
    zero: bool,
    alt: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Conversion {
    flags: Flags,
    width: Option<usize>,
    precision: Option<usize>,
    kind: char,
}

impl FormatSpec {
    /// Parses a printf-style format string.
    pub fn parse(source: &str) -> Result<Self, FormatCause> {
        let mut pieces = Vec::new();
        let mut literal = String::new();
        let mut chars = source.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '%' {
                literal.push(c);
                continue;
            }
            if chars.peek() == Some(&'%') {
                chars.next();
                literal.push('%');
                continue;
            }

            let mut flags = Flags::default();
            while let Some(&f) = chars.peek() {
                match f {
                    '-' => flags.left = true,
                    '+' => flags.plus = true,
                    ' ' => flags.space = true,
                    '0' => flags.zero = true,
                    '#' => flags.alt = true,
                    _ => break,
                }
                chars.next();
            }

            let width = take_number(&mut chars)?;
            let precision = if chars.peek() == Some(&'.') {
                chars.next();
                Some(take_number(&mut chars)?.unwrap_or(0))
            } else {
                None
            };

            let kind = chars.next().ok_or(FormatCause::Incomplete)?;
            if !matches!(
                kind,
                's' | 'd' | 'i' | 'u' | 'f' | 'F' | 'e' | 'E' | 'g' | 'G' | 'x' | 'X' | 'o'
            ) {
                return Err(FormatCause::UnsupportedConversion(kind));
            }

            if !literal.is_empty() {
                pieces.push(Piece::Literal(std::mem::take(&mut literal)));
            }
            pieces.push(Piece::Conversion(Conversion {
                flags,
                width,
                precision,
                kind,
            }));
        }
        if !literal.is_empty() {
            pieces.push(Piece::Literal(literal));
        }

        let conversions = pieces
            .iter()
            .filter(|p| matches!(p, Piece::Conversion(_)))
            .count();
        if conversions > 1 {
            return Err(FormatCause::TooManyConversions(conversions));
        }

        Ok(FormatSpec {
            source: source.to_string(),
            pieces,
        })
    }

    /// The original format string.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Formats a single value.
    ///
    /// A format without any conversion ignores the value and returns its
    /// literal text.
    pub fn apply(&self, value: &Value) -> Result<String, FormatCause> {
        let mut out = String::new();
        for piece in &self.pieces {
            match piece {
                Piece::Literal(text) => out.push_str(text),
                Piece::Conversion(conv) => out.push_str(&conv.apply(value)?),
            }
        }
        Ok(out)
    }
}

impl fmt::Display for FormatSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn take_number(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
) -> Result<Option<usize>, FormatCause> {
    let mut digits = String::new();
    while let Some(&c) = chars.peek() {
        if !c.is_ascii_digit() {
            break;
        }
        digits.push(c);
        chars.next();
    }
    if digits.is_empty() {
        return Ok(None);
    }
    digits
        .parse()
        .map(Some)
        .map_err(|_| FormatCause::FieldTooLarge(digits))
}

impl Conversion {
    fn apply(&self, value: &Value) -> Result<String, FormatCause> {
        match self.kind {
            's' => {
                let text = scalar_text(value)?;
                let text = match self.precision {
                    Some(p) => text.chars().take(p).collect(),
                    None => text,
                };
                Ok(self.pad("", "", text, false))
            }
            'd' | 'i' | 'u' => {
                let n = to_integer(value)?;
                let mut digits = n.unsigned_abs().to_string();
                if let Some(p) = self.precision {
                    digits = zero_extend(digits, p);
                }
                Ok(self.pad(self.sign(n < 0), "", digits, self.precision.is_none()))
            }
            'x' | 'X' | 'o' => {
                let n = to_integer(value)?;
                let abs = n.unsigned_abs();
                let (mut digits, prefix) = match self.kind {
                    'x' => (format!("{:x}", abs), "0x"),
                    'X' => (format!("{:X}", abs), "0X"),
                    _ => (format!("{:o}", abs), "0"),
                };
                if let Some(p) = self.precision {
                    digits = zero_extend(digits, p);
                }
                let prefix = if self.flags.alt && abs != 0 { prefix } else { "" };
                Ok(self.pad(
                    self.sign(n < 0),
                    prefix,
                    digits,
                    self.precision.is_none(),
                ))
            }
            'f' | 'F' | 'e' | 'E' | 'g' | 'G' => {
                let x = to_float(value)?;
                let body = if x.is_nan() {
                    "NaN".to_string()
                } else if x.is_infinite() {
                    "Inf".to_string()
                } else {
                    let precision = self.precision.unwrap_or(6);
                    match self.kind {
                        'f' | 'F' => format!("{:.*}", precision, x.abs()),
                        'e' => exponent(x.abs(), precision, 'e'),
                        'E' => exponent(x.abs(), precision, 'E'),
                        'g' => general(x.abs(), precision, self.flags.alt, 'e'),
                        _ => general(x.abs(), precision, self.flags.alt, 'E'),
                    }
                };
                let negative = x.is_sign_negative() && !x.is_nan();
                Ok(self.pad(self.sign(negative), "", body, x.is_finite()))
            }
            other => Err(FormatCause::UnsupportedConversion(other)),
        }
    }

    fn sign(&self, negative: bool) -> &'static str {
        if negative {
            "-"
        } else if self.flags.plus {
            "+"
        } else if self.flags.space {
            " "
        } else {
            ""
        }
    }

    fn pad(&self, sign: &str, prefix: &str, body: String, zero_ok: bool) -> String {
        let len = sign.len() + prefix.len() + body.chars().count();
        let width = self.width.unwrap_or(0);
        if len >= width {
            return format!("{}{}{}", sign, prefix, body);
        }
        let fill = width - len;
        if self.flags.left {
            format!("{}{}{}{}", sign, prefix, body, " ".repeat(fill))
        } else if self.flags.zero && zero_ok {
            format!("{}{}{}{}", sign, prefix, "0".repeat(fill), body)
        } else {
            format!("{}{}{}{}", " ".repeat(fill), sign, prefix, body)
        }
    }
}

fn zero_extend(digits: String, precision: usize) -> String {
    if digits.len() >= precision {
        digits
    } else {
        format!("{}{}", "0".repeat(precision - digits.len()), digits)
    }
}

/// C-style scientific notation: `1.500000e+01`.
fn exponent(x: f64, precision: usize, marker: char) -> String {
    let rust = format!("{:.*e}", precision, x);
    let (mantissa, exp) = rust.split_once('e').unwrap_or((rust.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{}{}{}{:02}", mantissa, marker, sign, exp.abs())
}

/// C-style `%g`: the shorter of fixed and scientific, trailing zeros dropped.
fn general(x: f64, precision: usize, alt: bool, marker: char) -> String {
    let p = precision.max(1);
    let sci = format!("{:.*e}", p - 1, x);
    let exp: i32 = sci
        .split_once('e')
        .and_then(|(_, e)| e.parse().ok())
        .unwrap_or(0);

    let text = if exp >= -4 && (exp as i64) < p as i64 {
        let decimals = (p as i64 - 1 - exp as i64).max(0) as usize;
        format!("{:.*}", decimals, x)
    } else {
        exponent(x, p - 1, marker)
    };
    if alt {
        return text;
    }

    match text.find(marker) {
        Some(at) => {
            let (mantissa, rest) = text.split_at(at);
            format!("{}{}", strip_fraction_zeros(mantissa), rest)
        }
        None => strip_fraction_zeros(&text).to_string(),
    }
}

fn strip_fraction_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn scalar_text(value: &Value) -> Result<String, FormatCause> {
    match value {
        Value::Null => Ok(String::new()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::String(s) => Ok(s.clone()),
        other => Err(FormatCause::NotScalar(value_kind(other))),
    }
}

fn to_integer(value: &Value) -> Result<i128, FormatCause> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(i as i128)
            } else if let Some(u) = n.as_u64() {
                Ok(u as i128)
            } else {
                match n.as_f64().map(f64::trunc) {
                    Some(f) if (i128::MIN as f64..i128::MAX as f64).contains(&f) => {
                        Ok(f as i128)
                    }
                    _ => Err(FormatCause::NotAnInteger(n.to_string())),
                }
            }
        }
        Value::String(s) => s
            .trim()
            .parse::<i128>()
            .map_err(|_| FormatCause::NotAnInteger(s.clone())),
        other => Err(FormatCause::NotAnInteger(other.to_string())),
    }
}

fn to_float(value: &Value) -> Result<f64, FormatCause> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| FormatCause::NotAFloat(n.to_string())),
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(x) if x.is_finite() => Ok(x),
            _ => Err(FormatCause::NotAFloat(s.clone())),
        },
        other => Err(FormatCause::NotAFloat(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fmt(spec: &str, value: Value) -> String {
        FormatSpec::parse(spec).unwrap().apply(&value).unwrap()
    }

    #[test]
    fn test_string_conversion() {
        assert_eq!(fmt("%s", json!("1/1/2001")), "1/1/2001");
        assert_eq!(fmt("%s", json!(42)), "42");
        assert_eq!(fmt("%s", json!(true)), "true");
        assert_eq!(fmt("[%5s]", json!("ab")), "[   ab]");
        assert_eq!(fmt("[%-5s]", json!("ab")), "[ab   ]");
        assert_eq!(fmt("%.2s", json!("abcdef")), "ab");
    }

    #[test]
    fn test_integer_conversion() {
        assert_eq!(fmt("%d", json!("10")), "10");
        assert_eq!(fmt("%d", json!(10.9)), "10");
        assert_eq!(fmt("%d", json!(-3)), "-3");
        assert_eq!(fmt("%05d", json!(42)), "00042");
        assert_eq!(fmt("%+d", json!(42)), "+42");
        assert_eq!(fmt("% d", json!(42)), " 42");
        assert_eq!(fmt("%.3d", json!(7)), "007");
        assert_eq!(fmt("%-4d|", json!(7)), "7   |");
    }

    #[test]
    fn test_unsigned_64_bit_range() {
        assert_eq!(fmt("%d", json!(u64::MAX)), u64::MAX.to_string());
    }

    #[test]
    fn test_integer_out_of_range() {
        let spec = FormatSpec::parse("%d").unwrap();
        assert_eq!(
            spec.apply(&json!(1e300)),
            Err(FormatCause::NotAnInteger("1e300".to_string()))
        );
        assert!(matches!(
            spec.apply(&json!(-1e40)),
            Err(FormatCause::NotAnInteger(_))
        ));
        assert_eq!(fmt("%d", json!(1e20)), "100000000000000000000");
    }

    #[test]
    fn test_non_finite_text_is_not_a_float() {
        for text in ["nan", "inf", "-infinity", "NaN"] {
            for conv in ["%f", "%e", "%g"] {
                let spec = FormatSpec::parse(conv).unwrap();
                assert_eq!(
                    spec.apply(&json!(text)),
                    Err(FormatCause::NotAFloat(text.to_string()))
                );
            }
        }
    }

    #[test]
    fn test_float_conversion() {
        assert_eq!(fmt("%f", json!("10")), "10.000000");
        assert_eq!(fmt("$%.2f", json!("10")), "$10.00");
        assert_eq!(fmt("$%.2f", json!(5)), "$5.00");
        assert_eq!(fmt("%.1f", json!(-2.26)), "-2.3");
        assert_eq!(fmt("%08.2f", json!(-3.5)), "-0003.50");
        assert_eq!(fmt("%.0f", json!(2.6)), "3");
    }

    #[test]
    fn test_exponent_conversion() {
        assert_eq!(fmt("%e", json!(15)), "1.500000e+01");
        assert_eq!(fmt("%.2E", json!(0.00123)), "1.23E-03");
    }

    #[test]
    fn test_general_conversion() {
        assert_eq!(fmt("%g", json!(100)), "100");
        assert_eq!(fmt("%g", json!(0.5)), "0.5");
        assert_eq!(fmt("%g", json!(1234567)), "1.23457e+06");
        assert_eq!(fmt("%g", json!(0.00001)), "1e-05");
    }

    #[test]
    fn test_radix_conversion() {
        assert_eq!(fmt("%x", json!(255)), "ff");
        assert_eq!(fmt("%#X", json!(255)), "0XFF");
        assert_eq!(fmt("%o", json!(8)), "10");
    }

    #[test]
    fn test_literal_percent() {
        assert_eq!(fmt("%d%%", json!(50)), "50%");
        assert_eq!(fmt("n/a", json!(50)), "n/a");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(FormatSpec::parse("abc %"), Err(FormatCause::Incomplete));
        assert_eq!(
            FormatSpec::parse("%q"),
            Err(FormatCause::UnsupportedConversion('q'))
        );
        assert_eq!(
            FormatSpec::parse("%s-%s"),
            Err(FormatCause::TooManyConversions(2))
        );
    }

    #[test]
    fn test_oversized_width_and_precision() {
        let huge = "9".repeat(40);
        assert_eq!(
            FormatSpec::parse(&format!("%{}d", huge)),
            Err(FormatCause::FieldTooLarge(huge.clone()))
        );
        assert_eq!(
            FormatSpec::parse(&format!("%.{}f", huge)),
            Err(FormatCause::FieldTooLarge(huge))
        );
    }

    #[test]
    fn test_value_mismatch() {
        let spec = FormatSpec::parse("%d").unwrap();
        assert_eq!(
            spec.apply(&json!("ten")),
            Err(FormatCause::NotAnInteger("ten".to_string()))
        );

        let spec = FormatSpec::parse("%f").unwrap();
        assert!(matches!(
            spec.apply(&json!(true)),
            Err(FormatCause::NotAFloat(_))
        ));

        let spec = FormatSpec::parse("%s").unwrap();
        assert_eq!(
            spec.apply(&json!([1, 2])),
            Err(FormatCause::NotScalar("array"))
        );
    }

    #[test]
    fn test_display_round_trips_source() {
        let spec = FormatSpec::parse("$%.2f").unwrap();
        assert_eq!(spec.to_string(), "$%.2f");
        assert_eq!(spec.as_str(), "$%.2f");
    }
}
