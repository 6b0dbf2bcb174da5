//! Decoding of numeric arguments and encoding of numeric replies.
//!
//! Integers must be written in canonical base-10 form to be accepted. Floats accept the usual
//! decimal and exponent notation plus `inf`/`-inf`, but never NaN and never a literal that
//! silently overflowed to infinity or underflowed to zero.

use bytes::Bytes;

/// Decodes a canonical signed 64-bit integer: no sign prefix on positives, no leading zeros, no
/// surrounding whitespace.
pub fn parse_int(bytes: &[u8]) -> Option<i64> {
    let text = std::str::from_utf8(bytes).ok()?;
    let value: i64 = text.parse().ok()?;
    (value.to_string() == text).then_some(value)
}

/// Relaxations of the strict float grammar used by a few commands.
#[derive(Debug, Default, Clone, Copy)]
pub struct FloatRules {
    pub leading_whitespace: bool,
    pub empty_is_zero: bool,
    pub crop_at_nul: bool,
    pub allow_erange: bool,
}

impl FloatRules {
    /// How `SORT` reads weights: anything up to the first NUL, blanks allowed.
    pub const SORT: FloatRules = FloatRules {
        leading_whitespace: true,
        empty_is_zero: true,
        crop_at_nul: true,
        allow_erange: true,
    };

    /// How score range bounds are read.
    pub const BOUND: FloatRules = FloatRules {
        leading_whitespace: true,
        empty_is_zero: false,
        crop_at_nul: false,
        allow_erange: false,
    };
}

pub fn parse_float(bytes: &[u8]) -> Option<f64> {
    parse_float_with(bytes, FloatRules::default())
}

pub fn parse_float_with(bytes: &[u8], rules: FloatRules) -> Option<f64> {
    let mut bytes = bytes;
    if rules.crop_at_nul {
        if let Some(pos) = bytes.iter().position(|b| *b == 0) {
            bytes = &bytes[..pos];
        }
    }
    if rules.empty_is_zero && bytes.is_empty() {
        return Some(0.0);
    }

    let mut text = std::str::from_utf8(bytes).ok()?;
    if rules.leading_whitespace {
        text = text.trim_start();
    }
    if text.is_empty() || text.starts_with(char::is_whitespace) || text.ends_with(char::is_whitespace)
    {
        return None;
    }

    let value: f64 = text.parse().ok()?;
    if value.is_nan() {
        return None;
    }
    if !rules.allow_erange && (value.is_infinite() || value == 0.0) && has_significant_digit(text) {
        return None;
    }
    Some(value)
}

// A literal such as `1e999` or `1e-999` carries a non-zero digit before its exponent yet decodes
// to infinity or zero.
fn has_significant_digit(text: &str) -> bool {
    text.bytes()
        .take_while(|b| !b.is_ascii_alphabetic())
        .any(|b| (b'1'..=b'9').contains(&b))
}

pub fn format_int(value: i64) -> Bytes {
    Bytes::from(value.to_string())
}

/// Formats a sorted-set score: the shortest digits that round-trip, laid out like C's `%.17g`.
pub fn format_score(value: f64) -> Bytes {
    Bytes::from(general_notation(value, None))
}

/// Formats the result of `INCRBYFLOAT`/`HINCRBYFLOAT`: shortest round-trip digits in plain
/// positional notation.
pub fn format_increment(value: f64) -> Bytes {
    let value = value + 0.0;
    if value.is_infinite() {
        return Bytes::from_static(if value > 0.0 { b"inf" } else { b"-inf" });
    }
    Bytes::from(format!("{}", value))
}

/// `%.17g`: always 17 significant digits before trailing zeros are trimmed. Used when a script
/// hands a number to a command.
pub fn format_g17(value: f64) -> String {
    general_notation(value, Some(17))
}

fn general_notation(value: f64, precision: Option<usize>) -> String {
    // Adding zero folds -0 into 0.
    let value = value + 0.0;
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let scientific = match precision {
        Some(precision) => format!("{:.*e}", precision.saturating_sub(1), value),
        None => format!("{:e}", value),
    };
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(mantissa) => ("-", mantissa),
        None => ("", mantissa),
    };

    let mut digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    while digits.len() > 1 && digits.ends_with('0') {
        digits.pop();
    }

    if !(-4..17).contains(&exponent) {
        let (head, tail) = digits.split_at(1);
        let fraction = if tail.is_empty() {
            String::new()
        } else {
            format!(".{}", tail)
        };
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        format!("{}{}{}e{}{:02}", sign, head, fraction, exp_sign, exponent.abs())
    } else if exponent >= 0 {
        let int_len = exponent as usize + 1;
        if digits.len() <= int_len {
            format!("{}{}{}", sign, digits, "0".repeat(int_len - digits.len()))
        } else {
            format!("{}{}.{}", sign, &digits[..int_len], &digits[int_len..])
        }
    } else {
        let zeros = "0".repeat((-exponent - 1) as usize);
        format!("{}0.{}{}", sign, zeros, digits)
    }
}
