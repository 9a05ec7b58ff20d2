//! Leading-prefix numeric parsing for attribute strings.
//!
//! Attribute values such as `"42px"` or `" 3.5em"` parse to the longest numeric
//! prefix; trailing text is ignored. Input with no numeric prefix yields
//! [`Value::NotANumber`].

use crate::value::Value;

/// Parse an integer prefix: optional sign, then decimal digits or a `0x` hex run.
///
/// Values that overflow `i64` fall back to a `Number`.
pub fn parse_int_prefix(raw: &str) -> Value {
    let s = raw.trim_start();
    let (negative, s) = split_sign(s);

    let (radix, digits) = match s.get(..2) {
        Some("0x") | Some("0X") => (16, &s[2..]),
        _ => (10, s),
    };

    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_digit(radix))
        .map(|(i, _)| i)
        .unwrap_or(digits.len());

    if end == 0 {
        return Value::NotANumber;
    }

    let digits = &digits[..end];
    match i64::from_str_radix(digits, radix) {
        Ok(n) => Value::Int(if negative { -n } else { n }),
        Err(_) => {
            // Too wide for i64, keep the magnitude as a float
            let magnitude = digits.chars().fold(0f64, |acc, c| {
                acc * radix as f64 + c.to_digit(radix).unwrap_or(0) as f64
            });
            Value::Number(if negative { -magnitude } else { magnitude })
        }
    }
}

/// Parse the longest decimal float prefix, including exponent and `Infinity`.
pub fn parse_float_prefix(raw: &str) -> Value {
    let s = raw.trim_start();
    let (negative, rest) = split_sign(s);

    if rest.starts_with("Infinity") {
        return Value::Number(if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let bytes = rest.as_bytes();
    let mut i = 0;
    let int_digits = count_digits(&bytes[i..]);
    i += int_digits;

    let mut frac_digits = 0;
    if bytes.get(i) == Some(&b'.') {
        frac_digits = count_digits(&bytes[i + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            i += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return Value::NotANumber;
    }

    if matches!(bytes.get(i), Some(b'e') | Some(b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+') | Some(b'-')) {
            j += 1;
        }
        let exp_digits = count_digits(&bytes[j.min(bytes.len())..]);
        if exp_digits > 0 {
            i = j + exp_digits;
        }
    }

    match rest[..i].parse::<f64>() {
        Ok(n) => Value::Number(if negative { -n } else { n }),
        Err(_) => Value::NotANumber,
    }
}

fn split_sign(s: &str) -> (bool, &str) {
    if let Some(rest) = s.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = s.strip_prefix('+') {
        (false, rest)
    } else {
        (false, s)
    }
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
