//! Loose string-to-number coercion for amounts arriving as text.
//!
//! Mirrors how a dynamically typed view layer turns a string into a number:
//! nothing is rejected, unreadable input just becomes NaN and flows on into
//! the formatter.

/// Coerce `input` into an `f64`.
///
/// - surrounding whitespace is ignored and blank input is `0`
/// - `Infinity`, `+Infinity` and `-Infinity` are the infinities
/// - `0x`, `0o` and `0b` prefixes read an unsigned integer in that radix
/// - otherwise a decimal literal with optional sign, fraction and exponent
///
/// Anything else is NaN.
pub fn coerce_number(input: &str) -> f64 {
    let s = input.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    if s.is_empty() {
        return 0.0;
    }

    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    if let Some(value) = radix_literal(s) {
        return value;
    }

    if is_decimal_literal(s) {
        s.parse::<f64>().unwrap_or(f64::NAN)
    } else {
        f64::NAN
    }
}

fn radix_literal(s: &str) -> Option<f64> {
    let prefix = s.get(..2)?;
    let digits = s.get(2..)?;
    let radix = match prefix {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Some(f64::NAN);
    }

    let value = match u128::from_str_radix(digits, radix) {
        Ok(value) => value as f64,
        Err(_) => digits
            .chars()
            .filter_map(|c| c.to_digit(radix))
            .fold(0.0, |acc, digit| acc * f64::from(radix) + f64::from(digit)),
    };
    Some(value)
}

/// `[+-] digits [. digits] [(e|E) [+-] digits]`, with digits required on at
/// least one side of the point. Screens out the words `f64::from_str` would
/// also accept (`inf`, `nan`, `infinity`).
fn is_decimal_literal(s: &str) -> bool {
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(index) => (&unsigned[..index], Some(&unsigned[index + 1..])),
        None => (unsigned, None),
    };

    let (whole, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let digits_only = |part: &str| part.chars().all(|c| c.is_ascii_digit());
    if whole.is_empty() && frac.is_empty() {
        return false;
    }
    if !digits_only(whole) || !digits_only(frac) {
        return false;
    }

    match exponent {
        None => true,
        Some(exp) => {
            let exp_digits = exp.strip_prefix(['+', '-']).unwrap_or(exp);
            !exp_digits.is_empty() && digits_only(exp_digits)
        }
    }
}
