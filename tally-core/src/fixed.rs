//! Fixed-decimal stringification of `f64` values.
//!
//! Picks the `n` for which `n / 10^digits` is closest to the exact binary value
//! and breaks exact ties toward the larger magnitude. `format!("{:.N}")` alone
//! breaks ties to even, so ties are detected and rounded here by hand.
//!
//! Values that are not plain decimals fall out as words or exponents:
//! NaN is `"NaN"`, infinities are `"Infinity"`/`"-Infinity"`, and magnitudes
//! from `1e21` up use the shortest exponential form (`"1e+21"`).

/// Magnitude at which output switches from fixed digits to exponential form.
pub const EXPONENTIAL_THRESHOLD: f64 = 1e21;

/// Render `value` with exactly `digits` fractional digits.
pub fn to_fixed(value: f64, digits: u8) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }

    // -0.0 is not below zero, so it renders unsigned.
    let negative = value < 0.0;
    let magnitude = value.abs();
    let body = if magnitude >= EXPONENTIAL_THRESHOLD {
        shortest_exponential(magnitude)
    } else {
        fixed_digits(magnitude, digits)
    };

    if negative {
        format!("-{body}")
    } else {
        body
    }
}

fn shortest_exponential(magnitude: f64) -> String {
    if magnitude.is_infinite() {
        return "Infinity".to_string();
    }

    let rendered = format!("{magnitude:e}");
    match rendered.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => rendered,
    }
}

fn fixed_digits(magnitude: f64, digits: u8) -> String {
    let precision = usize::from(digits);

    // An exact tie at `digits` places needs a value of the form k / 2^(digits + 1).
    // Scaling by a power of two is exact, so a zero fraction identifies the candidates,
    // and for those one extra digit is the full, unrounded expansion.
    let tie_scale = 2_f64.powi(i32::from(digits) + 1);
    if (magnitude * tie_scale).fract() == 0.0 {
        let exact = format!("{:.*}", precision + 1, magnitude);
        return round_last_digit_half_up(&exact);
    }

    format!("{magnitude:.precision$}")
}

/// Drop the final digit of `exact`, carrying into the rest when it is 5 or more.
fn round_last_digit_half_up(exact: &str) -> String {
    let mut bytes: Vec<u8> = exact.bytes().collect();
    let dropped = bytes.pop();
    if bytes.last() == Some(&b'.') {
        bytes.pop();
    }

    if matches!(dropped, Some(b'5'..=b'9')) {
        increment_decimal(&mut bytes);
    }

    bytes.into_iter().map(char::from).collect()
}

fn increment_decimal(bytes: &mut Vec<u8>) {
    for byte in bytes.iter_mut().rev() {
        match *byte {
            b'.' => continue,
            b'9' => *byte = b'0',
            _ => {
                *byte += 1;
                return;
            }
        }
    }
    bytes.insert(0, b'1');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_to_requested_digits() {
        assert_eq!(to_fixed(0.0, 8), "0.00000000");
        assert_eq!(to_fixed(1.5, 8), "1.50000000");
        assert_eq!(to_fixed(123.456, 2), "123.46");
    }

    #[test]
    fn zero_digits_has_no_decimal_point() {
        assert_eq!(to_fixed(42.0, 0), "42");
        assert_eq!(to_fixed(41.6, 0), "42");
    }

    #[test]
    fn exact_ties_round_to_larger_magnitude() {
        assert_eq!(to_fixed(0.5, 0), "1");
        assert_eq!(to_fixed(2.5, 0), "3");
        assert_eq!(to_fixed(-1.5, 0), "-2");
        assert_eq!(to_fixed(0.125, 2), "0.13");
        assert_eq!(to_fixed(0.001953125, 8), "0.00195313");
    }

    #[test]
    fn ties_carry_across_the_decimal_point() {
        assert_eq!(to_fixed(9.5, 0), "10");
        assert_eq!(to_fixed(99.5, 0), "100");
        assert_eq!(to_fixed(0.375, 2), "0.38");
    }

    #[test]
    fn near_ties_follow_the_binary_value() {
        // 1.005 is stored as 1.00499999999999989...
        assert_eq!(to_fixed(1.005, 2), "1.00");
        assert_eq!(to_fixed(0.615, 2), "0.61");
    }

    #[test]
    fn non_finite_values_render_as_words() {
        assert_eq!(to_fixed(f64::NAN, 8), "NaN");
        assert_eq!(to_fixed(f64::INFINITY, 8), "Infinity");
        assert_eq!(to_fixed(f64::NEG_INFINITY, 8), "-Infinity");
    }

    #[test]
    fn negative_zero_is_unsigned_but_tiny_negatives_keep_sign() {
        assert_eq!(to_fixed(-0.0, 8), "0.00000000");
        assert_eq!(to_fixed(-1e-10, 8), "-0.00000000");
    }

    #[test]
    fn large_magnitudes_switch_to_exponential() {
        assert_eq!(to_fixed(1e21, 8), "1e+21");
        assert_eq!(to_fixed(-1e22, 2), "-1e+22");
        assert_eq!(to_fixed(1.5e292, 8), "1.5e+292");
        assert_eq!(to_fixed(999_999_999_999_999_900_000.0, 2), "999999999999999868928.00");
    }
}
