//! Number formatting for display and clipboard output.
//!
//! Display output follows the `%g` convention with six significant digits
//! and thousands separators on the integer part. Integral values are
//! printed in full with separators.

/// Significant digits kept for non-integral values.
const SIGNIFICANT_DIGITS: i32 = 6;

/// Format a number for display with thousand separators.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value.is_sign_positive() { "inf" } else { "-inf" }.to_string();
    }

    if value == 0.0 {
        // Covers -0.0 as well.
        return "0".to_string();
    }

    if value.fract() == 0.0 {
        // `{:.0}` prints the exact integer, however large.
        return group_digits(&format!("{:.0}", value));
    }

    format_general(value)
}

/// Format a number for the clipboard: shortest round-trip form, no separators.
pub fn format_plain(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value.is_sign_positive() { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{}", value)
}

/// `%g`-style formatting of a finite, non-integral value.
fn format_general(value: f64) -> String {
    let precision = (SIGNIFICANT_DIGITS - 1) as usize;

    // Scientific form first: rounding to the target precision decides the
    // exponent, e.g. 999999.5 rounds up to 1.00000e6.
    let scientific = format!("{:.*e}", precision, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if exponent < -4 || exponent >= SIGNIFICANT_DIGITS {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        );
    }

    let decimals = (SIGNIFICANT_DIGITS - 1 - exponent) as usize;
    let fixed = format!("{:.*}", decimals, value);
    group_digits(trim_fraction(&fixed))
}

/// Drop trailing zeros after the decimal point, and the point itself.
fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

/// Insert thousand separators into the integer part of a decimal string.
fn group_digits(number: &str) -> String {
    let (sign, unsigned) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let (int_part, fraction) = match unsigned.find('.') {
        Some(dot_pos) => unsigned.split_at(dot_pos),
        None => (unsigned, ""),
    };

    let mut result = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    let grouped: String = result.chars().rev().collect();
    format!("{}{}{}", sign, grouped, fraction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thousand_separators() {
        assert_eq!(format_number(5000.0), "5,000");
        assert_eq!(format_number(1_000_000.0), "1,000,000");
        assert_eq!(format_number(-1234.0), "-1,234");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(2.0), "2");
    }

    #[test]
    fn test_large_integers_print_in_full() {
        assert_eq!(format_number(1e20), "100,000,000,000,000,000,000");
    }

    #[test]
    fn test_negative_zero() {
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_plain(-0.0), "0");
    }

    #[test]
    fn test_decimal_result() {
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(1234.5), "1,234.5");
        assert_eq!(format_number(-1234.5), "-1,234.5");
        assert_eq!(format_number(2f64.sqrt()), "1.41421");
        assert_eq!(format_number(1.0 / 3.0), "0.333333");
        assert_eq!(format_number(0.1 + 0.2), "0.3");
        assert_eq!(format_number(123456.7), "123,457");
    }

    #[test]
    fn test_scientific_notation() {
        assert_eq!(format_number(1234567.5), "1.23457e+06");
        assert_eq!(format_number(0.00001234), "1.234e-05");
        assert_eq!(format_number(-0.00005), "-5e-05");
        assert_eq!(format_number(0.0001), "0.0001");
        assert_eq!(format_number(999999.5), "1e+06");
    }

    #[test]
    fn test_non_finite_tokens() {
        assert_eq!(format_number(f64::NAN), "nan");
        assert_eq!(format_number(f64::INFINITY), "inf");
        assert_eq!(format_number(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn test_plain_format() {
        assert_eq!(format_plain(5000.0), "5000");
        assert_eq!(format_plain(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_plain(-2.5), "-2.5");
        assert_eq!(format_plain(f64::INFINITY), "inf");
    }
}
