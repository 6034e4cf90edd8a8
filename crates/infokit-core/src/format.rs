//! Fixed-precision duration strings.

use std::time::Duration;

/// Fractional digits used by the timing wrappers.
pub const DEFAULT_DECIMALS: usize = 3;

/// Upper bound on fractional digits; larger requests are clamped.
pub const MAX_DECIMALS: usize = 20;

/// Format `value` with exactly `decimal` fractional digits.
///
/// The fraction is cut from the shortest round-trip text of `value`, so
/// digits past `decimal` are truncated, never rounded: `0.9999` with three
/// digits is `"0.999"`. Short fractions are zero-padded. Non-finite values
/// come back as their plain text. `decimal` is clamped to [`MAX_DECIMALS`].
pub fn format_seconds(value: f64, decimal: usize) -> String {
    let decimal = decimal.min(MAX_DECIMALS);
    if !value.is_finite() {
        return value.to_string();
    }

    let text = value.to_string();
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));

    let mut frac: String = frac_part.chars().take(decimal).collect();
    while frac.len() < decimal {
        frac.push('0');
    }

    format!("{int_part}.{frac}")
}

/// [`format_seconds`] for a [`Duration`].
pub fn format_duration(duration: Duration, decimal: usize) -> String {
    format_seconds(duration.as_secs_f64(), decimal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_number_is_padded() {
        assert_eq!(format_seconds(2.0, DEFAULT_DECIMALS), "2.000");
    }

    #[test]
    fn test_long_fraction_is_cut() {
        assert_eq!(format_seconds(2.123456, DEFAULT_DECIMALS), "2.123");
    }

    #[test]
    fn test_truncates_instead_of_rounding() {
        assert_eq!(format_seconds(0.9999, 3), "0.999");
        assert_eq!(format_seconds(1.23987, 2), "1.23");
    }

    #[test]
    fn test_short_fraction() {
        assert_eq!(format_seconds(0.5, 3), "0.500");
        assert_eq!(format_seconds(12.25, 5), "12.25000");
    }

    #[test]
    fn test_small_values_are_not_scientific() {
        assert_eq!(format_seconds(0.00001, 3), "0.000");
        assert_eq!(format_seconds(0.0001234, 6), "0.000123");
    }

    #[test]
    fn test_negative() {
        assert_eq!(format_seconds(-1.98765, 3), "-1.987");
    }

    #[test]
    fn test_zero_decimals_keeps_dot() {
        assert_eq!(format_seconds(2.75, 0), "2.");
    }

    #[test]
    fn test_huge_precision_is_clamped() {
        let text = format_seconds(1.5, 50_000_000);
        assert_eq!(text.len(), "1.".len() + MAX_DECIMALS);
        assert_eq!(text, format!("1.5{}", "0".repeat(MAX_DECIMALS - 1)));
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(format_seconds(f64::INFINITY, 3), "inf");
        assert_eq!(format_seconds(f64::NAN, 3), "NaN");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(1500), 3), "1.500");
        assert_eq!(format_duration(Duration::from_micros(2_123_456), 3), "2.123");
    }
}
