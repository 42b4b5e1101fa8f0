//! Fixed-precision number formatting with trailing-zero trimming.

use crate::model::Unit;

/// Upper bound applied to every caller-supplied precision.
pub const MAX_PRECISION: usize = 8;

/// Digits used by the Tailwind cycle, per destination unit.
const PX_DIGITS: i32 = 2;
const REM_DIGITS: i32 = 4;
const TAILWIND_DIGITS: i32 = 3;

/// 2^53: above this not every integer is representable.
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Clamp a configured precision to `0..=8`.
pub fn clamp_precision(precision: i32) -> usize {
    precision.clamp(0, MAX_PRECISION as i32) as usize
}

/// Format `value` with exactly `digits` decimals, rounding half away from zero.
///
/// A result that rounds to zero is printed without a sign. Once
/// `value * 10^digits` no longer fits the 53-bit mantissa the scaled rounding
/// is inexact (or overflows), so such values are formatted directly.
pub fn to_fixed(value: f64, digits: usize) -> String {
    let scale = 10f64.powi(digits as i32);
    if (value * scale).abs() >= EXACT_INTEGER_LIMIT {
        return format!("{value:.digits$}");
    }
    let mut rounded = (value * scale).round() / scale;
    if rounded == 0.0 {
        rounded = 0.0;
    }
    format!("{rounded:.digits$}")
}

/// Drop insignificant zeros after the decimal point, and the point itself
/// when nothing significant is left.
pub fn trim_trailing_zeros(mut text: String) -> String {
    if text.contains('.') {
        let keep = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(keep);
    }
    text
}

/// [`to_fixed`] with a clamped precision, then [`trim_trailing_zeros`].
///
/// ```
/// use toolbelt::convert::to_fixed_trim;
///
/// assert_eq!(to_fixed_trim(10.0, 4), "10");
/// assert_eq!(to_fixed_trim(12.34, 4), "12.34");
/// assert_eq!(to_fixed_trim(2.0 / 3.0, 20), "0.66666667");
/// ```
pub fn to_fixed_trim(value: f64, precision: i32) -> String {
    trim_trailing_zeros(to_fixed(value, clamp_precision(precision)))
}

/// Format a number destined for `unit` with the Tailwind cycle's fixed
/// precision: 2 digits for px, 4 for rem, 3 for bare Tailwind steps.
pub fn format_for_unit(value: f64, unit: Unit) -> String {
    let digits = match unit {
        Unit::Px => PX_DIGITS,
        Unit::Rem => REM_DIGITS,
        _ => TAILWIND_DIGITS,
    };
    to_fixed_trim(value, digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_precision_bounds() {
        assert_eq!(clamp_precision(-3), 0);
        assert_eq!(clamp_precision(4), 4);
        assert_eq!(clamp_precision(99), 8);
    }

    #[test]
    fn to_fixed_rounds_half_away_from_zero() {
        assert_eq!(to_fixed(2.5, 0), "3");
        assert_eq!(to_fixed(-2.5, 0), "-3");
        assert_eq!(to_fixed(0.125, 2), "0.13");
    }

    #[test]
    fn to_fixed_handles_huge_magnitudes() {
        let text = to_fixed(1e305, 8);
        assert!(!text.contains("inf"), "{text}");
        assert!(text.ends_with(".00000000"), "{text}");
        assert_eq!(to_fixed(-1e20, 2), "-100000000000000000000.00");
        assert_eq!(to_fixed_trim(1e20, 8), "100000000000000000000");
    }

    #[test]
    fn to_fixed_never_prints_negative_zero() {
        assert_eq!(to_fixed(-0.0001, 2), "0.00");
        assert_eq!(to_fixed_trim(-0.0001, 2), "0");
    }

    #[test]
    fn trim_removes_zero_run_and_point() {
        assert_eq!(trim_trailing_zeros("10.0000".into()), "10");
        assert_eq!(trim_trailing_zeros("12.3400".into()), "12.34");
        assert_eq!(trim_trailing_zeros("100".into()), "100");
        assert_eq!(trim_trailing_zeros("0.000".into()), "0");
        assert_eq!(trim_trailing_zeros("1.05".into()), "1.05");
    }

    #[test]
    fn to_fixed_trim_whole_numbers_have_no_point() {
        assert_eq!(to_fixed_trim(10.0, 4), "10");
        assert_eq!(to_fixed_trim(12.34, 4), "12.34");
        assert_eq!(to_fixed_trim(1.23456, 0), "1");
    }

    #[test]
    fn format_for_unit_uses_unit_precision() {
        assert_eq!(format_for_unit(12.345_678, Unit::Px), "12.35");
        assert_eq!(format_for_unit(0.123_456, Unit::Rem), "0.1235");
        assert_eq!(format_for_unit(2.123_456, Unit::Tailwind), "2.123");
        assert_eq!(format_for_unit(4.0, Unit::Tailwind), "4");
    }
}
