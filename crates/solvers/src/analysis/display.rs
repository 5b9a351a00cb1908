use std::fmt;

/// Magnitudes below this are floating-point noise and display as zero.
pub const NOISE_FLOOR: f64 = 1e-14;

/// Decimal scale for six displayed digits.
const SCALE: f64 = 1e6;

/// Rounds `x` to six decimal places for display.
///
/// Values with magnitude below [`NOISE_FLOOR`] become exactly zero, ties round
/// half away from zero, and a negative zero result is normalized to `0.0`.
/// Non-finite values pass through.
#[must_use]
pub fn round6(x: f64) -> f64 {
    if x.abs() < NOISE_FLOOR {
        return 0.0;
    }
    let rounded = (x * SCALE).round() / SCALE;
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// A displayable number that may be unavailable.
///
/// Formats through [`round6`], or as `—` when there is no value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metric(pub Option<f64>);

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{}", round6(value)),
            None => f.write_str("—"),
        }
    }
}

impl From<f64> for Metric {
    fn from(value: f64) -> Self {
        Self(Some(value))
    }
}

impl From<Option<f64>> for Metric {
    fn from(value: Option<f64>) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noise_rounds_to_zero() {
        assert_eq!(round6(1e-15), 0.0);
        assert_eq!(round6(-3e-17), 0.0);
    }

    #[test]
    fn small_negative_rounds_to_positive_zero() {
        let rounded = round6(-0.000_000_1);
        assert_eq!(rounded, 0.0);
        assert!(rounded.is_sign_positive());
    }

    #[test]
    fn rounds_to_six_places() {
        assert_eq!(round6(6.191_736_422_4), 6.191_736);
        assert_eq!(round6(-2.718_281_828), -2.718_282);
        assert_eq!(round6(0.2), 0.2);
    }

    #[test]
    fn boundary_value_lands_on_a_neighbor() {
        let rounded = round6(0.123_456_5);
        assert!(rounded == 0.123_456 || rounded == 0.123_457, "{rounded}");
    }

    #[test]
    fn rounding_is_symmetric_about_zero() {
        for x in [0.123_456_789, 3.999_999_9, 42.0, 1e-5] {
            assert_eq!(round6(-x), -round6(x));
        }
    }

    #[test]
    fn non_finite_passes_through() {
        assert_eq!(round6(f64::INFINITY), f64::INFINITY);
        assert!(round6(f64::NAN).is_nan());
    }

    #[test]
    fn metric_formats_rounded_or_dash() {
        assert_eq!(Metric::from(0.123_456_789).to_string(), "0.123457");
        assert_eq!(Metric::from(1.0).to_string(), "1");
        assert_eq!(Metric::from(1e-16).to_string(), "0");
        assert_eq!(Metric(None).to_string(), "—");
    }
}
