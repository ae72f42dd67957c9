use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds `value` to `decimals` places, ties away from zero.
///
/// Rounding goes through `Decimal` so that values such as `20.0005` round the
/// way they read instead of the way their binary representation falls.
#[must_use]
pub fn round_half_away_from_zero(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }

    Decimal::from_f64(value)
        .map(|decimal| {
            decimal.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero)
        })
        .and_then(|rounded| rounded.to_f64())
        .unwrap_or_else(|| {
            // Out of `Decimal` range: fall back to float rounding, which also
            // rounds half away from zero.
            let scale = 10f64.powi(decimals.min(15) as i32);
            (value * scale).round() / scale
        })
}

/// Keeps finite values, mapping `NaN`/infinities to "absent".
#[must_use]
pub fn finite_or_none(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::{finite_or_none, round_half_away_from_zero};

    #[test]
    fn rounds_ties_away_from_zero() {
        assert_eq!(round_half_away_from_zero(1.0005, 3), 1.001);
        assert_eq!(round_half_away_from_zero(-1.0005, 3), -1.001);
        assert_eq!(round_half_away_from_zero(20.75, 3), 20.75);
        assert_eq!(round_half_away_from_zero(4.2444, 3), 4.244);
    }

    #[test]
    fn non_finite_values_pass_through_rounding_and_are_filtered() {
        assert!(round_half_away_from_zero(f64::NAN, 3).is_nan());
        assert_eq!(finite_or_none(Some(f64::INFINITY)), None);
        assert_eq!(finite_or_none(Some(2.5)), Some(2.5));
        assert_eq!(finite_or_none(None), None);
    }
}
