//! Shared helpers for the tax calculators.
//!
//! The engine carries full `Decimal` precision between stages. Rounding is a
//! presentation concern and only happens through [`round_half_up`].

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::warn;

/// Rounds to two decimal places, midpoints away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(1339.075)), dec!(1339.08));
/// assert_eq!(round_half_up(dec!(5725.70)), dec!(5725.70));
/// assert_eq!(round_half_up(dec!(-0.005)), dec!(-0.01));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the larger of two amounts.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::max;
///
/// assert_eq!(max(dec!(-500), dec!(0)), dec!(0));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Floors a calculator base at zero, logging when a negative value had to
/// be clamped. Calculators expect non-negative bases; a negative one means
/// the caller skipped a floor upstream.
pub(crate) fn non_negative_base(
    calculator: &str,
    base: Decimal,
) -> Decimal {
    if base < Decimal::ZERO {
        warn!(calculator, base = %base, "Negative income base clamped to zero");
        return Decimal::ZERO;
    }
    base
}
