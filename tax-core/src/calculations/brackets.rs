//! Marginal bracket evaluation.

use rust_decimal::Decimal;

use super::common::non_negative_base;
use crate::models::MarginalBracketSchedule;

/// Computes the tax owed on `income` under a marginal schedule.
///
/// Each bracket taxes only the slice of income between the previous bound
/// (zero for the first bracket) and its own bound. Evaluation stops at the
/// first bracket whose bound reaches `income`; the unbounded top bracket
/// takes whatever is left. Negative income is clamped to zero.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::TaxYearConfig;
/// use tax_core::calculations::brackets::evaluate;
///
/// let config = TaxYearConfig::tax_year_2024().unwrap();
///
/// // 23200 * 10% + (50000 - 23200) * 12%
/// assert_eq!(evaluate(&config.federal_schedule, dec!(50000)), dec!(5536));
/// ```
pub fn evaluate(
    schedule: &MarginalBracketSchedule,
    income: Decimal,
) -> Decimal {
    let income = non_negative_base(schedule.name(), income);
    if income.is_zero() {
        return Decimal::ZERO;
    }

    let mut tax = Decimal::ZERO;
    let mut lower = Decimal::ZERO;
    for bracket in schedule.brackets() {
        let upper = bracket.upper_bound.map_or(income, |bound| bound.min(income));
        tax += (upper - lower) * bracket.rate;

        match bracket.upper_bound {
            Some(bound) if bound < income => lower = bound,
            _ => break,
        }
    }
    tax
}
