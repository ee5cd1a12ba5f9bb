//! One calculator per tax kind.
//!
//! Each calculator copies the rates it needs out of [`TaxYearConfig`] (or
//! borrows the bracket schedule) when constructed, then maps an income base
//! to an amount. None of them keeps state between calls.

use rust_decimal::Decimal;

use super::TaxCalculator;
use super::brackets::evaluate;
use super::common::{max, non_negative_base};
use crate::models::{MarginalBracketSchedule, TaxYearConfig};

/// Social Security tax: a flat rate on the base, capped at the wage base.
#[derive(Debug, Clone)]
pub struct SocialSecurityTax {
    rate: Decimal,
    wage_base: Decimal,
}

impl SocialSecurityTax {
    pub fn new(config: &TaxYearConfig) -> Self {
        Self {
            rate: config.ss_tax_rate,
            wage_base: config.ss_wage_base,
        }
    }
}

impl TaxCalculator for SocialSecurityTax {
    fn calculate(
        &self,
        base: Decimal,
    ) -> Decimal {
        let base = non_negative_base("social_security", base);
        base.min(self.wage_base) * self.rate
    }
}

/// Medicare tax plus the additional surtax on earnings above the threshold.
///
/// The threshold is one figure for every filing status.
#[derive(Debug, Clone)]
pub struct MedicareTax {
    rate: Decimal,
    additional_rate: Decimal,
    threshold: Decimal,
}

impl MedicareTax {
    pub fn new(config: &TaxYearConfig) -> Self {
        Self {
            rate: config.medicare_tax_rate,
            additional_rate: config.additional_medicare_tax_rate,
            threshold: config.additional_medicare_threshold,
        }
    }

    fn surtax(
        &self,
        base: Decimal,
    ) -> Decimal {
        max(base - self.threshold, Decimal::ZERO) * self.additional_rate
    }
}

impl TaxCalculator for MedicareTax {
    fn calculate(
        &self,
        base: Decimal,
    ) -> Decimal {
        let base = non_negative_base("medicare", base);
        base * self.rate + self.surtax(base)
    }
}

/// Income tax from a marginal schedule. The same type serves the federal
/// and state schedules.
#[derive(Debug, Clone)]
pub struct BracketIncomeTax<'a> {
    schedule: &'a MarginalBracketSchedule,
}

impl<'a> BracketIncomeTax<'a> {
    pub fn new(schedule: &'a MarginalBracketSchedule) -> Self {
        Self { schedule }
    }

    pub fn federal(config: &'a TaxYearConfig) -> Self {
        Self::new(&config.federal_schedule)
    }

    pub fn state(config: &'a TaxYearConfig) -> Self {
        Self::new(&config.state_schedule)
    }
}

impl TaxCalculator for BracketIncomeTax<'_> {
    fn calculate(
        &self,
        base: Decimal,
    ) -> Decimal {
        evaluate(self.schedule, base)
    }
}

/// Flat local income tax.
#[derive(Debug, Clone)]
pub struct LocalTax {
    rate: Decimal,
}

impl LocalTax {
    /// Uses `rate_override` when present, otherwise the configured default.
    pub fn new(
        config: &TaxYearConfig,
        rate_override: Option<Decimal>,
    ) -> Self {
        Self {
            rate: rate_override.unwrap_or(config.local_tax_rate),
        }
    }

}

impl TaxCalculator for LocalTax {
    fn calculate(
        &self,
        base: Decimal,
    ) -> Decimal {
        non_negative_base("local", base) * self.rate
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    use super::*;

    fn config() -> TaxYearConfig {
        TaxYearConfig::tax_year_2024().unwrap()
    }

    // =========================================================================
    // SocialSecurityTax tests
    // =========================================================================

    #[test]
    fn social_security_below_wage_base() {
        let result = SocialSecurityTax::new(&config()).calculate(dec!(46175));

        assert_eq!(result, dec!(5725.70));
    }

    #[test]
    fn social_security_capped_at_wage_base() {
        let result = SocialSecurityTax::new(&config()).calculate(dec!(250000));

        // 168600 * 0.124
        assert_eq!(result, dec!(20906.4));
    }

    #[test]
    fn social_security_zero_for_negative_base() {
        let result = SocialSecurityTax::new(&config()).calculate(dec!(-100));

        assert_eq!(result, dec!(0));
    }

    // =========================================================================
    // MedicareTax tests
    // =========================================================================

    #[test]
    fn medicare_below_threshold_has_no_surtax() {
        let result = MedicareTax::new(&config()).calculate(dec!(46175));

        assert_eq!(result, dec!(1339.075));
    }

    #[test]
    fn medicare_at_threshold_has_no_surtax() {
        let result = MedicareTax::new(&config()).calculate(dec!(250000));

        assert_eq!(result, dec!(7250));
    }

    #[test]
    fn medicare_surtax_applies_to_excess_only() {
        let result = MedicareTax::new(&config()).calculate(dec!(300000));

        // 300000 * 0.029 + 50000 * 0.009
        assert_eq!(result, dec!(9150));
    }

    // =========================================================================
    // BracketIncomeTax tests
    // =========================================================================

    #[test]
    fn federal_uses_federal_schedule() {
        let config = config();

        let result = BracketIncomeTax::federal(&config).calculate(dec!(50000));

        assert_eq!(result, dec!(5536));
    }

    #[test]
    fn state_uses_state_schedule() {
        let config = config();

        let result = BracketIncomeTax::state(&config).calculate(dec!(50000));

        assert_eq!(result, dec!(2322.5));
    }

    // =========================================================================
    // LocalTax tests
    // =========================================================================

    #[test]
    fn local_uses_default_rate() {
        let result = LocalTax::new(&config(), None).calculate(dec!(10000));

        assert_eq!(result, dec!(320));
    }

    #[test]
    fn local_uses_override_rate() {
        let local = LocalTax::new(&config(), Some(dec!(0.01)));

        assert_eq!(local.calculate(dec!(10000)), dec!(100));
    }

    // =========================================================================
    // properties
    // =========================================================================

    proptest! {
        #[test]
        fn social_security_is_flat_then_capped(cents in 0u64..100_000_000u64) {
            let config = config();
            let base = Decimal::new(cents as i64, 2);

            let result = SocialSecurityTax::new(&config).calculate(base);

            if base <= config.ss_wage_base {
                prop_assert_eq!(result, base * dec!(0.124));
            } else {
                prop_assert_eq!(result, config.ss_wage_base * dec!(0.124));
            }
        }

        #[test]
        fn medicare_surtax_only_above_threshold(cents in 0u64..100_000_000u64) {
            let config = config();
            let base = Decimal::new(cents as i64, 2);

            let result = MedicareTax::new(&config).calculate(base);

            if base <= config.additional_medicare_threshold {
                prop_assert_eq!(result, base * dec!(0.029));
            } else {
                let excess = base - config.additional_medicare_threshold;
                prop_assert_eq!(result, base * dec!(0.029) + excess * dec!(0.009));
            }
        }
    }
}
