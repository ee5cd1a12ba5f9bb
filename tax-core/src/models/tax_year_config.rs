//! Rates, thresholds and schedules for a single tax year.
//!
//! A [`TaxYearConfig`] is handed by reference to every calculator and to the
//! pipeline. Nothing in the engine reads tax constants from anywhere else, so
//! supporting another year means building another config value.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{MarginalBracketSchedule, ScheduleError, StandardDeductionTable, TaxBracket};

/// Errors produced by [`TaxYearConfig::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A rate or factor must be between 0 and 1.
    #[error("{name} must be between 0 and 1, got {value}")]
    InvalidRate { name: &'static str, value: Decimal },

    /// A threshold or limit must be strictly positive.
    #[error("{name} must be positive, got {value}")]
    InvalidThreshold { name: &'static str, value: Decimal },

    /// A fixed deduction amount must be non-negative.
    #[error("{name} must be non-negative, got {value}")]
    NegativeAmount { name: &'static str, value: Decimal },

    /// A bracket schedule is malformed.
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

/// Simplified-method home office parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeOfficeRule {
    /// Dollars deducted per square foot of office.
    pub rate_per_square_foot: Decimal,
    /// Area above this is ignored.
    pub max_square_feet: Decimal,
}

/// Every rate, threshold and schedule the pipeline reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxYearConfig {
    /// Tax year these figures apply to.
    pub tax_year: i32,

    // Employment taxes
    /// Combined Social Security rate (12.4%).
    pub ss_tax_rate: Decimal,
    /// Earnings above this are not subject to Social Security.
    pub ss_wage_base: Decimal,
    /// Combined Medicare rate (2.9%).
    pub medicare_tax_rate: Decimal,
    /// Additional Medicare rate on earnings above the threshold.
    pub additional_medicare_tax_rate: Decimal,
    /// Earnings above which the additional Medicare rate applies.
    pub additional_medicare_threshold: Decimal,
    /// Employer FICA share; net earnings are scaled by one minus this rate.
    pub employer_fica_rate: Decimal,

    // Deductions
    /// Deductible fraction of self-employment tax.
    pub se_deduction_rate: Decimal,
    /// Qualified business income deduction rate.
    pub qbi_deduction_rate: Decimal,
    /// Standard deduction by filing status.
    pub standard_deduction: StandardDeductionTable,
    /// Simplified-method home office parameters.
    pub home_office: HomeOfficeRule,

    // Income taxes
    /// Default flat local rate, used unless a profile overrides it.
    pub local_tax_rate: Decimal,
    /// Federal marginal brackets.
    pub federal_schedule: MarginalBracketSchedule,
    /// State marginal brackets.
    pub state_schedule: MarginalBracketSchedule,
}

impl TaxYearConfig {
    /// The 2024 figures used by the calculator.
    ///
    /// # Errors
    ///
    /// Only fails if the built-in schedules are malformed.
    pub fn tax_year_2024() -> Result<Self, ConfigError> {
        let federal_schedule = MarginalBracketSchedule::new(
            "federal",
            vec![
                TaxBracket::bounded(dec!(23200), dec!(0.10)),
                TaxBracket::bounded(dec!(94300), dec!(0.12)),
                TaxBracket::bounded(dec!(201050), dec!(0.22)),
                TaxBracket::bounded(dec!(383900), dec!(0.24)),
                TaxBracket::bounded(dec!(487450), dec!(0.32)),
                TaxBracket::bounded(dec!(731200), dec!(0.35)),
                TaxBracket::unbounded(dec!(0.37)),
            ],
        )?;

        let state_schedule = MarginalBracketSchedule::new(
            "state",
            vec![
                TaxBracket::bounded(dec!(1000), dec!(0.02)),
                TaxBracket::bounded(dec!(2000), dec!(0.03)),
                TaxBracket::bounded(dec!(3000), dec!(0.04)),
                TaxBracket::bounded(dec!(100000), dec!(0.0475)),
                TaxBracket::bounded(dec!(125000), dec!(0.05)),
                TaxBracket::bounded(dec!(150000), dec!(0.0525)),
                TaxBracket::bounded(dec!(250000), dec!(0.055)),
                TaxBracket::unbounded(dec!(0.0575)),
            ],
        )?;

        let config = Self {
            tax_year: 2024,
            ss_tax_rate: dec!(0.124),
            ss_wage_base: dec!(168600),
            medicare_tax_rate: dec!(0.029),
            additional_medicare_tax_rate: dec!(0.009),
            additional_medicare_threshold: dec!(250000),
            employer_fica_rate: dec!(0.0765),
            se_deduction_rate: dec!(0.5),
            qbi_deduction_rate: dec!(0.20),
            standard_deduction: StandardDeductionTable {
                single: dec!(14600),
                married_filing_jointly: dec!(29200),
                head_of_household: dec!(21900),
            },
            home_office: HomeOfficeRule {
                rate_per_square_foot: dec!(5),
                max_square_feet: dec!(300),
            },
            local_tax_rate: dec!(0.032),
            federal_schedule,
            state_schedule,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks every rate, threshold and schedule.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let rates = [
            ("ss_tax_rate", self.ss_tax_rate),
            ("medicare_tax_rate", self.medicare_tax_rate),
            ("additional_medicare_tax_rate", self.additional_medicare_tax_rate),
            ("employer_fica_rate", self.employer_fica_rate),
            ("se_deduction_rate", self.se_deduction_rate),
            ("qbi_deduction_rate", self.qbi_deduction_rate),
            ("local_tax_rate", self.local_tax_rate),
        ];
        if let Some((name, value)) = rates
            .into_iter()
            .find(|(_, v)| *v < Decimal::ZERO || *v > Decimal::ONE)
        {
            return Err(ConfigError::InvalidRate { name, value });
        }

        let thresholds = [
            ("ss_wage_base", self.ss_wage_base),
            (
                "additional_medicare_threshold",
                self.additional_medicare_threshold,
            ),
            (
                "home_office.max_square_feet",
                self.home_office.max_square_feet,
            ),
        ];
        if let Some((name, value)) = thresholds.into_iter().find(|(_, v)| *v <= Decimal::ZERO) {
            return Err(ConfigError::InvalidThreshold { name, value });
        }

        let amounts = [
            ("standard_deduction.single", self.standard_deduction.single),
            (
                "standard_deduction.married_filing_jointly",
                self.standard_deduction.married_filing_jointly,
            ),
            (
                "standard_deduction.head_of_household",
                self.standard_deduction.head_of_household,
            ),
            (
                "home_office.rate_per_square_foot",
                self.home_office.rate_per_square_foot,
            ),
        ];
        if let Some((name, value)) = amounts.into_iter().find(|(_, v)| *v < Decimal::ZERO) {
            return Err(ConfigError::NegativeAmount { name, value });
        }

        self.federal_schedule.validate()?;
        self.state_schedule.validate()?;
        Ok(())
    }

    /// Share of net revenue treated as self-employment earnings
    /// (1 minus the employer-equivalent FICA rate).
    pub fn net_earnings_factor(&self) -> Decimal {
        Decimal::ONE - self.employer_fica_rate
    }
}
