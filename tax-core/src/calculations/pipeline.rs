//! The five-stage tax pipeline.
//!
//! # Stages
//!
//! | Stage | Description |
//! |-------|-------------|
//! | 1     | Resolve the entity scenario and the self-employment income base |
//! | 2     | Social Security and Medicare on that base |
//! | 3     | Deductions: standard, half of stage 2, QBI, pass-through items |
//! | 4     | Taxable income: net revenue less deductions, floored at zero |
//! | 5     | Federal, state and local tax on taxable income, plus stage 2 |
//!
//! Self-employment tax is computed once, on the base before any deduction,
//! and the result is carried forward unchanged. The interaction between the
//! self-employment tax, its own deduction and QBI is resolved by this single
//! forward pass rather than by iterating to a fixed point.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::{BusinessProfile, EntityType, FilingStatus, TaxPipeline, TaxYearConfig};
//!
//! let config = TaxYearConfig::tax_year_2024().unwrap();
//! let pipeline = TaxPipeline::new(&config).unwrap();
//!
//! let profile = BusinessProfile::builder(EntityType::SoleProprietor, FilingStatus::Single)
//!     .gross_revenue(dec!(100000))
//!     .expenses(dec!(50000))
//!     .build()
//!     .unwrap();
//!
//! let result = pipeline.calculate(&profile).unwrap();
//!
//! assert_eq!(result.self_employment_income, dec!(46175));
//! assert_eq!(result.liabilities.medicare, dec!(1339.075));
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use super::TaxCalculator;
use super::common::max;
use super::deductions::DeductionCalculator;
use super::entity::EntityScenario;
use super::liabilities::{BracketIncomeTax, LocalTax, MedicareTax, SocialSecurityTax};
use crate::error::TaxError;
use crate::models::{BusinessProfile, LiabilityResult, ScenarioResult, TaxYearConfig};

/// Runs a [`BusinessProfile`] through the pipeline for one tax year.
///
/// The pipeline only borrows its configuration and holds no other state,
/// so one instance can be shared across threads.
#[derive(Debug, Clone, Copy)]
pub struct TaxPipeline<'a> {
    config: &'a TaxYearConfig,
}

impl<'a> TaxPipeline<'a> {
    /// Creates a pipeline over a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TaxError::Config`] if `config` fails validation.
    pub fn new(config: &'a TaxYearConfig) -> Result<Self, TaxError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Computes the full result for one profile.
    ///
    /// # Errors
    ///
    /// Returns [`TaxError::UnsupportedEntityType`] if the profile's entity
    /// type has no scenario. Nothing is computed in that case.
    pub fn calculate(
        &self,
        profile: &BusinessProfile,
    ) -> Result<ScenarioResult, TaxError> {
        // Stage 1
        let scenario = EntityScenario::resolve(profile.entity_type())?;
        let warnings = scenario.advisories(profile);
        let net_revenue = profile.net_revenue();
        let self_employment_income = scenario.self_employment_income_base(profile, self.config);
        debug!(
            entity_type = %profile.entity_type(),
            net_revenue = %net_revenue,
            self_employment_income = %self_employment_income,
            "Resolved income bases"
        );

        // Stage 2
        let social_security = SocialSecurityTax::new(self.config).calculate(self_employment_income);
        let medicare = MedicareTax::new(self.config).calculate(self_employment_income);
        debug!(
            social_security = %social_security,
            medicare = %medicare,
            "Computed self-employment tax"
        );

        // Stage 3
        let deduction_calculator = DeductionCalculator::new(self.config);
        let se_tax_deduction = deduction_calculator.self_employment_share(social_security)
            + deduction_calculator.self_employment_share(medicare);
        let qbi_income_base = scenario.qbi_income_base(profile, se_tax_deduction);
        let deductions =
            deduction_calculator.calculate(profile, social_security, medicare, qbi_income_base);
        debug!(
            qbi_income_base = %qbi_income_base,
            total_deductions = %deductions.total(),
            "Computed deductions"
        );

        // Stage 4
        let taxable_income = self.taxable_income(net_revenue, deductions.total());
        debug!(taxable_income = %taxable_income, "Computed taxable income");

        // Stage 5
        let liabilities = LiabilityResult {
            social_security,
            medicare,
            federal: BracketIncomeTax::federal(self.config).calculate(taxable_income),
            state: BracketIncomeTax::state(self.config).calculate(taxable_income),
            local: LocalTax::new(self.config, profile.local_tax_rate()).calculate(taxable_income),
        };
        let total_tax = liabilities.total();
        debug!(total_tax = %total_tax, "Computed total liability");

        let estimated_tax_payments = profile.estimated_tax_payments().unwrap_or(Decimal::ZERO);

        Ok(ScenarioResult {
            name: profile.name().map(str::to_owned),
            entity_type: profile.entity_type(),
            filing_status: profile.filing_status(),
            gross_revenue: profile.gross_revenue(),
            expenses: profile.expenses(),
            net_revenue,
            salary: profile.salary(),
            distributions: profile.distributions(),
            self_employment_income,
            qbi_income_base,
            deductions,
            taxable_income,
            liabilities,
            total_tax,
            estimated_tax_payments,
            tax_owed: self.tax_owed(total_tax, estimated_tax_payments),
            effective_tax_rate: self.effective_tax_rate(total_tax, net_revenue),
            warnings,
        })
    }

    fn taxable_income(
        &self,
        net_revenue: Decimal,
        total_deductions: Decimal,
    ) -> Decimal {
        max(net_revenue - total_deductions, Decimal::ZERO)
    }

    fn tax_owed(
        &self,
        total_tax: Decimal,
        estimated_tax_payments: Decimal,
    ) -> Decimal {
        max(total_tax - estimated_tax_payments, Decimal::ZERO)
    }

    /// Total tax as a percentage of net revenue; zero without a profit.
    fn effective_tax_rate(
        &self,
        total_tax: Decimal,
        net_revenue: Decimal,
    ) -> Decimal {
        if net_revenue <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        total_tax / net_revenue * dec!(100)
    }
}
