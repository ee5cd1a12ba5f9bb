//! Deduction calculators.
//!
//! [`DeductionCalculator`] holds the tax-year figures and exposes one method
//! per deduction kind. Which kinds a business may claim depends on its
//! entity type, see [`DeductionKind::applies_to`].

use rust_decimal::Decimal;

use super::common::max;
use crate::models::{
    BusinessProfile, DeductionResult, EntityType, FilingStatus, HomeOffice, TaxYearConfig,
};

/// The deductions a business may claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeductionKind {
    /// Standard deduction for the filing status.
    Standard,
    /// Deductible half of Social Security tax.
    SocialSecurity,
    /// Deductible half of Medicare tax.
    Medicare,
    /// Qualified business income deduction.
    QualifiedBusinessIncome,
    /// Retirement plan contributions.
    Retirement,
    /// Self-employed health insurance premiums.
    HealthInsurance,
    /// Home office, by amount or by area.
    HomeOffice,
    /// Any other deductible amount.
    Other,
}

impl DeductionKind {
    /// Whether a business of `entity_type` may claim this deduction.
    ///
    /// The self-employment tax halves and QBI are limited to pass-through
    /// entities; everything else applies to all entity types.
    pub fn applies_to(
        &self,
        entity_type: EntityType,
    ) -> bool {
        match self {
            Self::SocialSecurity | Self::Medicare | Self::QualifiedBusinessIncome => {
                entity_type.is_pass_through()
            }
            Self::Standard
            | Self::Retirement
            | Self::HealthInsurance
            | Self::HomeOffice
            | Self::Other => true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DeductionCalculator<'a> {
    config: &'a TaxYearConfig,
}

impl<'a> DeductionCalculator<'a> {
    pub fn new(config: &'a TaxYearConfig) -> Self {
        Self { config }
    }

    /// Builds the full deduction breakdown for a profile.
    ///
    /// `social_security_tax` and `medicare_tax` are the self-employment tax
    /// amounts already computed for the profile; `qbi_base` comes from the
    /// entity scenario.
    pub fn calculate(
        &self,
        profile: &BusinessProfile,
        social_security_tax: Decimal,
        medicare_tax: Decimal,
        qbi_base: Decimal,
    ) -> DeductionResult {
        let entity_type = profile.entity_type();
        let claim = |kind: DeductionKind, amount: Decimal| {
            if kind.applies_to(entity_type) {
                amount
            } else {
                Decimal::ZERO
            }
        };

        DeductionResult {
            standard: claim(
                DeductionKind::Standard,
                self.standard(profile.filing_status()),
            ),
            social_security: claim(
                DeductionKind::SocialSecurity,
                self.self_employment_share(social_security_tax),
            ),
            medicare: claim(
                DeductionKind::Medicare,
                self.self_employment_share(medicare_tax),
            ),
            qualified_business_income: claim(
                DeductionKind::QualifiedBusinessIncome,
                self.qualified_business_income(qbi_base),
            ),
            retirement: claim(
                DeductionKind::Retirement,
                self.pass_through(profile.retirement_contributions()),
            ),
            health_insurance: claim(
                DeductionKind::HealthInsurance,
                self.pass_through(profile.health_insurance_premiums()),
            ),
            home_office: claim(
                DeductionKind::HomeOffice,
                self.home_office(profile.home_office()),
            ),
            other: claim(
                DeductionKind::Other,
                self.pass_through(profile.other_deductions()),
            ),
        }
    }

    pub fn standard(
        &self,
        filing_status: FilingStatus,
    ) -> Decimal {
        self.config.standard_deduction.amount_for(filing_status)
    }

    /// Deductible half of a self-employment tax amount.
    pub fn self_employment_share(
        &self,
        tax_paid: Decimal,
    ) -> Decimal {
        max(tax_paid, Decimal::ZERO) * self.config.se_deduction_rate
    }

    /// QBI deduction on `base`; a negative base yields nothing.
    pub fn qualified_business_income(
        &self,
        base: Decimal,
    ) -> Decimal {
        max(base, Decimal::ZERO) * self.config.qbi_deduction_rate
    }

    /// Simplified method when given square footage: area, capped at the
    /// maximum, times the per-foot rate.
    pub fn home_office(
        &self,
        home_office: Option<HomeOffice>,
    ) -> Decimal {
        let rule = &self.config.home_office;
        match home_office {
            None => Decimal::ZERO,
            Some(HomeOffice::Amount(amount)) => amount,
            Some(HomeOffice::SquareFeet(area)) => {
                area.min(rule.max_square_feet) * rule.rate_per_square_foot
            }
        }
    }

    fn pass_through(
        &self,
        amount: Option<Decimal>,
    ) -> Decimal {
        amount.unwrap_or(Decimal::ZERO)
    }
}
