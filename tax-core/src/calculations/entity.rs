//! Entity-specific income bases.
//!
//! The pipeline asks an [`EntityScenario`] for the two figures that depend on
//! the legal form of the business: the base for self-employment tax and the
//! base for the QBI deduction. The scenario is chosen once per calculation.

use rust_decimal::Decimal;
use tracing::warn;

use super::common::max;
use crate::error::TaxError;
use crate::models::{AdvisoryWarning, BusinessProfile, EntityType, TaxYearConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityScenario {
    /// Owner pays self-employment tax on all net earnings.
    SoleProprietor,
    /// Owner pays employment tax on salary only; distributions are exempt.
    SCorp,
}

impl EntityScenario {
    /// Selects the scenario for an entity type.
    ///
    /// # Errors
    ///
    /// Returns [`TaxError::UnsupportedEntityType`] for LLCs and C corporations.
    pub fn resolve(entity_type: EntityType) -> Result<Self, TaxError> {
        match entity_type {
            EntityType::SoleProprietor => Ok(Self::SoleProprietor),
            EntityType::SCorp => Ok(Self::SCorp),
            other => Err(TaxError::UnsupportedEntityType(other)),
        }
    }

    /// Income subject to Social Security and Medicare.
    ///
    /// For a sole proprietor this is net revenue (floored at zero) scaled by
    /// the net earnings factor; for an S corporation it is the salary.
    pub fn self_employment_income_base(
        &self,
        profile: &BusinessProfile,
        config: &TaxYearConfig,
    ) -> Decimal {
        match self {
            Self::SoleProprietor => {
                max(profile.net_revenue(), Decimal::ZERO) * config.net_earnings_factor()
            }
            Self::SCorp => profile.salary(),
        }
    }

    /// Income eligible for the QBI deduction.
    ///
    /// A sole proprietor's base is reduced by the deductible half of
    /// self-employment tax. An S corporation's base is its distributions,
    /// which may be negative.
    pub fn qbi_income_base(
        &self,
        profile: &BusinessProfile,
        self_employment_tax_deduction: Decimal,
    ) -> Decimal {
        match self {
            Self::SoleProprietor => max(
                profile.net_revenue() - self_employment_tax_deduction,
                Decimal::ZERO,
            ),
            Self::SCorp => profile.distributions(),
        }
    }

    /// Profile advisories plus the ones specific to this entity type.
    /// Entity-specific advisories are logged here.
    pub fn advisories(
        &self,
        profile: &BusinessProfile,
    ) -> Vec<AdvisoryWarning> {
        let mut advisories = profile.advisories();
        if *self != Self::SCorp {
            return advisories;
        }

        let net_revenue = profile.net_revenue();
        let salary = profile.salary();

        if salary <= Decimal::ZERO && net_revenue > Decimal::ZERO {
            warn!(
                net_revenue = %net_revenue,
                "S corporation has positive net revenue but pays no salary"
            );
            advisories.push(AdvisoryWarning::SCorpWithoutSalary { net_revenue });
        }
        if salary > net_revenue {
            warn!(
                salary = %salary,
                net_revenue = %net_revenue,
                "S corporation salary exceeds net revenue"
            );
            advisories.push(AdvisoryWarning::SCorpSalaryExceedsNetRevenue {
                salary,
                net_revenue,
            });
        }
        advisories
    }
}
