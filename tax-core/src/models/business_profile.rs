//! Validated financial inputs for one business.
//!
//! A [`BusinessProfile`] can only be obtained from
//! [`BusinessProfileBuilder::build`], which rejects negative or oversized
//! money amounts and out-of-range rate overrides. Once built it is immutable; derived
//! figures such as net revenue are computed on demand.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{AdvisoryWarning, EntityType, FilingStatus};
use crate::error::TaxError;

/// Largest accepted money amount (one quadrillion dollars). Keeps every sum
/// and product the pipeline forms well inside `Decimal` range.
pub const MAX_AMOUNT: Decimal = dec!(1000000000000000);

/// How the home office deduction was supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HomeOffice {
    /// A dollar amount, deducted as given.
    Amount(Decimal),
    /// Office area for the simplified per-square-foot method.
    SquareFeet(Decimal),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessProfile {
    name: Option<String>,
    entity_type: EntityType,
    filing_status: FilingStatus,
    gross_revenue: Decimal,
    expenses: Decimal,
    salary: Decimal,
    retirement_contributions: Option<Decimal>,
    health_insurance_premiums: Option<Decimal>,
    home_office: Option<HomeOffice>,
    other_deductions: Option<Decimal>,
    estimated_tax_payments: Option<Decimal>,
    local_tax_rate: Option<Decimal>,
}

impl BusinessProfile {
    pub fn builder(
        entity_type: EntityType,
        filing_status: FilingStatus,
    ) -> BusinessProfileBuilder {
        BusinessProfileBuilder::new(entity_type, filing_status)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn entity_type(&self) -> EntityType {
        self.entity_type
    }

    pub fn filing_status(&self) -> FilingStatus {
        self.filing_status
    }

    pub fn gross_revenue(&self) -> Decimal {
        self.gross_revenue
    }

    pub fn expenses(&self) -> Decimal {
        self.expenses
    }

    pub fn salary(&self) -> Decimal {
        self.salary
    }

    pub fn retirement_contributions(&self) -> Option<Decimal> {
        self.retirement_contributions
    }

    pub fn health_insurance_premiums(&self) -> Option<Decimal> {
        self.health_insurance_premiums
    }

    pub fn home_office(&self) -> Option<HomeOffice> {
        self.home_office
    }

    pub fn other_deductions(&self) -> Option<Decimal> {
        self.other_deductions
    }

    pub fn estimated_tax_payments(&self) -> Option<Decimal> {
        self.estimated_tax_payments
    }

    pub fn local_tax_rate(&self) -> Option<Decimal> {
        self.local_tax_rate
    }

    /// Gross revenue minus expenses. May be negative.
    pub fn net_revenue(&self) -> Decimal {
        self.gross_revenue - self.expenses
    }

    /// Net revenue left after the owner's salary. Only S corporations
    /// distribute profit; every other entity type reports zero.
    pub fn distributions(&self) -> Decimal {
        match self.entity_type {
            EntityType::SCorp => self.net_revenue() - self.salary,
            _ => Decimal::ZERO,
        }
    }

    /// Profile-level advisories. Entity-specific advisories come from the
    /// scenario resolver.
    pub fn advisories(&self) -> Vec<AdvisoryWarning> {
        let mut advisories = Vec::new();
        if self.expenses > self.gross_revenue {
            advisories.push(AdvisoryWarning::ExpensesExceedRevenue {
                net_revenue: self.net_revenue(),
            });
        }
        advisories
    }
}

/// Builder for [`BusinessProfile`]. Amounts default to zero and optional
/// deduction items default to unset.
#[derive(Debug, Clone)]
pub struct BusinessProfileBuilder {
    profile: BusinessProfile,
}

impl BusinessProfileBuilder {
    pub fn new(
        entity_type: EntityType,
        filing_status: FilingStatus,
    ) -> Self {
        Self {
            profile: BusinessProfile {
                name: None,
                entity_type,
                filing_status,
                gross_revenue: Decimal::ZERO,
                expenses: Decimal::ZERO,
                salary: Decimal::ZERO,
                retirement_contributions: None,
                health_insurance_premiums: None,
                home_office: None,
                other_deductions: None,
                estimated_tax_payments: None,
                local_tax_rate: None,
            },
        }
    }

    pub fn name(
        mut self,
        name: impl Into<String>,
    ) -> Self {
        self.profile.name = Some(name.into());
        self
    }

    pub fn gross_revenue(
        mut self,
        amount: Decimal,
    ) -> Self {
        self.profile.gross_revenue = amount;
        self
    }

    pub fn expenses(
        mut self,
        amount: Decimal,
    ) -> Self {
        self.profile.expenses = amount;
        self
    }

    /// Reasonable salary paid to the owner (S corporations).
    pub fn salary(
        mut self,
        amount: Decimal,
    ) -> Self {
        self.profile.salary = amount;
        self
    }

    pub fn retirement_contributions(
        mut self,
        amount: Decimal,
    ) -> Self {
        self.profile.retirement_contributions = Some(amount);
        self
    }

    pub fn health_insurance_premiums(
        mut self,
        amount: Decimal,
    ) -> Self {
        self.profile.health_insurance_premiums = Some(amount);
        self
    }

    pub fn home_office_deduction(
        mut self,
        amount: Decimal,
    ) -> Self {
        self.profile.home_office = Some(HomeOffice::Amount(amount));
        self
    }

    pub fn home_office_square_feet(
        mut self,
        area: Decimal,
    ) -> Self {
        self.profile.home_office = Some(HomeOffice::SquareFeet(area));
        self
    }

    pub fn other_deductions(
        mut self,
        amount: Decimal,
    ) -> Self {
        self.profile.other_deductions = Some(amount);
        self
    }

    pub fn estimated_tax_payments(
        mut self,
        amount: Decimal,
    ) -> Self {
        self.profile.estimated_tax_payments = Some(amount);
        self
    }

    /// Overrides the default local tax rate (a fraction, e.g. `0.05`).
    pub fn local_tax_rate(
        mut self,
        rate: Decimal,
    ) -> Self {
        self.profile.local_tax_rate = Some(rate);
        self
    }

    /// Validates the inputs and returns the profile.
    ///
    /// # Errors
    ///
    /// Returns [`TaxError::InvalidInput`] if any amount is negative or above
    /// [`MAX_AMOUNT`], or the local rate override is outside [0, 1].
    /// Expenses exceeding revenue is logged as a warning, not rejected.
    pub fn build(self) -> Result<BusinessProfile, TaxError> {
        let p = self.profile;

        let amounts = [
            ("gross_revenue", Some(p.gross_revenue)),
            ("expenses", Some(p.expenses)),
            ("salary", Some(p.salary)),
            ("retirement_contributions", p.retirement_contributions),
            ("health_insurance_premiums", p.health_insurance_premiums),
            (
                "home_office",
                p.home_office.map(|h| match h {
                    HomeOffice::Amount(v) | HomeOffice::SquareFeet(v) => v,
                }),
            ),
            ("other_deductions", p.other_deductions),
            ("estimated_tax_payments", p.estimated_tax_payments),
        ];
        for (field, value) in amounts {
            let Some(value) = value else { continue };
            if value < Decimal::ZERO {
                return Err(TaxError::InvalidInput {
                    field,
                    value,
                    expected: "non-negative",
                });
            }
            if value > MAX_AMOUNT {
                return Err(TaxError::InvalidInput {
                    field,
                    value,
                    expected: "at most 1000000000000000",
                });
            }
        }

        if let Some(rate) = p
            .local_tax_rate
            .filter(|r| *r < Decimal::ZERO || *r > Decimal::ONE)
        {
            return Err(TaxError::InvalidInput {
                field: "local_tax_rate",
                value: rate,
                expected: "between 0 and 1",
            });
        }

        if p.expenses > p.gross_revenue {
            warn!(
                gross_revenue = %p.gross_revenue,
                expenses = %p.expenses,
                "Expenses exceed gross revenue; net revenue is negative"
            );
        }

        Ok(p)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn sole_proprietor() -> BusinessProfileBuilder {
        BusinessProfile::builder(EntityType::SoleProprietor, FilingStatus::Single)
    }

    #[test]
    fn build_accepts_zero_inputs() {
        let profile = sole_proprietor().build().unwrap();

        assert_eq!(profile.net_revenue(), dec!(0));
        assert_eq!(profile.retirement_contributions(), None);
        assert!(profile.advisories().is_empty());
    }

    #[test]
    fn build_rejects_negative_revenue() {
        let result = sole_proprietor().gross_revenue(dec!(-1)).build();

        assert_eq!(
            result,
            Err(TaxError::InvalidInput {
                field: "gross_revenue",
                value: dec!(-1),
                expected: "non-negative",
            })
        );
    }

    #[test]
    fn build_rejects_negative_expenses() {
        let result = sole_proprietor().expenses(dec!(-50)).build();

        assert!(matches!(
            result,
            Err(TaxError::InvalidInput {
                field: "expenses",
                ..
            })
        ));
    }

    #[test]
    fn build_rejects_negative_salary() {
        let result = BusinessProfile::builder(EntityType::SCorp, FilingStatus::Single)
            .salary(dec!(-10))
            .build();

        assert!(matches!(
            result,
            Err(TaxError::InvalidInput { field: "salary", .. })
        ));
    }

    #[test]
    fn build_rejects_negative_optional_item() {
        let result = sole_proprietor().home_office_square_feet(dec!(-5)).build();

        assert!(matches!(
            result,
            Err(TaxError::InvalidInput {
                field: "home_office",
                ..
            })
        ));
    }

    #[test]
    fn build_accepts_amount_at_maximum() {
        let profile = sole_proprietor()
            .gross_revenue(MAX_AMOUNT)
            .retirement_contributions(MAX_AMOUNT)
            .other_deductions(MAX_AMOUNT)
            .build()
            .unwrap();

        assert_eq!(profile.net_revenue(), MAX_AMOUNT);
    }

    #[test]
    fn build_rejects_oversized_deduction_items() {
        let result = sole_proprietor()
            .retirement_contributions(dec!(50000000000000000000000000000))
            .other_deductions(dec!(50000000000000000000000000000))
            .build();

        assert_eq!(
            result,
            Err(TaxError::InvalidInput {
                field: "retirement_contributions",
                value: dec!(50000000000000000000000000000),
                expected: "at most 1000000000000000",
            })
        );
    }

    #[test]
    fn build_rejects_oversized_s_corp_expenses() {
        let result = BusinessProfile::builder(EntityType::SCorp, FilingStatus::Single)
            .expenses(dec!(50000000000000000000000000000))
            .salary(dec!(50000000000000000000000000000))
            .build();

        assert!(matches!(
            result,
            Err(TaxError::InvalidInput {
                field: "expenses",
                ..
            })
        ));
    }

    #[test]
    fn build_rejects_local_rate_above_one() {
        let result = sole_proprietor().local_tax_rate(dec!(5)).build();

        assert_eq!(
            result,
            Err(TaxError::InvalidInput {
                field: "local_tax_rate",
                value: dec!(5),
                expected: "between 0 and 1",
            })
        );
    }

    #[test]
    fn expenses_above_revenue_is_advisory_only() {
        let profile = sole_proprietor()
            .gross_revenue(dec!(1000))
            .expenses(dec!(1500))
            .build()
            .unwrap();

        assert_eq!(profile.net_revenue(), dec!(-500));
        assert_eq!(
            profile.advisories(),
            vec![AdvisoryWarning::ExpensesExceedRevenue {
                net_revenue: dec!(-500)
            }]
        );
    }

    #[test]
    fn distributions_are_net_revenue_less_salary_for_s_corp() {
        let profile = BusinessProfile::builder(EntityType::SCorp, FilingStatus::Single)
            .gross_revenue(dec!(200000))
            .expenses(dec!(100000))
            .salary(dec!(80000))
            .build()
            .unwrap();

        assert_eq!(profile.distributions(), dec!(20000));
    }

    #[test]
    fn distributions_are_zero_for_sole_proprietor() {
        let profile = sole_proprietor()
            .gross_revenue(dec!(200000))
            .expenses(dec!(100000))
            .build()
            .unwrap();

        assert_eq!(profile.distributions(), dec!(0));
    }
}
