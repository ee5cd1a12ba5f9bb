use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AdvisoryWarning, EntityType, FilingStatus};

/// Amounts produced by the liability calculators, one per tax kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiabilityResult {
    pub social_security: Decimal,
    pub medicare: Decimal,
    pub federal: Decimal,
    pub state: Decimal,
    pub local: Decimal,
}

impl LiabilityResult {
    /// Social Security plus Medicare.
    pub fn self_employment_tax(&self) -> Decimal {
        self.social_security + self.medicare
    }

    /// Federal, state and local income taxes.
    pub fn income_tax(&self) -> Decimal {
        self.federal + self.state + self.local
    }

    pub fn total(&self) -> Decimal {
        self.self_employment_tax() + self.income_tax()
    }
}

/// Amounts produced by the deduction calculators, one per deduction kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionResult {
    pub standard: Decimal,
    pub social_security: Decimal,
    pub medicare: Decimal,
    pub qualified_business_income: Decimal,
    pub retirement: Decimal,
    pub health_insurance: Decimal,
    pub home_office: Decimal,
    pub other: Decimal,
}

impl DeductionResult {
    /// The deductible half of self-employment tax (both shares).
    pub fn self_employment_tax(&self) -> Decimal {
        self.social_security + self.medicare
    }

    /// Retirement, health insurance, home office and other deductions.
    pub fn pass_through(&self) -> Decimal {
        self.retirement + self.health_insurance + self.home_office + self.other
    }

    pub fn total(&self) -> Decimal {
        self.standard
            + self.self_employment_tax()
            + self.qualified_business_income
            + self.pass_through()
    }
}

/// The output of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub name: Option<String>,
    pub entity_type: EntityType,
    pub filing_status: FilingStatus,

    // Inputs echoed back
    pub gross_revenue: Decimal,
    pub expenses: Decimal,
    pub net_revenue: Decimal,
    pub salary: Decimal,
    pub distributions: Decimal,

    // Intermediate bases
    pub self_employment_income: Decimal,
    pub qbi_income_base: Decimal,

    pub deductions: DeductionResult,
    pub taxable_income: Decimal,
    pub liabilities: LiabilityResult,
    pub total_tax: Decimal,

    // Payments
    pub estimated_tax_payments: Decimal,
    pub tax_owed: Decimal,
    pub effective_tax_rate: Decimal,

    pub warnings: Vec<AdvisoryWarning>,
}

/// Named numeric fields of a [`ScenarioResult`], in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultField {
    GrossRevenue,
    Expenses,
    NetRevenue,
    GrossSalary,
    GrossDistributions,
    StandardDeduction,
    SocialSecurityDeduction,
    MedicareDeduction,
    QbiDeduction,
    TaxablePersonalIncome,
    SocialSecurityTax,
    MedicareTax,
    FederalTax,
    StateTax,
    LocalTax,
    TotalTax,
}

impl ResultField {
    pub const ALL: [ResultField; 16] = [
        Self::GrossRevenue,
        Self::Expenses,
        Self::NetRevenue,
        Self::GrossSalary,
        Self::GrossDistributions,
        Self::StandardDeduction,
        Self::SocialSecurityDeduction,
        Self::MedicareDeduction,
        Self::QbiDeduction,
        Self::TaxablePersonalIncome,
        Self::SocialSecurityTax,
        Self::MedicareTax,
        Self::FederalTax,
        Self::StateTax,
        Self::LocalTax,
        Self::TotalTax,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::GrossRevenue => "Gross Revenue",
            Self::Expenses => "Expenses",
            Self::NetRevenue => "Net Revenue",
            Self::GrossSalary => "Gross Salary",
            Self::GrossDistributions => "Gross Distributions",
            Self::StandardDeduction => "Standard Deduction",
            Self::SocialSecurityDeduction => "Social Security Deduction",
            Self::MedicareDeduction => "Medicare Deduction",
            Self::QbiDeduction => "QBI Deduction",
            Self::TaxablePersonalIncome => "Taxable Personal Income",
            Self::SocialSecurityTax => "Social Security Tax",
            Self::MedicareTax => "Medicare Tax",
            Self::FederalTax => "Federal Tax",
            Self::StateTax => "State Tax",
            Self::LocalTax => "Local Tax",
            Self::TotalTax => "Total Tax",
        }
    }
}

impl ScenarioResult {
    pub fn value(
        &self,
        field: ResultField,
    ) -> Decimal {
        match field {
            ResultField::GrossRevenue => self.gross_revenue,
            ResultField::Expenses => self.expenses,
            ResultField::NetRevenue => self.net_revenue,
            ResultField::GrossSalary => self.salary,
            ResultField::GrossDistributions => self.distributions,
            ResultField::StandardDeduction => self.deductions.standard,
            ResultField::SocialSecurityDeduction => self.deductions.social_security,
            ResultField::MedicareDeduction => self.deductions.medicare,
            ResultField::QbiDeduction => self.deductions.qualified_business_income,
            ResultField::TaxablePersonalIncome => self.taxable_income,
            ResultField::SocialSecurityTax => self.liabilities.social_security,
            ResultField::MedicareTax => self.liabilities.medicare,
            ResultField::FederalTax => self.liabilities.federal,
            ResultField::StateTax => self.liabilities.state,
            ResultField::LocalTax => self.liabilities.local,
            ResultField::TotalTax => self.total_tax,
        }
    }

    /// `(label, value)` pairs for every numeric field, in report order.
    pub fn fields(&self) -> Vec<(&'static str, Decimal)> {
        ResultField::ALL
            .iter()
            .map(|field| (field.label(), self.value(*field)))
            .collect()
    }
}
