//! Tax calculators and the pipeline that sequences them.

use rust_decimal::Decimal;

pub mod brackets;
pub mod common;
pub mod deductions;
pub mod entity;
pub mod liabilities;
pub mod pipeline;

pub use deductions::{DeductionCalculator, DeductionKind};
pub use entity::EntityScenario;
pub use liabilities::{BracketIncomeTax, LocalTax, MedicareTax, SocialSecurityTax};
pub use pipeline::TaxPipeline;

/// Maps an income base to a tax amount.
pub trait TaxCalculator {
    fn calculate(
        &self,
        base: Decimal,
    ) -> Decimal;
}
