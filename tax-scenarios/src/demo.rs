//! The reference scenario set: sole proprietors at five revenue levels and
//! S corporations at the three levels that support a $150,000 salary.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tax_core::{BusinessProfile, EntityType, FilingStatus, TaxError};

const SOLE_PROPRIETOR_REVENUE: [Decimal; 5] = [
    dec!(100000),
    dec!(200000),
    dec!(300000),
    dec!(400000),
    dec!(500000),
];

const S_CORP_REVENUE: [Decimal; 3] = [dec!(300000), dec!(400000), dec!(500000)];

const S_CORP_SALARY: Decimal = dec!(150000);

/// Builds the demo profiles. Expenses are half of gross revenue throughout.
///
/// # Errors
///
/// Never fails for the built-in figures; the `Result` comes from profile
/// validation.
pub fn demo_profiles(filing_status: FilingStatus) -> Result<Vec<BusinessProfile>, TaxError> {
    let sole_proprietors = SOLE_PROPRIETOR_REVENUE
        .iter()
        .map(|revenue| (EntityType::SoleProprietor, *revenue, Decimal::ZERO));
    let s_corps = S_CORP_REVENUE
        .iter()
        .map(|revenue| (EntityType::SCorp, *revenue, S_CORP_SALARY));

    sole_proprietors
        .chain(s_corps)
        .map(|(entity_type, revenue, salary)| {
            BusinessProfile::builder(entity_type, filing_status)
                .gross_revenue(revenue)
                .expenses(revenue / dec!(2))
                .salary(salary)
                .build()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn demo_profiles_cover_both_entities() {
        let profiles = demo_profiles(FilingStatus::MarriedFilingJointly).unwrap();

        assert_eq!(profiles.len(), 8);
        assert_eq!(
            profiles
                .iter()
                .filter(|p| p.entity_type() == EntityType::SCorp)
                .count(),
            3
        );
    }

    #[test]
    fn demo_expenses_are_half_of_revenue() {
        let profiles = demo_profiles(FilingStatus::Single).unwrap();

        for profile in &profiles {
            assert_eq!(profile.expenses() * dec!(2), profile.gross_revenue());
            assert_eq!(profile.filing_status(), FilingStatus::Single);
        }
    }

    #[test]
    fn demo_s_corps_pay_fixed_salary() {
        let profiles = demo_profiles(FilingStatus::MarriedFilingJointly).unwrap();

        let salaries: Vec<_> = profiles
            .iter()
            .filter(|p| p.entity_type() == EntityType::SCorp)
            .map(|p| p.salary())
            .collect();
        assert_eq!(salaries, vec![dec!(150000); 3]);
    }
}
