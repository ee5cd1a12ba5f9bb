//! Side-by-side comparison of entity types at equal net revenue.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use tax_core::ScenarioResult;

/// A result with its liability difference against the opposite entity type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonRow {
    pub result: ScenarioResult,
    /// `total_tax` minus the matched result's `total_tax`; `None` when no
    /// result of the opposite entity type has the same net revenue.
    pub liability_difference: Option<Decimal>,
    /// The difference as a percentage of the matched total, zero when the
    /// matched total is zero.
    pub liability_percent_difference: Option<Decimal>,
}

/// Pairs each result with the first result of the opposite entity type at
/// exactly the same net revenue, then sorts by net revenue ascending.
/// Results with equal net revenue keep their input order.
pub fn compare(results: Vec<ScenarioResult>) -> Vec<ComparisonRow> {
    let differences: Vec<_> = results
        .iter()
        .map(|result| {
            let opposite = result.entity_type.opposite()?;
            let matched = results.iter().find(|other| {
                other.entity_type == opposite && other.net_revenue == result.net_revenue
            })?;
            Some(difference(result.total_tax, matched.total_tax))
        })
        .collect();

    let mut rows: Vec<_> = results
        .into_iter()
        .zip(differences)
        .map(|(result, difference)| ComparisonRow {
            result,
            liability_difference: difference.map(|(amount, _)| amount),
            liability_percent_difference: difference.map(|(_, percent)| percent),
        })
        .collect();

    rows.sort_by(|a, b| a.result.net_revenue.cmp(&b.result.net_revenue));
    rows
}

fn difference(
    total: Decimal,
    matched_total: Decimal,
) -> (Decimal, Decimal) {
    let amount = total - matched_total;
    let percent = if matched_total.is_zero() {
        Decimal::ZERO
    } else {
        amount / matched_total * dec!(100)
    };
    (amount, percent)
}
