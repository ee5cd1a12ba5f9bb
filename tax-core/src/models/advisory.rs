use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Non-fatal observations about a profile.
///
/// Advisories never change the computed figures; the zero floors in the
/// pipeline absorb their numeric consequences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdvisoryWarning {
    /// Expenses exceed gross revenue, so net revenue is negative.
    ExpensesExceedRevenue { net_revenue: Decimal },

    /// An S corporation shows a profit but pays its owner no salary.
    SCorpWithoutSalary { net_revenue: Decimal },

    /// An S corporation pays more salary than it nets.
    SCorpSalaryExceedsNetRevenue {
        salary: Decimal,
        net_revenue: Decimal,
    },
}

impl fmt::Display for AdvisoryWarning {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::ExpensesExceedRevenue { net_revenue } => {
                write!(f, "expenses exceed gross revenue (net revenue {net_revenue})")
            }
            Self::SCorpWithoutSalary { net_revenue } => write!(
                f,
                "S corporation has net revenue {net_revenue} but pays no salary"
            ),
            Self::SCorpSalaryExceedsNetRevenue {
                salary,
                net_revenue,
            } => write!(
                f,
                "S corporation salary {salary} exceeds net revenue {net_revenue}"
            ),
        }
    }
}
