use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::FilingStatus;

/// Standard deduction amounts for one tax year, keyed by filing status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardDeductionTable {
    pub single: Decimal,
    pub married_filing_jointly: Decimal,
    pub head_of_household: Decimal,
}

impl StandardDeductionTable {
    pub fn amount_for(
        &self,
        filing_status: FilingStatus,
    ) -> Decimal {
        match filing_status {
            FilingStatus::Single => self.single,
            FilingStatus::MarriedFilingJointly => self.married_filing_jointly,
            FilingStatus::HeadOfHousehold => self.head_of_household,
        }
    }
}
