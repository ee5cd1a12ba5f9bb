mod advisory;
mod business_profile;
mod entity_type;
mod filing_status;
mod scenario_result;
mod standard_deduction;
mod tax_bracket;
mod tax_year_config;

pub use advisory::AdvisoryWarning;
pub use business_profile::{BusinessProfile, BusinessProfileBuilder, HomeOffice, MAX_AMOUNT};
pub use entity_type::EntityType;
pub use filing_status::FilingStatus;
pub use scenario_result::{DeductionResult, LiabilityResult, ResultField, ScenarioResult};
pub use standard_deduction::StandardDeductionTable;
pub use tax_bracket::{MarginalBracketSchedule, ScheduleError, TaxBracket};
pub use tax_year_config::{ConfigError, HomeOfficeRule, TaxYearConfig};
