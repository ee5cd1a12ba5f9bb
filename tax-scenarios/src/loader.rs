//! CSV loader for business scenarios.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter. Whitespace
//! around values is trimmed. Amounts are parsed as exact decimals, never
//! through floating point. Optional columns may be left out of the header
//! entirely or left empty on a row.
//!
//! | Column                      | Required | Notes                                   |
//! |-----------------------------|----------|-----------------------------------------|
//! | `entity_type`               | yes      | `sole-proprietor`, `s-corp`, `llc`, `c-corp` (case and separators ignored) |
//! | `filing_status`             | yes      | `S`, `MFJ`, `HOH` or the full name      |
//! | `gross_revenue`             | yes      | decimal                                 |
//! | `expenses`                  | yes      | decimal                                 |
//! | `salary`                    | yes      | decimal, `0` for sole proprietors       |
//! | `name`                      | no       | free text                               |
//! | `retirement_contributions`  | no       | decimal                                 |
//! | `health_insurance_premiums` | no       | decimal                                 |
//! | `home_office_deduction`     | no       | decimal dollar amount                   |
//! | `home_office_square_feet`   | no       | decimal, ignored if an amount is given  |
//! | `other_deductions`          | no       | decimal                                 |
//! | `estimated_tax_payments`    | no       | decimal                                 |
//! | `local_tax_rate`            | no       | fraction, e.g. `0.032`                  |
//!
//! ### Example
//!
//! ```csv
//! name,entity_type,filing_status,gross_revenue,expenses,salary
//! Consulting,Sole Proprietor,MFJ,100000,50000,0
//! Consulting,S-Corp,MFJ,300000,150000,150000
//! ```

use std::io::Read;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{BusinessProfile, EntityType, FilingStatus, TaxError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScenarioLoaderError {
    /// The CSV is structurally invalid, a required column is missing, or a
    /// number failed to parse.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// A row was read but does not form a valid profile. `row` is 1-based,
    /// not counting the header.
    #[error("row {row}: {source}")]
    InvalidRow { row: usize, source: TaxError },
}

#[derive(Debug, Deserialize)]
struct ScenarioRow {
    entity_type: String,
    filing_status: String,
    #[serde(with = "rust_decimal::serde::str")]
    gross_revenue: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    expenses: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    salary: Decimal,
    #[serde(default)]
    name: Option<String>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    retirement_contributions: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    health_insurance_premiums: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    home_office_deduction: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    home_office_square_feet: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    other_deductions: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    estimated_tax_payments: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    local_tax_rate: Option<Decimal>,
}

impl ScenarioRow {
    fn into_profile(self) -> Result<BusinessProfile, TaxError> {
        let entity_type: EntityType = self.entity_type.parse()?;
        let filing_status: FilingStatus = self.filing_status.parse()?;

        let mut builder = BusinessProfile::builder(entity_type, filing_status)
            .gross_revenue(self.gross_revenue)
            .expenses(self.expenses)
            .salary(self.salary);

        if let Some(name) = self.name.filter(|n| !n.is_empty()) {
            builder = builder.name(name);
        }
        if let Some(amount) = self.retirement_contributions {
            builder = builder.retirement_contributions(amount);
        }
        if let Some(amount) = self.health_insurance_premiums {
            builder = builder.health_insurance_premiums(amount);
        }
        match (self.home_office_deduction, self.home_office_square_feet) {
            (Some(amount), _) => builder = builder.home_office_deduction(amount),
            (None, Some(area)) => builder = builder.home_office_square_feet(area),
            (None, None) => {}
        }
        if let Some(amount) = self.other_deductions {
            builder = builder.other_deductions(amount);
        }
        if let Some(amount) = self.estimated_tax_payments {
            builder = builder.estimated_tax_payments(amount);
        }
        if let Some(rate) = self.local_tax_rate {
            builder = builder.local_tax_rate(rate);
        }

        builder.build()
    }
}

/// Parses scenarios from any reader. Profiles are returned in file order.
///
/// # Errors
///
/// * [`ScenarioLoaderError::Parse`] if the CSV cannot be deserialised.
/// * [`ScenarioLoaderError::InvalidRow`] if a row names an unknown entity
///   type or filing status, or fails profile validation.
pub fn load_from_reader<R: Read>(reader: R) -> Result<Vec<BusinessProfile>, ScenarioLoaderError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    reader
        .deserialize::<ScenarioRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            row.into_profile()
                .map_err(|source| ScenarioLoaderError::InvalidRow {
                    row: idx + 1,
                    source,
                })
        })
        .collect()
}

pub fn load_from_str(input: &str) -> Result<Vec<BusinessProfile>, ScenarioLoaderError> {
    load_from_reader(input.as_bytes())
}

pub fn load_from_file(path: &Path) -> Result<Vec<BusinessProfile>, ScenarioLoaderError> {
    let file = std::fs::File::open(path).map_err(|source| ScenarioLoaderError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_from_reader(file)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tax_core::HomeOffice;

    use super::*;

    const MINIMAL_CSV: &str = "\
entity_type,filing_status,gross_revenue,expenses,salary
sole-proprietor,MFJ,100000,50000,0
";

    const FULL_CSV: &str = "\
name,entity_type,filing_status,gross_revenue,expenses,salary,retirement_contributions,health_insurance_premiums,home_office_deduction,home_office_square_feet,other_deductions,estimated_tax_payments,local_tax_rate
Studio,S Corporation,HOH,400000,200000,150000,10000,6000,,250,500,20000,0.01
";

    // -----------------------------------------------------------------------
    // Successful parsing
    // -----------------------------------------------------------------------

    #[test]
    fn test_minimal_csv_parses_required_fields() {
        let profiles = load_from_str(MINIMAL_CSV).expect("should parse minimal CSV");

        assert_eq!(profiles.len(), 1);
        let p = &profiles[0];
        assert_eq!(p.entity_type(), EntityType::SoleProprietor);
        assert_eq!(p.filing_status(), FilingStatus::MarriedFilingJointly);
        assert_eq!(p.gross_revenue(), dec!(100000));
        assert_eq!(p.expenses(), dec!(50000));
        assert_eq!(p.salary(), dec!(0));
        assert_eq!(p.name(), None);
        assert_eq!(p.retirement_contributions(), None);
        assert_eq!(p.home_office(), None);
        assert_eq!(p.local_tax_rate(), None);
    }

    #[test]
    fn test_full_csv_all_fields_populated() {
        let profiles = load_from_str(FULL_CSV).expect("should parse full CSV");

        let p = &profiles[0];
        assert_eq!(p.name(), Some("Studio"));
        assert_eq!(p.entity_type(), EntityType::SCorp);
        assert_eq!(p.filing_status(), FilingStatus::HeadOfHousehold);
        assert_eq!(p.retirement_contributions(), Some(dec!(10000)));
        assert_eq!(p.health_insurance_premiums(), Some(dec!(6000)));
        assert_eq!(p.home_office(), Some(HomeOffice::SquareFeet(dec!(250))));
        assert_eq!(p.other_deductions(), Some(dec!(500)));
        assert_eq!(p.estimated_tax_payments(), Some(dec!(20000)));
        assert_eq!(p.local_tax_rate(), Some(dec!(0.01)));
    }

    #[test]
    fn test_amounts_keep_full_precision() {
        let csv = "\
entity_type,filing_status,gross_revenue,expenses,salary,other_deductions,local_tax_rate
sole-proprietor,S,123456789.123456789,0.000000000000000001,0,98765.432109876543,0.012345678901234567
";
        let profiles = load_from_str(csv).expect("should parse");

        let p = &profiles[0];
        assert_eq!(p.gross_revenue(), dec!(123456789.123456789));
        assert_eq!(p.expenses(), dec!(0.000000000000000001));
        assert_eq!(p.other_deductions(), Some(dec!(98765.432109876543)));
        assert_eq!(p.local_tax_rate(), Some(dec!(0.012345678901234567)));
    }

    #[test]
    fn test_home_office_amount_wins_over_square_feet() {
        let csv = "\
entity_type,filing_status,gross_revenue,expenses,salary,home_office_deduction,home_office_square_feet
sole-proprietor,S,1,1,0,900,100
";
        let profiles = load_from_str(csv).expect("should parse");

        assert_eq!(profiles[0].home_office(), Some(HomeOffice::Amount(dec!(900))));
    }

    #[test]
    fn test_rows_keep_file_order() {
        let csv = "\
entity_type,filing_status,gross_revenue,expenses,salary
s-corp,MFJ,300000,150000,150000
sole-proprietor,S,100000,50000,0
";
        let profiles = load_from_str(csv).expect("should parse");

        assert_eq!(profiles[0].entity_type(), EntityType::SCorp);
        assert_eq!(profiles[1].entity_type(), EntityType::SoleProprietor);
    }

    #[test]
    fn test_header_only_returns_empty_vec() {
        let csv = "entity_type,filing_status,gross_revenue,expenses,salary\n";

        let profiles = load_from_str(csv).expect("header-only CSV is valid");

        assert!(profiles.is_empty());
    }

    // -----------------------------------------------------------------------
    // Errors
    // -----------------------------------------------------------------------

    #[test]
    fn test_unknown_entity_type_reports_row() {
        let csv = "\
entity_type,filing_status,gross_revenue,expenses,salary
sole-proprietor,S,1,1,0
partnership,S,1,1,0
";
        match load_from_str(csv).unwrap_err() {
            ScenarioLoaderError::InvalidRow { row, source } => {
                assert_eq!(row, 2);
                assert_eq!(source, TaxError::UnknownEntityType("partnership".into()));
            }
            other => panic!("expected InvalidRow, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_filing_status_reports_row() {
        let csv = "\
entity_type,filing_status,gross_revenue,expenses,salary
s-corp,MFS,1,1,0
";
        match load_from_str(csv).unwrap_err() {
            ScenarioLoaderError::InvalidRow { row, source } => {
                assert_eq!(row, 1);
                assert_eq!(source, TaxError::UnknownFilingStatus("MFS".into()));
            }
            other => panic!("expected InvalidRow, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_amount_is_invalid_row() {
        let csv = "\
entity_type,filing_status,gross_revenue,expenses,salary
sole-proprietor,S,-10,0,0
";
        let err = load_from_str(csv).unwrap_err();

        assert!(matches!(
            err,
            ScenarioLoaderError::InvalidRow {
                row: 1,
                source: TaxError::InvalidInput {
                    field: "gross_revenue",
                    ..
                },
            }
        ));
    }

    #[test]
    fn test_missing_required_column_returns_parse_error() {
        let csv = "entity_type,filing_status,gross_revenue,expenses\nsole-proprietor,S,1,1\n";

        assert!(matches!(
            load_from_str(csv).unwrap_err(),
            ScenarioLoaderError::Parse(_)
        ));
    }

    #[test]
    fn test_non_numeric_amount_returns_parse_error() {
        let csv = "entity_type,filing_status,gross_revenue,expenses,salary\nsole-proprietor,S,lots,1,0\n";

        assert!(matches!(
            load_from_str(csv).unwrap_err(),
            ScenarioLoaderError::Parse(_)
        ));
    }

    #[test]
    fn test_missing_file_returns_io_error() {
        let err = load_from_file(Path::new("does/not/exist.csv")).unwrap_err();

        assert!(matches!(err, ScenarioLoaderError::Io { .. }));
    }
}
