use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{ConfigError, EntityType};

/// Errors raised by the tax engine.
///
/// Every variant is a precondition failure detected before the pipeline
/// computes anything; the calculation stages themselves cannot fail.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxError {
    /// A monetary input or rate override is outside its allowed range.
    #[error("invalid {field}: {value} (must be {expected})")]
    InvalidInput {
        field: &'static str,
        value: Decimal,
        expected: &'static str,
    },

    /// The entity type text does not name any recognized entity type.
    #[error("unknown entity type '{0}'")]
    UnknownEntityType(String),

    /// The entity type is recognized but has no scenario resolver.
    #[error("no tax scenario available for entity type {0}")]
    UnsupportedEntityType(EntityType),

    /// The filing status text does not name a supported filing status.
    #[error("unknown filing status '{0}'")]
    UnknownFilingStatus(String),

    /// The tax-year configuration failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
