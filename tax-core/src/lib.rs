pub mod calculations;
pub mod error;
pub mod models;

pub use calculations::TaxPipeline;
pub use error::TaxError;
pub use models::*;
