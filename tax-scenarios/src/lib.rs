//! Batch layer over the tax engine: load scenarios, run them in parallel,
//! compare entity types and render the results.

pub mod batch;
pub mod comparison;
pub mod demo;
pub mod loader;
pub mod report;

pub use batch::run_batch;
pub use comparison::{ComparisonRow, compare};
pub use demo::demo_profiles;
pub use loader::{ScenarioLoaderError, load_from_file, load_from_reader, load_from_str};
pub use report::{ReportFormat, write_report};
