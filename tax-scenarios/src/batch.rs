//! Runs many profiles through the pipeline at once.

use rayon::prelude::*;
use tax_core::{BusinessProfile, ScenarioResult, TaxError, TaxPipeline};
use tracing::{debug, info};

/// Calculates every profile on the rayon pool.
///
/// Pipeline runs share nothing but the borrowed configuration, so they need
/// no coordination. Results come back in the same order as `profiles`.
///
/// # Errors
///
/// Returns a [`TaxError`] if any profile fails; no partial results are
/// returned.
pub fn run_batch(
    pipeline: &TaxPipeline<'_>,
    profiles: &[BusinessProfile],
) -> Result<Vec<ScenarioResult>, TaxError> {
    info!(scenarios = profiles.len(), "Running scenario batch");

    profiles
        .par_iter()
        .map(|profile| {
            debug!(
                entity_type = %profile.entity_type(),
                net_revenue = %profile.net_revenue(),
                "Calculating scenario"
            );
            pipeline.calculate(profile)
        })
        .collect()
}
