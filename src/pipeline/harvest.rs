// src/pipeline/harvest.rs

//! Gene expression harvesting pipeline.

use crate::error::Result;
use crate::models::{Config, RunStats};
use crate::services::{AtlasFetcher, BatchAggregator, IdentifierSet};
use crate::storage::{ResultStorage, WriteSummary};
use crate::utils::log;

/// What a harvest run did and where it wrote.
#[derive(Debug, Clone)]
pub struct HarvestReport {
    pub stats: RunStats,
    pub write: WriteSummary,
}

/// Fetch every identifier, then write the table, errors and raw audit.
///
/// Only output failures are returned as errors; per-gene failures end up in
/// the error artifact.
pub async fn run_harvest(
    config: &Config,
    identifiers: IdentifierSet,
    fetcher: &dyn AtlasFetcher,
    storage: &dyn ResultStorage,
) -> Result<HarvestReport> {
    log::header("FlyAtlas2 harvest");

    let ordered = identifiers.into_ordered(config.output.sort_identifiers);
    if ordered.is_empty() {
        log::warn("No gene identifiers supplied; output tables will be empty");
    }

    log::step(
        1,
        2,
        &format!(
            "Fetching {} genes ({:?} parsing)",
            ordered.len(),
            config.parsing.mode
        ),
    );
    let outcome = BatchAggregator::from_config(config, fetcher)
        .run(&ordered)
        .await;

    log::step(2, 2, "Writing results");
    let write = storage.write_outcome(&outcome).await?;
    log::sub_item(&format!("Table: {}", write.table_location));
    log::sub_item(&format!("Errors: {}", write.errors_location));
    log::sub_item(&format!("Raw tables: {}", write.audit_location));
    if let Some(location) = &write.summary_location {
        log::sub_item(&format!("Summary: {}", location));
    }

    let stats = outcome.stats;
    log::summary(
        "Harvest complete",
        &[
            ("Attempted", stats.attempted.to_string()),
            ("Succeeded", stats.succeeded.to_string()),
            ("Failed", stats.failed.to_string()),
            ("Tissue mismatches", stats.tissue_mismatches.to_string()),
            ("Elapsed (s)", stats.elapsed_secs().to_string()),
        ],
    );

    Ok(HarvestReport { stats, write })
}
