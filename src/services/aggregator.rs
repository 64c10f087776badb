// src/services/aggregator.rs

//! Batch aggregator.
//!
//! Drives the per-identifier loop sequentially. Each identifier is fetched,
//! audited and parsed on its own; a failure at any step lands in the error
//! list and the loop moves on.

use std::time::Duration;

use chrono::Utc;

use crate::error::Result;
use crate::models::{
    AggregateTable, BatchOutcome, Config, ErrorList, GeneRecord, RawAudit, RunStats, TableSchema,
};
use crate::services::{AtlasFetcher, QueryBuilder, ResponseParser};

const DEFAULT_PROGRESS_INTERVAL: usize = 100;

/// Runs one batch of identifiers against the atlas.
pub struct BatchAggregator<'f> {
    fetcher: &'f dyn AtlasFetcher,
    query: QueryBuilder,
    parser: ResponseParser,
    progress_interval: usize,
    request_delay: Duration,
}

impl<'f> BatchAggregator<'f> {
    pub fn new(fetcher: &'f dyn AtlasFetcher, query: QueryBuilder, parser: ResponseParser) -> Self {
        Self {
            fetcher,
            query,
            parser,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            request_delay: Duration::ZERO,
        }
    }

    /// Build an aggregator from the atlas, parsing and logging settings.
    pub fn from_config(config: &Config, fetcher: &'f dyn AtlasFetcher) -> Self {
        Self::new(
            fetcher,
            QueryBuilder::new(&config.atlas.base_url),
            ResponseParser::new(config.parsing.mode),
        )
        .with_progress_interval(config.logging.progress_interval)
        .with_request_delay(Duration::from_millis(config.atlas.request_delay_ms))
    }

    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval.max(1);
        self
    }

    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    /// Attempt every identifier exactly once, in the given order.
    ///
    /// Never fails: per-identifier errors are collected in the outcome's
    /// error list.
    pub async fn run(&self, identifiers: &[String]) -> BatchOutcome {
        let mut table = AggregateTable::new(TableSchema::fixed());
        let mut errors = ErrorList::default();
        let mut audit = RawAudit::default();
        let mut stats = RunStats::started();

        for (count, id) in identifiers.iter().enumerate() {
            if count % self.progress_interval == 0 {
                log::info!("Gene {}/{}: {}", count, identifiers.len(), id);
            }
            if count > 0 && !self.request_delay.is_zero() {
                tokio::time::sleep(self.request_delay).await;
            }

            stats.attempted += 1;
            let result = self
                .process(id, &mut audit, &mut stats)
                .await
                .and_then(|record| table.push(record));

            if let Err(error) = result {
                log::warn!("Error on {}: {}", id, error);
                errors.push(id.as_str(), &error);
            }
        }

        stats.succeeded = table.len();
        stats.failed = errors.len();
        stats.end_time = Utc::now();

        BatchOutcome {
            table,
            errors,
            audit,
            stats,
        }
    }

    /// Fetch, audit and parse a single identifier.
    async fn process(
        &self,
        id: &str,
        audit: &mut RawAudit,
        stats: &mut RunStats,
    ) -> Result<GeneRecord> {
        let url = self.query.locator(id);
        log::debug!("Fetching {}", url);

        let text = self.fetcher.fetch(&url).await?;
        audit.append(&text);

        let parsed = self.parser.parse(&text)?;
        if parsed.mismatch.is_some() {
            stats.tissue_mismatches += 1;
        }
        Ok(parsed.record)
    }
}
