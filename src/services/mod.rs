//! Service layer for the atlas crawler.
//!
//! This module contains the business logic for:
//! - Identifier loading (`load_identifiers`)
//! - Locator construction (`QueryBuilder`)
//! - Response retrieval (`AtlasFetcher`, `HttpFetcher`)
//! - Response parsing (`ResponseParser`)
//! - Batch aggregation (`BatchAggregator`)

mod aggregator;
mod fetcher;
mod loader;
mod parser;
mod query;

#[cfg(test)]
pub(crate) mod fixtures;

pub use aggregator::BatchAggregator;
pub use fetcher::{AtlasFetcher, HttpFetcher};
pub use loader::{IdentifierSet, load_identifiers, parse_identifier_list, read_identifier_file};
pub use parser::{ParsedResponse, ResponseParser};
pub use query::QueryBuilder;
