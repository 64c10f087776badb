// src/models/mod.rs

//! Domain models for the atlas crawler.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod outcome;
mod record;
mod schema;

// Re-export all public types
pub use config::{AtlasConfig, Config, LoggingConfig, OutputConfig, ParseMode, ParsingConfig};
pub use outcome::{
    AUDIT_MARKER, AggregateTable, BatchOutcome, ErrorList, FailedIdentifier, RawAudit, RunStats,
};
pub use record::{GeneRecord, RawTable, TissueMismatch};
pub use schema::{
    ANCHOR_TISSUE, IDENTITY_COLUMNS, Stage, TISSUES, TableSchema, TissueStageMetric, column_key,
    expected_tissues,
};
