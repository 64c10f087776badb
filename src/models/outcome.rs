// src/models/outcome.rs

//! Accumulators produced by one batch run.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::models::{GeneRecord, TableSchema};

/// Marker line written before each raw audit entry.
pub const AUDIT_MARKER: &str = "NewEntry";

/// Successfully parsed records, one row per gene, in processing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateTable {
    schema: TableSchema,
    rows: Vec<GeneRecord>,
}

impl AggregateTable {
    /// Create an empty table; the schema is fixed from here on.
    pub fn new(schema: TableSchema) -> Self {
        Self {
            schema,
            rows: Vec::new(),
        }
    }

    /// Append a record that populates exactly the schema's columns.
    pub fn push(&mut self, record: GeneRecord) -> Result<()> {
        if !record.conforms_to(&self.schema) {
            return Err(AppError::validation(format!(
                "record {} has {} metric columns, schema expects {}",
                record.id,
                record.metric_count(),
                self.schema.metrics().len()
            )));
        }
        self.rows.push(record);
        Ok(())
    }

    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    pub fn rows(&self) -> &[GeneRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Default for AggregateTable {
    fn default() -> Self {
        Self::new(TableSchema::fixed())
    }
}

/// An identifier that could not be resolved, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedIdentifier {
    pub identifier: String,
    pub reason: String,
}

/// Identifiers whose fetch or parse failed, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorList {
    entries: Vec<FailedIdentifier>,
}

impl ErrorList {
    pub fn push(&mut self, identifier: impl Into<String>, reason: &AppError) {
        self.entries.push(FailedIdentifier {
            identifier: identifier.into(),
            reason: reason.to_string(),
        });
    }

    pub fn entries(&self) -> &[FailedIdentifier] {
        &self.entries
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.identifier.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Concatenated raw response text, one marked entry per fetched identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawAudit {
    text: String,
    entries: usize,
}

impl RawAudit {
    /// Append `NewEntry\n<raw>\n\n`.
    pub fn append(&mut self, raw: &str) {
        self.text.push_str(AUDIT_MARKER);
        self.text.push('\n');
        self.text.push_str(raw);
        self.text.push_str("\n\n");
        self.entries += 1;
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn entry_count(&self) -> usize {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }
}

/// Counters for one batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Responses whose tissue rows differed from the fixed set
    pub tissue_mismatches: usize,
}

impl RunStats {
    pub fn started() -> Self {
        let now = Utc::now();
        Self {
            start_time: now,
            end_time: now,
            attempted: 0,
            succeeded: 0,
            failed: 0,
            tissue_mismatches: 0,
        }
    }

    pub fn elapsed_secs(&self) -> i64 {
        (self.end_time - self.start_time).num_seconds()
    }
}

/// Everything a batch run hands to the result writer.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub table: AggregateTable,
    pub errors: ErrorList,
    pub audit: RawAudit,
    pub stats: RunStats,
}
