//! Result writers for batch outcomes.
//!
//! A run produces three artifacts sharing one prefix:
//!
//! ```text
//! {prefix}.txt                   # Wide FPKM table (tab-delimited)
//! {prefix}-errors.txt            # Failed identifiers, one per line
//! {prefix}-rawAtlasTables.txt    # Raw responses, one NewEntry block each
//! {prefix}-summary.json          # Run statistics (optional)
//! ```

pub mod local;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{AggregateTable, BatchOutcome, ErrorList};

// Re-export for convenience
pub use local::LocalStorage;

/// Where a write put each artifact.
#[derive(Debug, Clone)]
pub struct WriteSummary {
    pub table_location: String,
    pub errors_location: String,
    pub audit_location: String,
    pub summary_location: Option<String>,
    pub row_count: usize,
    pub error_count: usize,
}

/// Trait for outcome storage backends.
#[async_trait]
pub trait ResultStorage: Send + Sync {
    /// Write the table, error list and raw audit. The error artifact is
    /// written even when the list is empty.
    async fn write_outcome(&self, outcome: &BatchOutcome) -> Result<WriteSummary>;
}

/// Tab-delimited table: schema header row, then one row per record.
pub fn render_table(table: &AggregateTable) -> String {
    let schema = table.schema();
    let mut out = schema.columns().join("\t");
    out.push('\n');
    for record in table.rows() {
        out.push_str(&record.values(schema).join("\t"));
        out.push('\n');
    }
    out
}

/// One failed identifier per line.
pub fn render_errors(errors: &ErrorList) -> String {
    errors.identifiers().map(|id| format!("{id}\n")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::{GeneRecord, TableSchema};

    #[test]
    fn test_render_empty_table_has_header_only() {
        let rendered = render_table(&AggregateTable::default());
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("ID\tanno\tsym\tname\tmale_Whole_body\t"));
        assert_eq!(lines[0].split('\t').count(), TableSchema::fixed().len());
    }

    #[test]
    fn test_render_table_rows_follow_schema() {
        let schema = TableSchema::fixed();
        let mut record = GeneRecord::new("FBgn1", "CG1", "abc", "alpha");
        for (i, metric) in schema.metrics().iter().enumerate() {
            record.insert_metric(metric.column_key(), i.to_string());
        }
        let mut table = AggregateTable::new(schema);
        table.push(record).unwrap();

        let rendered = render_table(&table);
        let row: Vec<&str> = rendered.lines().nth(1).unwrap().split('\t').collect();
        assert_eq!(&row[..5], &["FBgn1", "CG1", "abc", "alpha", "0"]);
        assert_eq!(row.last(), Some(&"59"));
    }

    #[test]
    fn test_render_errors() {
        let mut errors = ErrorList::default();
        assert_eq!(render_errors(&errors), "");
        errors.push("FBgn2", &AppError::structural("x"));
        errors.push("FBgn5", &AppError::structural("y"));
        assert_eq!(render_errors(&errors), "FBgn2\nFBgn5\n");
    }
}
