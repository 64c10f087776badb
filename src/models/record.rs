// src/models/record.rs

//! Raw response tables and the gene records parsed from them.

use std::collections::BTreeMap;
use std::fmt;

use crate::models::TableSchema;

/// A response body split into rows of tab-separated fields.
///
/// Fields borrow from the response text; no row or column count is assumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable<'a> {
    rows: Vec<Vec<&'a str>>,
}

impl<'a> RawTable<'a> {
    /// Split text on line breaks, then each line on tabs.
    ///
    /// Surrounding whitespace of the whole text is trimmed first; a trailing
    /// carriage return on a line is dropped by the line split.
    pub fn parse(text: &'a str) -> Self {
        let rows = text
            .trim()
            .lines()
            .map(|line| line.split('\t').collect())
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<&'a str>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the first row whose first field equals `label` exactly.
    pub fn position_of(&self, label: &str) -> Option<usize> {
        self.rows
            .iter()
            .position(|row| row.first().is_some_and(|first| *first == label))
    }
}

/// Validated output of parsing one atlas response.
///
/// Identity fields plus one opaque FPKM value per metric column. Values are
/// kept as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneRecord {
    pub id: String,
    pub annotation: String,
    pub symbol: String,
    pub name: String,
    metrics: BTreeMap<String, String>,
}

impl GeneRecord {
    pub fn new(
        id: impl Into<String>,
        annotation: impl Into<String>,
        symbol: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            annotation: annotation.into(),
            symbol: symbol.into(),
            name: name.into(),
            metrics: BTreeMap::new(),
        }
    }

    pub fn insert_metric(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.metrics.insert(column.into(), value.into());
    }

    pub fn metric(&self, column: &str) -> Option<&str> {
        self.metrics.get(column).map(String::as_str)
    }

    pub fn metric_count(&self) -> usize {
        self.metrics.len()
    }

    /// Look up any column, identity or metric.
    pub fn get(&self, column: &str) -> Option<&str> {
        match column {
            "ID" => Some(&self.id),
            "anno" => Some(&self.annotation),
            "sym" => Some(&self.symbol),
            "name" => Some(&self.name),
            _ => self.metric(column),
        }
    }

    /// All populated column keys: identity columns first, then metrics.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        ["ID", "anno", "sym", "name"]
            .into_iter()
            .chain(self.metrics.keys().map(String::as_str))
    }

    /// True when the record populates exactly the schema's columns.
    pub fn conforms_to(&self, schema: &TableSchema) -> bool {
        self.metrics.len() == schema.metrics().len()
            && schema.columns().iter().all(|c| self.get(c).is_some())
    }

    /// Values in schema column order; absent columns become empty strings.
    pub fn values<'s>(&'s self, schema: &'s TableSchema) -> Vec<&'s str> {
        schema
            .columns()
            .iter()
            .map(|c| self.get(c).unwrap_or(""))
            .collect()
    }
}

/// Difference between the observed body rows and the fixed tissue set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TissueMismatch {
    /// Expected tissues with no body row
    pub missing: Vec<String>,
    /// Body rows naming a tissue outside the fixed set
    pub unexpected: Vec<String>,
    /// Tissues with more than one body row
    pub duplicated: Vec<String>,
}

impl TissueMismatch {
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.unexpected.is_empty() && self.duplicated.is_empty()
    }
}

impl fmt::Display for TissueMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if !self.missing.is_empty() {
            parts.push(format!("missing [{}]", self.missing.join(", ")));
        }
        if !self.unexpected.is_empty() {
            parts.push(format!("unexpected [{}]", self.unexpected.join(", ")));
        }
        if !self.duplicated.is_empty() {
            parts.push(format!("duplicated [{}]", self.duplicated.join(", ")));
        }
        if parts.is_empty() {
            f.write_str("none")
        } else {
            f.write_str(&parts.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_table_splits_rows_and_fields() {
        let table = RawTable::parse("a\tb\r\nc\n\nd\te\tf\n");
        assert_eq!(table.len(), 4);
        assert_eq!(table.rows()[0], vec!["a", "b"]);
        assert_eq!(table.rows()[1], vec!["c"]);
        assert_eq!(table.rows()[2], vec![""]);
        assert_eq!(table.rows()[3], vec!["d", "e", "f"]);
    }

    #[test]
    fn test_raw_table_position_of_is_exact() {
        let table = RawTable::parse("Whole body2\tx\nWhole body\ty");
        assert_eq!(table.position_of("Whole body"), Some(1));
        assert_eq!(table.position_of("Head"), None);
    }

    #[test]
    fn test_blank_text_has_no_rows() {
        assert!(RawTable::parse("").is_empty());
        assert!(RawTable::parse("  \n ").is_empty());
    }

    #[test]
    fn test_record_get_and_values() {
        let schema = TableSchema::fixed();
        let mut record = GeneRecord::new("FBgn0000001", "CG1", "abc", "alpha");
        record.insert_metric("male_Head", "3.2");

        assert_eq!(record.get("ID"), Some("FBgn0000001"));
        assert_eq!(record.get("male_Head"), Some("3.2"));
        assert_eq!(record.get("female_Head"), None);
        assert!(!record.conforms_to(&schema));

        let values = record.values(&schema);
        assert_eq!(values.len(), schema.len());
        assert_eq!(values[0], "FBgn0000001");
        assert_eq!(values[5], "3.2");
        assert_eq!(values[6], "");
    }

    #[test]
    fn test_mismatch_display() {
        let mismatch = TissueMismatch {
            missing: vec!["Head".into()],
            unexpected: vec!["Wing".into()],
            duplicated: vec![],
        };
        assert_eq!(mismatch.to_string(), "missing [Head]; unexpected [Wing]");
        assert!(TissueMismatch::default().is_empty());
    }
}
