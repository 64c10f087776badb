// src/services/parser.rs

//! Atlas response parser.
//!
//! A response is a tab-delimited block with no fixed schema: a few header
//! rows describing the gene, then one row per tissue starting at the
//! `Whole body` anchor row. The header rows carry the identity fields in
//! their last column; tissue rows carry FPKM values at fixed offsets.

use std::collections::{BTreeSet, HashMap};

use crate::error::{AppError, Result};
use crate::models::{
    ANCHOR_TISSUE, GeneRecord, IDENTITY_COLUMNS, ParseMode, RawTable, TableSchema, TissueMismatch,
    expected_tissues,
};

/// A parsed record plus any tissue-set mismatch tolerated on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedResponse {
    pub record: GeneRecord,
    pub mismatch: Option<TissueMismatch>,
}

/// Turns raw atlas text into [`GeneRecord`]s.
#[derive(Debug, Clone)]
pub struct ResponseParser {
    mode: ParseMode,
    schema: TableSchema,
}

/// Tissue rows keyed by their first field.
struct BodyIndex<'t, 'a> {
    rows: HashMap<&'a str, &'t [&'a str]>,
    duplicated: BTreeSet<&'a str>,
}

impl ResponseParser {
    pub fn new(mode: ParseMode) -> Self {
        Self {
            mode,
            schema: TableSchema::fixed(),
        }
    }

    pub fn mode(&self) -> ParseMode {
        self.mode
    }

    /// Parse one response body.
    ///
    /// Fails when the anchor row or a header row is missing, when a tissue
    /// row needed for a metric is absent or too short, and (strict mode only)
    /// when the tissue rows differ from the fixed tissue set.
    pub fn parse(&self, text: &str) -> Result<ParsedResponse> {
        let table = RawTable::parse(text);
        let body_start = table.position_of(ANCHOR_TISSUE).ok_or_else(|| {
            AppError::structural(format!("expected anchor row '{ANCHOR_TISSUE}' not found"))
        })?;
        let (header, body) = table.rows().split_at(body_start);

        let mut record = Self::identity(header)?;
        let index = Self::index_body(body);

        let mismatch = Self::check_tissues(&index);
        if let Some(mismatch) = &mismatch {
            match self.mode {
                ParseMode::Strict => return Err(AppError::SchemaMismatch(mismatch.clone())),
                ParseMode::Lenient => {
                    log::warn!("{}", Self::mismatch_report(&record.id, mismatch, &index));
                }
            }
        }

        for metric in self.schema.metrics() {
            let row = index
                .rows
                .get(metric.tissue)
                .ok_or_else(|| AppError::MissingTissue(metric.tissue.to_string()))?;
            let offset = metric.stage.offset();
            let value = row.get(offset).ok_or_else(|| AppError::ShortRow {
                tissue: metric.tissue.to_string(),
                stage: metric.stage.to_string(),
                offset,
                len: row.len(),
            })?;
            record.insert_metric(metric.column_key(), *value);
        }

        Ok(ParsedResponse { record, mismatch })
    }

    /// Identity fields from the last column of the first four header rows.
    fn identity(header: &[Vec<&str>]) -> Result<GeneRecord> {
        if header.len() < IDENTITY_COLUMNS.len() {
            return Err(AppError::structural(format!(
                "header block has {} rows, expected at least {}",
                header.len(),
                IDENTITY_COLUMNS.len()
            )));
        }
        let last = |i: usize| header[i].last().copied().unwrap_or_default();
        Ok(GeneRecord::new(last(0), last(1), last(2), last(3)))
    }

    /// Key body rows by tissue name. Blank rows are skipped; a repeated
    /// tissue keeps its last row.
    fn index_body<'t, 'a>(body: &'t [Vec<&'a str>]) -> BodyIndex<'t, 'a> {
        let mut rows = HashMap::new();
        let mut duplicated = BTreeSet::new();

        for row in body {
            if row.iter().all(|field| field.trim().is_empty()) {
                continue;
            }
            let tissue = row[0];
            if rows.insert(tissue, row.as_slice()).is_some() {
                duplicated.insert(tissue);
            }
        }

        BodyIndex { rows, duplicated }
    }

    /// Warning text for a tolerated mismatch: the diff, then the expected
    /// and observed tissue sets.
    fn mismatch_report(id: &str, mismatch: &TissueMismatch, index: &BodyIndex<'_, '_>) -> String {
        let observed: BTreeSet<&str> = index.rows.keys().copied().collect();
        format!(
            "Tissue set mismatch for {id}: {mismatch}; expected {:?}; observed {:?}",
            expected_tissues(),
            observed
        )
    }

    fn check_tissues(index: &BodyIndex<'_, '_>) -> Option<TissueMismatch> {
        let expected: BTreeSet<&str> = expected_tissues();
        let observed: BTreeSet<&str> = index.rows.keys().copied().collect();

        let mismatch = TissueMismatch {
            missing: expected
                .difference(&observed)
                .map(|t| t.to_string())
                .collect(),
            unexpected: observed
                .difference(&expected)
                .map(|t| t.to_string())
                .collect(),
            duplicated: index.duplicated.iter().map(|t| t.to_string()).collect(),
        };

        (!mismatch.is_empty()).then_some(mismatch)
    }
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::new(ParseMode::default())
    }
}
