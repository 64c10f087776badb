// src/models/schema.rs

//! Fixed tissue × stage metric set and the output column schema.

use std::collections::BTreeSet;
use std::fmt;

/// First field of the row that starts the body block.
pub const ANCHOR_TISSUE: &str = "Whole body";

/// Tissues reported by the atlas, in output order.
pub const TISSUES: [&str; 20] = [
    "Whole body",
    "Head",
    "Eye",
    "Brain / CNS",
    "Thoracicoabdominal ganglion",
    "Crop",
    "Midgut",
    "Hindgut",
    "Malpighian Tubules",
    "Fat body",
    "Salivary gland",
    "Heart",
    "Trachea",
    "Ovary",
    "Virgin Spermatheca",
    "Mated Spermatheca",
    "Testis",
    "Accessory glands",
    "Carcass",
    "Rectal pad",
];

/// Identity columns, taken from the header block in this order.
pub const IDENTITY_COLUMNS: [&str; 4] = ["ID", "anno", "sym", "name"];

/// Developmental stage / sex of an FPKM measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    Male,
    Female,
    Larval,
}

impl Stage {
    /// All stages in column order.
    pub const ALL: [Stage; 3] = [Stage::Male, Stage::Female, Stage::Larval];

    /// Label used as the column key prefix.
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Male => "male",
            Stage::Female => "female",
            Stage::Larval => "larval",
        }
    }

    /// Field index of this stage's FPKM value within a tissue row.
    pub fn offset(&self) -> usize {
        match self {
            Stage::Male => 1,
            Stage::Female => 4,
            Stage::Larval => 9,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One FPKM column: a (tissue, stage) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TissueStageMetric {
    pub tissue: &'static str,
    pub stage: Stage,
}

impl TissueStageMetric {
    /// Every metric, stage outer loop and tissue inner loop.
    pub fn all() -> impl Iterator<Item = Self> {
        Stage::ALL.into_iter().flat_map(|stage| {
            TISSUES
                .into_iter()
                .map(move |tissue| Self { tissue, stage })
        })
    }

    /// Output column name for this metric.
    pub fn column_key(&self) -> String {
        column_key(self.stage, self.tissue)
    }
}

/// Build a column key such as `male_Brain_CNS`.
///
/// The tissue name is split on whitespace, lone `/` tokens are dropped and the
/// rest is joined with underscores.
pub fn column_key(stage: Stage, tissue: &str) -> String {
    let tokens: Vec<&str> = tissue.split_whitespace().filter(|t| *t != "/").collect();
    format!("{}_{}", stage.label(), tokens.join("_"))
}

/// The set of tissue names a well-formed response must contain.
pub fn expected_tissues() -> BTreeSet<&'static str> {
    TISSUES.into_iter().collect()
}

/// Ordered column list of the aggregate table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    columns: Vec<String>,
    metrics: Vec<TissueStageMetric>,
}

impl TableSchema {
    /// The identity + metric schema compiled into the crate.
    pub fn fixed() -> Self {
        let metrics: Vec<TissueStageMetric> = TissueStageMetric::all().collect();
        let columns = IDENTITY_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .chain(metrics.iter().map(TissueStageMetric::column_key))
            .collect();

        Self { columns, metrics }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn metrics(&self) -> &[TissueStageMetric] {
        &self.metrics
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl Default for TableSchema {
    fn default() -> Self {
        Self::fixed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_key_strips_slash_token() {
        assert_eq!(column_key(Stage::Male, "Brain / CNS"), "male_Brain_CNS");
        assert_eq!(
            column_key(Stage::Larval, "Thoracicoabdominal ganglion"),
            "larval_Thoracicoabdominal_ganglion"
        );
        assert_eq!(column_key(Stage::Female, "Head"), "female_Head");
    }

    #[test]
    fn test_stage_offsets() {
        assert_eq!(Stage::Male.offset(), 1);
        assert_eq!(Stage::Female.offset(), 4);
        assert_eq!(Stage::Larval.offset(), 9);
    }

    #[test]
    fn test_schema_layout() {
        let schema = TableSchema::fixed();
        assert_eq!(schema.len(), IDENTITY_COLUMNS.len() + TISSUES.len() * Stage::ALL.len());
        assert_eq!(&schema.columns()[..4], &["ID", "anno", "sym", "name"]);

        // Stage is the outer loop, tissue the inner one.
        assert_eq!(schema.columns()[4], "male_Whole_body");
        assert_eq!(schema.columns()[5], "male_Head");
        assert_eq!(schema.columns()[4 + TISSUES.len()], "female_Whole_body");
        assert_eq!(schema.columns().last().unwrap(), "larval_Rectal_pad");
    }

    #[test]
    fn test_schema_columns_are_unique() {
        let schema = TableSchema::fixed();
        let unique: BTreeSet<&String> = schema.columns().iter().collect();
        assert_eq!(unique.len(), schema.len());
    }

    #[test]
    fn test_anchor_is_first_tissue() {
        assert_eq!(TISSUES[0], ANCHOR_TISSUE);
        assert!(expected_tissues().contains(ANCHOR_TISSUE));
    }
}
