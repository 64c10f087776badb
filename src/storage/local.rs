//! Local filesystem storage implementation.
//!
//! Every artifact path is the output prefix plus a fixed suffix, so a prefix
//! such as `out/run1` writes `out/run1.txt`, `out/run1-errors.txt` and so on.
//! Missing parent directories are created.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use tokio::io::AsyncWriteExt;

use crate::error::Result;
use crate::models::{BatchOutcome, FailedIdentifier, RunStats};
use crate::storage::{ResultStorage, WriteSummary, render_errors, render_table};

const TABLE_SUFFIX: &str = ".txt";
const ERRORS_SUFFIX: &str = "-errors.txt";
const AUDIT_SUFFIX: &str = "-rawAtlasTables.txt";
const SUMMARY_SUFFIX: &str = "-summary.json";

/// Run statistics plus the reason each identifier failed.
#[derive(Debug, Serialize)]
struct RunSummary<'a> {
    stats: &'a RunStats,
    failures: &'a [FailedIdentifier],
}

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    prefix: PathBuf,
    write_summary: bool,
}

impl LocalStorage {
    /// Create a LocalStorage writing files that start with `prefix`.
    pub fn new(prefix: impl Into<PathBuf>) -> Self {
        Self {
            prefix: prefix.into(),
            write_summary: false,
        }
    }

    /// Also write the JSON run summary.
    pub fn with_summary(mut self, enabled: bool) -> Self {
        self.write_summary = enabled;
        self
    }

    /// Full path for an artifact suffix.
    fn path(&self, suffix: &str) -> PathBuf {
        let mut name = OsString::from(self.prefix.as_os_str());
        name.push(suffix);
        PathBuf::from(name)
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        self.ensure_dir(path).await?;

        let tmp = tmp_path(path);
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, path).await?;
        Ok(())
    }
}

/// Sibling temp file: the full file name plus `.tmp`, so `q.txt` stages in
/// `q.txt.tmp` and never touches a user's `q.tmp`.
fn tmp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

#[async_trait]
impl ResultStorage for LocalStorage {
    async fn write_outcome(&self, outcome: &BatchOutcome) -> Result<WriteSummary> {
        let table_path = self.path(TABLE_SUFFIX);
        let errors_path = self.path(ERRORS_SUFFIX);
        let audit_path = self.path(AUDIT_SUFFIX);

        log::info!(
            "Writing {} rows and {} errors to {}*",
            outcome.table.len(),
            outcome.errors.len(),
            self.prefix.display()
        );

        self.write_bytes(&table_path, render_table(&outcome.table).as_bytes())
            .await?;
        self.write_bytes(&errors_path, render_errors(&outcome.errors).as_bytes())
            .await?;
        self.write_bytes(&audit_path, outcome.audit.as_str().as_bytes())
            .await?;

        let summary_location = if self.write_summary {
            let summary_path = self.path(SUMMARY_SUFFIX);
            let summary = RunSummary {
                stats: &outcome.stats,
                failures: outcome.errors.entries(),
            };
            let bytes = serde_json::to_vec_pretty(&summary)?;
            self.write_bytes(&summary_path, &bytes).await?;
            Some(summary_path.display().to_string())
        } else {
            None
        };

        Ok(WriteSummary {
            table_location: table_path.display().to_string(),
            errors_location: errors_path.display().to_string(),
            audit_location: audit_path.display().to_string(),
            summary_location,
            row_count: outcome.table.len(),
            error_count: outcome.errors.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::{AggregateTable, ErrorList, RawAudit};
    use tempfile::TempDir;

    fn outcome_with_error() -> BatchOutcome {
        let mut errors = ErrorList::default();
        errors.push("FBgn002", &AppError::fetch("FBgn002", "timed out"));
        let mut audit = RawAudit::default();
        audit.append("FlyBase ID\tFBgn001");

        BatchOutcome {
            table: AggregateTable::default(),
            errors,
            audit,
            stats: RunStats::started(),
        }
    }

    #[test]
    fn test_paths_share_prefix() {
        let storage = LocalStorage::new("out/run1");
        assert_eq!(storage.path(TABLE_SUFFIX), PathBuf::from("out/run1.txt"));
        assert_eq!(
            storage.path(AUDIT_SUFFIX),
            PathBuf::from("out/run1-rawAtlasTables.txt")
        );
    }

    #[tokio::test]
    async fn test_write_outcome_creates_all_files() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path().join("nested/queries"));

        let summary = storage.write_outcome(&outcome_with_error()).await.unwrap();
        assert_eq!(summary.row_count, 0);
        assert_eq!(summary.error_count, 1);
        assert!(summary.summary_location.is_none());

        let errors = std::fs::read_to_string(&summary.errors_location).unwrap();
        assert_eq!(errors, "FBgn002\n");

        let audit = std::fs::read_to_string(&summary.audit_location).unwrap();
        assert_eq!(audit, "NewEntry\nFlyBase ID\tFBgn001\n\n");

        let table = std::fs::read_to_string(&summary.table_location).unwrap();
        assert!(table.starts_with("ID\tanno\tsym\tname"));
        assert!(!tmp.path().join("nested/queries.txt.tmp").exists());
    }

    #[tokio::test]
    async fn test_error_file_written_when_empty() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path().join("q"));
        let outcome = BatchOutcome {
            table: AggregateTable::default(),
            errors: ErrorList::default(),
            audit: RawAudit::default(),
            stats: RunStats::started(),
        };

        let summary = storage.write_outcome(&outcome).await.unwrap();
        assert_eq!(std::fs::read_to_string(&summary.errors_location).unwrap(), "");
        assert_eq!(std::fs::read_to_string(&summary.audit_location).unwrap(), "");
    }

    #[test]
    fn test_tmp_path_keeps_full_name() {
        assert_eq!(
            tmp_path(Path::new("out/run1.txt")),
            PathBuf::from("out/run1.txt.tmp")
        );
    }

    #[tokio::test]
    async fn test_write_leaves_unrelated_tmp_file_alone() {
        let tmp = TempDir::new().unwrap();
        let prefix = tmp.path().join("q");
        let bystander = tmp.path().join("q.tmp");
        std::fs::write(&bystander, "keep me").unwrap();

        LocalStorage::new(&prefix)
            .write_outcome(&outcome_with_error())
            .await
            .unwrap();

        assert_eq!(std::fs::read_to_string(&bystander).unwrap(), "keep me");
        assert!(tmp.path().join("q.txt").exists());
    }

    #[tokio::test]
    async fn test_summary_json() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path().join("q")).with_summary(true);

        let summary = storage.write_outcome(&outcome_with_error()).await.unwrap();
        let location = summary.summary_location.unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(location).unwrap()).unwrap();

        assert_eq!(json["failures"][0]["identifier"], "FBgn002");
        assert!(json["stats"]["start_time"].is_string());
    }
}
