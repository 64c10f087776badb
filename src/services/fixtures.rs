// src/services/fixtures.rs

//! Atlas responses and a fake transport for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::TISSUES;
use crate::services::AtlasFetcher;

/// Base locator used by tests.
pub(crate) const TEST_BASE_URL: &str = "http://atlas.test/FA2Direct/index.html";

const COLUMN_HEADER: &str = "Tissue\tMale FPKM\tMale SD\tMale Enrichment\tFemale FPKM\tFemale SD\t\
Female Enrichment\tM/F\tM/F p value\tLarval FPKM\tLarval SD\tLarval Enrichment";

/// A well-formed response listing every tissue.
pub(crate) fn atlas_table(id: &str) -> String {
    atlas_table_with(id, &TISSUES)
}

/// A response with the given tissue rows. Row `i` holds `"{i}.{k}"` at
/// field `k`, so the male value of row 3 is `"3.1"`.
pub(crate) fn atlas_table_with(id: &str, tissues: &[&str]) -> String {
    let mut lines = vec![
        format!("FlyBase ID\t{id}"),
        "Annotation Symbol\tCG0001".to_string(),
        "Symbol\tabc".to_string(),
        "Name\talpha-beta protein".to_string(),
        COLUMN_HEADER.to_string(),
    ];
    for (i, tissue) in tissues.iter().enumerate() {
        let fields: Vec<String> = (1..12).map(|k| format!("{i}.{k}")).collect();
        lines.push(format!("{}\t{}", tissue, fields.join("\t")));
    }
    lines.join("\n") + "\n"
}

/// In-memory fetcher answering by the `fbgn` query parameter.
///
/// Identifiers without a registered response fail like a network error.
#[derive(Debug, Default)]
pub(crate) struct FakeFetcher {
    responses: HashMap<String, String>,
    calls: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub(crate) fn with(mut self, id: &str, body: impl Into<String>) -> Self {
        self.responses.insert(id.to_string(), body.into());
        self
    }

    /// Identifiers requested so far, in request order.
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AtlasFetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let parsed = Url::parse(url)?;
        let id = parsed
            .query_pairs()
            .find(|(key, _)| key == "fbgn")
            .map(|(_, value)| value.into_owned())
            .unwrap_or_default();
        self.calls.lock().unwrap().push(id.clone());

        self.responses
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::fetch(url, "connection refused"))
    }
}
