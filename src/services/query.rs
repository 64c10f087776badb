// src/services/query.rs

//! Maps a gene identifier to its atlas locator.

/// Builds `<base>?fbgn=<id>&tableOut=gene` locators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryBuilder {
    base_url: String,
}

impl QueryBuilder {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Locator for one identifier. The identifier is inserted verbatim;
    /// a malformed one surfaces later as a fetch failure.
    pub fn locator(&self, identifier: &str) -> String {
        format!("{}?fbgn={}&tableOut=gene", self.base_url, identifier)
    }
}
