// src/services/loader.rs

//! Identifier loading from an input file and an inline list.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{AppError, Result};

/// Deduplicated gene identifiers. Iteration order is unspecified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentifierSet {
    ids: HashSet<String>,
}

impl IdentifierSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, ids: impl IntoIterator<Item = String>) {
        self.ids.extend(ids);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Consume the set into processing order.
    ///
    /// Without `sorted` the order is whatever the hash set yields and may
    /// differ between runs.
    pub fn into_ordered(self, sorted: bool) -> Vec<String> {
        let mut ids: Vec<String> = self.ids.into_iter().collect();
        if sorted {
            ids.sort_unstable();
        }
        ids
    }
}

impl FromIterator<String> for IdentifierSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

/// Read one identifier per line.
pub fn read_identifier_file(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|source| AppError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(clean(content.lines()))
}

/// Split a comma-separated identifier list.
pub fn parse_identifier_list(text: &str) -> Vec<String> {
    clean(text.split(','))
}

fn clean<'a>(tokens: impl Iterator<Item = &'a str>) -> Vec<String> {
    tokens
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

/// Gather identifiers from either or both sources.
///
/// Neither source is required; with none the result is empty.
pub fn load_identifiers(file: Option<&Path>, inline: Option<&str>) -> Result<IdentifierSet> {
    let mut set = IdentifierSet::new();

    if let Some(path) = file {
        let ids = read_identifier_file(path)?;
        log::debug!("Read {} identifiers from {}", ids.len(), path.display());
        set.extend(ids);
    }

    if let Some(list) = inline {
        let ids = parse_identifier_list(list);
        log::debug!("Read {} identifiers from command line", ids.len());
        set.extend(ids);
    }

    Ok(set)
}
