//! Column-name adapter.
//!
//! The raw CSVs come in two header conventions (`headline,url,publisher,...`
//! vs `Headline,URL,Publisher,...`). Loaders resolve columns through this
//! adapter instead of duplicating themselves per convention.

use csv::StringRecord;
use std::collections::HashMap;

/// Case-insensitive header-to-column lookup built once per file.
#[derive(Debug, Clone)]
pub struct HeaderMap {
    indices: HashMap<String, usize>,
}

impl HeaderMap {
    pub fn from_record(headers: &StringRecord) -> Self {
        let mut indices = HashMap::new();
        for (i, name) in headers.iter().enumerate() {
            // First occurrence wins on duplicate headers.
            indices.entry(name.trim().to_ascii_lowercase()).or_insert(i);
        }
        Self { indices }
    }

    pub fn index(&self, name: &str) -> Option<usize> {
        self.indices.get(&name.to_ascii_lowercase()).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index(name).is_some()
    }

    /// Trimmed cell for `name` in `record`, or `None` when the column is
    /// absent or the row is too short.
    pub fn field<'r>(&self, record: &'r StringRecord, name: &str) -> Option<&'r str> {
        self.index(name).and_then(|i| record.get(i)).map(str::trim)
    }
}
