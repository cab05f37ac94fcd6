// file: src/store/corpus.rs
// description: immutable in-memory corpus with identifier index
// reference: read-only after load, safe to share across query calls

use crate::error::{ResumeError, Result};
use crate::models::{Category, Entry};
use std::collections::HashMap;

/// Ordered collection of entries, keyed by identifier. Built once at startup
/// and never mutated during a query session.
#[derive(Debug, Clone)]
pub struct Corpus {
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
    fingerprint: String,
}

impl Corpus {
    /// Build a corpus from validated entries, rejecting duplicate
    /// identifiers. Insertion order is preserved for stable tie-breaking.
    pub fn from_entries(entries: Vec<Entry>, fingerprint: String) -> Result<Self> {
        let mut index = HashMap::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            if index.insert(entry.id.clone(), position).is_some() {
                return Err(ResumeError::DuplicateIdentifier(entry.id.clone()));
            }
        }

        Ok(Self {
            entries,
            index,
            fingerprint,
        })
    }

    pub fn get(&self, id: &str) -> Result<&Entry> {
        self.index
            .get(id)
            .map(|&position| &self.entries[position])
            .ok_or_else(|| ResumeError::NotFound(id.to_string()))
    }

    /// Entries in insertion order, optionally filtered by category.
    pub fn all(&self, category: Option<Category>) -> Vec<&Entry> {
        self.entries
            .iter()
            .filter(|entry| category.is_none_or(|c| entry.category == c))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// SHA-256 of the source document this corpus was loaded from.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}
