//! Core types for call-site scanning.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that abort a scan.
///
/// There is no partial-success mode: a tree with an unreadable file would
/// produce misleadingly incomplete declaration and call sets.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot walk {}: {source}", root.display())]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// A source file discovered under the scan root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceFile(PathBuf);

impl SourceFile {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl std::fmt::Display for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Names of every function-definition-shaped span in the tree.
pub type DeclarationSet = BTreeSet<String>;

/// Where a call was found. Lines are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallLocation {
    pub file: String,
    pub line: usize,
}

impl CallLocation {
    pub fn new(file: impl Into<String>, line: usize) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl std::fmt::Display for CallLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: line {}", self.file, self.line)
    }
}

/// One called name with every place it is called from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallEntry {
    pub name: String,
    pub locations: Vec<CallLocation>,
}

/// Called names mapped to their locations, in discovery order.
///
/// Names keep the order in which they were first seen; locations keep the
/// order in which they were pushed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallRecord {
    entries: Vec<CallEntry>,
    index: HashMap<String, usize>,
}

impl CallRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one call of `name`.
    pub fn push(&mut self, name: &str, location: CallLocation) {
        match self.index.get(name) {
            Some(&i) => self.entries[i].locations.push(location),
            None => {
                self.index.insert(name.to_string(), self.entries.len());
                self.entries.push(CallEntry {
                    name: name.to_string(),
                    locations: vec![location],
                });
            }
        }
    }

    /// Append another record's locations after this record's own.
    pub fn merge(&mut self, other: CallRecord) {
        for entry in other.entries {
            match self.index.get(&entry.name) {
                Some(&i) => self.entries[i].locations.extend(entry.locations),
                None => {
                    self.index.insert(entry.name.clone(), self.entries.len());
                    self.entries.push(entry);
                }
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&[CallLocation]> {
        self.index
            .get(name)
            .map(|&i| self.entries[i].locations.as_slice())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Number of distinct called names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of call sites across all names.
    pub fn location_count(&self) -> usize {
        count_locations(&self.entries)
    }

    pub fn into_entries(self) -> Vec<CallEntry> {
        self.entries
    }
}

/// Calls partitioned by whether the tree defines the called name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedReport {
    pub internal: Vec<CallEntry>,
    pub external: Vec<CallEntry>,
    /// Number of source files scanned
    pub files_scanned: usize,
    /// Number of distinct declared names
    pub declarations: usize,
}

impl ClassifiedReport {
    pub fn internal_count(&self) -> usize {
        count_locations(&self.internal)
    }

    pub fn external_count(&self) -> usize {
        count_locations(&self.external)
    }

    /// Total call sites (not distinct names).
    pub fn total(&self) -> usize {
        self.internal_count() + self.external_count()
    }

    pub fn internal_call(&self, name: &str) -> Option<&CallEntry> {
        self.internal.iter().find(|e| e.name == name)
    }

    pub fn external_call(&self, name: &str) -> Option<&CallEntry> {
        self.external.iter().find(|e| e.name == name)
    }
}

fn count_locations(entries: &[CallEntry]) -> usize {
    entries.iter().map(|e| e.locations.len()).sum()
}
