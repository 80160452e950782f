pub mod metrics;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Repository metadata and file listing as returned by a fetcher.
///
/// Built once per request and never mutated afterwards.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct RepoData {
    pub name: String,
    pub description: Option<String>,
    pub owner: String,
    pub stars: u64,
    pub forks: u64,
    pub language: Option<String>,
    pub topics: Vec<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub files: Vec<FileEntry>,
    pub readme: String,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    #[default]
    File,
    Dir,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileEntry {
    /// Repository-relative, slash-separated path.
    pub path: String,
    pub size: u64,
    #[serde(rename = "type", default)]
    pub entry_type: EntryType,
}

impl FileEntry {
    pub fn file(path: impl Into<String>, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
            entry_type: EntryType::File,
        }
    }

    pub fn is_file(&self) -> bool {
        self.entry_type == EntryType::File
    }

    /// Last path segment.
    pub fn base_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// Substring after the last `.` anywhere in the path, or `no_extension`.
    pub fn file_type(&self) -> &str {
        match self.path.rfind('.') {
            Some(idx) => &self.path[idx + 1..],
            None => NO_EXTENSION,
        }
    }

    /// All segments but the last, joined by `/`. `None` for root-level files.
    pub fn parent_dir(&self) -> Option<&str> {
        match self.path.rfind('/') {
            Some(idx) if idx > 0 => Some(&self.path[..idx]),
            _ => None,
        }
    }
}

pub const NO_EXTENSION: &str = "no_extension";

/// Heuristic complexity figures for a single source file.
///
/// Every field is optional: a file that could not be parsed is recorded with
/// all fields absent and serializes as `{}`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ComplexityMetrics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cyclomatic_complexity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_nesting: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_function_length: Option<f64>,
}

impl ComplexityMetrics {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.cyclomatic_complexity.is_none()
            && self.function_count.is_none()
            && self.class_count.is_none()
            && self.max_nesting.is_none()
            && self.avg_function_length.is_none()
    }
}

/// Aggregate produced by the structure analyzer.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct StructureSummary {
    pub total_files: usize,
    pub total_size: u64,
    /// Recognized language extension (with leading dot) to file count.
    pub languages: BTreeMap<String, usize>,
    /// Files whose extension is outside the recognized language set.
    pub ignored_files: usize,
    pub file_types: BTreeMap<String, usize>,
    pub directories: BTreeSet<String>,
    pub entry_points: BTreeSet<String>,
    pub dependency_manifests: BTreeSet<String>,
    pub complexity: BTreeMap<String, ComplexityMetrics>,
}

/// Technology labels inferred for a repository, iterated in sorted order.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct TechStack(BTreeSet<String>);

impl TechStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: impl Into<String>) -> bool {
        self.0.insert(label.into())
    }

    pub fn contains(&self, label: &str) -> bool {
        self.0.contains(label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for TechStack {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
