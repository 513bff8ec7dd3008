//! Dependency diff output types.
//!
//! Collections use `BTreeMap` for deterministic serialization.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Structured difference between a previous and a current dependency map.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DependencyDiff {
    /// High-level classification of the diff
    pub classification: DiffClassification,
    /// Dependencies present now but not before (name → version)
    pub added: BTreeMap<String, String>,
    /// Dependencies present before but not now (name → version)
    pub removed: BTreeMap<String, String>,
    /// Dependencies present on both sides with a different version string
    pub changed: BTreeMap<String, VersionChange>,
}

impl DependencyDiff {
    /// True if any dependency was added, removed, or re-versioned
    pub fn is_changed(&self) -> bool {
        self.classification == DiffClassification::Changed
    }

    /// Total number of affected dependency names
    pub fn change_count(&self) -> usize {
        self.added.len() + self.removed.len() + self.changed.len()
    }
}

/// High-level classification of the diff result.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DiffClassification {
    /// Both maps hold exactly the same pairs
    Unchanged,
    /// At least one pair differs
    Changed,
}

/// Version transition for a dependency present on both sides.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VersionChange {
    pub old: String,
    pub new: String,
}
