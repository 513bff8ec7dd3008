//! Dependency diff computation.

use crate::diff::model::{DependencyDiff, DiffClassification, VersionChange};
use crate::model::DependencyMap;
use std::collections::BTreeMap;

/// Structural equality verdict over two dependency maps.
///
/// Two maps are equal iff they have identical key sets and, for every key,
/// byte-identical version strings.
pub fn is_changed(previous: &DependencyMap, current: &DependencyMap) -> bool {
    if previous.len() != current.len() {
        return true;
    }
    previous
        .iter()
        .any(|(name, version)| current.get(name) != Some(version))
}

/// Compute the full set of additions, removals and version changes.
pub fn compute_diff(previous: &DependencyMap, current: &DependencyMap) -> DependencyDiff {
    let mut added = BTreeMap::new();
    let mut removed = BTreeMap::new();
    let mut changed = BTreeMap::new();

    for (name, old) in previous.iter() {
        match current.get(name) {
            None => {
                removed.insert(name.to_string(), old.to_string());
            }
            Some(new) if new != old => {
                changed.insert(
                    name.to_string(),
                    VersionChange {
                        old: old.to_string(),
                        new: new.to_string(),
                    },
                );
            }
            Some(_) => {}
        }
    }

    for (name, version) in current.iter() {
        if !previous.contains(name) {
            added.insert(name.to_string(), version.to_string());
        }
    }

    let classification = if added.is_empty() && removed.is_empty() && changed.is_empty() {
        DiffClassification::Unchanged
    } else {
        DiffClassification::Changed
    };

    DependencyDiff {
        classification,
        added,
        removed,
        changed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deps(pairs: &[(&str, &str)]) -> DependencyMap {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_identical_maps_unchanged() {
        let a = deps(&[("flask", "1.2"), ("requests", "0.0")]);
        assert!(!is_changed(&a, &a.clone()));
        assert_eq!(compute_diff(&a, &a).classification, DiffClassification::Unchanged);
    }

    #[test]
    fn test_empty_vs_empty_unchanged() {
        assert!(!is_changed(&DependencyMap::new(), &DependencyMap::new()));
    }

    #[test]
    fn test_first_sighting_is_changed() {
        let current = deps(&[("flask", "1.2")]);
        assert!(is_changed(&DependencyMap::new(), &current));

        let diff = compute_diff(&DependencyMap::new(), &current);
        assert_eq!(diff.added.get("flask").map(String::as_str), Some("1.2"));
        assert!(diff.removed.is_empty());
    }

    #[test]
    fn test_version_strings_compared_exactly() {
        let a = deps(&[("lib", "1.0")]);
        let b = deps(&[("lib", "1.0.0")]);
        assert!(is_changed(&a, &b));

        let diff = compute_diff(&a, &b);
        assert_eq!(
            diff.changed.get("lib"),
            Some(&VersionChange {
                old: "1.0".to_string(),
                new: "1.0.0".to_string()
            })
        );
    }

    #[test]
    fn test_same_size_different_keys() {
        let a = deps(&[("a", "1")]);
        let b = deps(&[("b", "1")]);
        assert!(is_changed(&a, &b));

        let diff = compute_diff(&a, &b);
        assert_eq!(diff.change_count(), 2);
        assert!(diff.removed.contains_key("a"));
        assert!(diff.added.contains_key("b"));
    }

    #[test]
    fn test_removal_detected() {
        let a = deps(&[("a", "1"), ("b", "2")]);
        let b = deps(&[("a", "1")]);
        assert!(is_changed(&a, &b));
        assert_eq!(compute_diff(&a, &b).removed.len(), 1);
    }
}
