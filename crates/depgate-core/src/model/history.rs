use crate::model::DependencyMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Last-seen dependency map per manifest identity
///
/// Identities are absolute manifest paths. An identity that was never
/// recorded reads as an empty map. Entries are only ever replaced, never
/// pruned. Pure in-memory value; persistence lives in `depgate-store`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct HistoryRecord {
    records: BTreeMap<String, DependencyMap>,
}

impl HistoryRecord {
    /// Create a new empty record
    pub fn new() -> Self {
        Self {
            records: BTreeMap::new(),
        }
    }

    /// Stored map for `identity`, or an empty map if unseen
    pub fn get(&self, identity: &str) -> DependencyMap {
        self.records.get(identity).cloned().unwrap_or_default()
    }

    /// Borrow the stored map for `identity` if one exists
    pub fn lookup(&self, identity: &str) -> Option<&DependencyMap> {
        self.records.get(identity)
    }

    /// Replace or insert the entry for `identity`
    pub fn put(&mut self, identity: impl Into<String>, map: DependencyMap) -> Option<DependencyMap> {
        self.records.insert(identity.into(), map)
    }

    /// Number of recorded identities
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deps(pairs: &[(&str, &str)]) -> DependencyMap {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_unseen_identity_is_empty_map() {
        let record = HistoryRecord::new();
        assert!(record.get("/srv/app/requirements.txt").is_empty());
        assert!(record.lookup("/srv/app/requirements.txt").is_none());
    }

    #[test]
    fn test_put_replaces_single_identity() {
        let mut record = HistoryRecord::new();
        record.put("/a/package.json", deps(&[("x", "1")]));
        record.put("/b/package.json", deps(&[("y", "1")]));

        let previous = record.put("/a/package.json", deps(&[("x", "2")]));

        assert_eq!(previous, Some(deps(&[("x", "1")])));
        assert_eq!(record.get("/a/package.json"), deps(&[("x", "2")]));
        assert_eq!(record.get("/b/package.json"), deps(&[("y", "1")]));
        assert_eq!(record.len(), 2);
    }
}
