//! Classification configuration: group mapping and exclusions
//!
//! Both are explicit data values passed into the classifier rather than
//! module-level constants, so they can be swapped and validated
//! independently of the pipeline. BTree-backed so iteration order, and
//! therefore every error report built from them, is deterministic.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Mapping from feature code to group label.
///
/// Must be exhaustive over the post-exclusion input; the classifier
/// treats a missing entry as a hard error, never as a default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMapping(BTreeMap<String, String>);

impl GroupMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `code` to `label`, replacing any previous assignment
    pub fn insert(&mut self, code: impl Into<String>, label: impl Into<String>) {
        self.0.insert(code.into(), label.into());
    }

    /// Look up the label for a code
    pub fn get(&self, code: &str) -> Option<&str> {
        self.0.get(code).map(String::as_str)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.0.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over (code, label) pairs in code order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(c, l)| (c.as_str(), l.as_str()))
    }

    /// The distinct labels in the mapping, in sorted order
    pub fn labels(&self) -> Vec<&str> {
        let set: BTreeSet<&str> = self.0.values().map(String::as_str).collect();
        set.into_iter().collect()
    }
}

impl<C: Into<String>, L: Into<String>> FromIterator<(C, L)> for GroupMapping {
    fn from_iter<I: IntoIterator<Item = (C, L)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(c, l)| (c.into(), l.into()))
                .collect(),
        )
    }
}

/// Codes removed from consideration before the mapping is checked.
///
/// Exclusion is silent: these are expected absences (e.g. territories
/// outside the region taxonomy), not anomalies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionSet(BTreeSet<String>);

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, code: impl Into<String>) {
        self.0.insert(code.into());
    }

    pub fn contains(&self, code: &str) -> bool {
        self.0.contains(code)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<C: Into<String>> FromIterator<C> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = C>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_lookup() {
        let mapping: GroupMapping =
            [("CA", "Far West"), ("NV", "Far West"), ("TX", "Southwest")]
                .into_iter()
                .collect();

        assert_eq!(mapping.get("CA"), Some("Far West"));
        assert_eq!(mapping.get("ZZ"), None);
        assert_eq!(mapping.len(), 3);
        assert_eq!(mapping.labels(), vec!["Far West", "Southwest"]);
    }

    #[test]
    fn test_mapping_insert_replaces() {
        let mut mapping = GroupMapping::new();
        mapping.insert("CA", "West");
        mapping.insert("CA", "Far West");
        assert_eq!(mapping.get("CA"), Some("Far West"));
        assert_eq!(mapping.len(), 1);
    }

    #[test]
    fn test_exclusions() {
        let exclusions: ExclusionSet = ["PR", "GU"].into_iter().collect();
        assert!(exclusions.contains("PR"));
        assert!(!exclusions.contains("CA"));
        assert_eq!(exclusions.len(), 2);
    }

    #[test]
    fn test_mapping_json_round_trip() {
        let mapping: GroupMapping = [("CA", "Far West")].into_iter().collect();
        let json = serde_json::to_string(&mapping).unwrap();
        assert_eq!(json, r#"{"CA":"Far West"}"#);

        let parsed: GroupMapping = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, mapping);
    }
}
