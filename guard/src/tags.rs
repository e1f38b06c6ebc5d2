//! Tag model for managed resources.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::GuardConfig;

/// A resource's tag set: string keys mapped to string values, keys unique.
///
/// Key presence is never assumed; [`TagSet::get`] returns an `Option` and
/// the ownership predicate treats a missing key the same as a mismatched
/// value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet(BTreeMap<String, String>);

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// A resource is managed iff its tags carry the provenance key mapped to
    /// the provenance value. This is the sole authorization predicate for
    /// mutation; an absent tag set is not a special "assume safe" case.
    pub fn is_managed(&self, cfg: &GuardConfig) -> bool {
        self.get(&cfg.provenance_key) == Some(cfg.provenance_value.as_str())
    }
}

impl FromIterator<(String, String)> for TagSet {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a TagSet {
    type Item = (&'a String, &'a String);
    type IntoIter = std::collections::btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> GuardConfig {
        GuardConfig::default()
    }

    #[test]
    fn managed_requires_exact_value_match() {
        let mut tags = TagSet::new();
        tags.insert("CreatedBy", "platform-cli");
        assert!(tags.is_managed(&cfg()));

        let mut wrong = TagSet::new();
        wrong.insert("CreatedBy", "someone-else");
        assert!(!wrong.is_managed(&cfg()));
    }

    #[test]
    fn empty_tag_set_is_not_managed() {
        assert!(!TagSet::new().is_managed(&cfg()));
    }

    #[test]
    fn unrelated_tags_do_not_confer_ownership() {
        let mut tags = TagSet::new();
        tags.insert("Owner", "alice");
        tags.insert("Project", "demo");
        assert!(!tags.is_managed(&cfg()));
    }
}
