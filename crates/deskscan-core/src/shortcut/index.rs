//! Name to target mapping produced by a scan.

use super::entry::ShortcutEntry;
use serde::Serialize;
use std::collections::hash_map;
use std::collections::HashMap;

/// Shortcut names mapped to their target paths.
///
/// Keys are unique; inserting an existing name replaces its target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ShortcutIndex {
    entries: HashMap<String, String>,
}

impl ShortcutIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, returning the target it replaced.
    pub fn insert(&mut self, entry: ShortcutEntry) -> Option<String> {
        let (name, target) = entry.into_parts();
        self.entries.insert(name, target)
    }

    /// Exact-key membership test.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, String> {
        self.entries.iter()
    }

    /// Entries sorted by name.
    pub fn sorted(&self) -> Vec<(&str, &str)> {
        let mut pairs: Vec<(&str, &str)> = self
            .entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        pairs.sort_unstable_by(|a, b| a.0.cmp(b.0));
        pairs
    }
}

impl FromIterator<ShortcutEntry> for ShortcutIndex {
    fn from_iter<I: IntoIterator<Item = ShortcutEntry>>(iter: I) -> Self {
        let mut index = Self::new();
        for entry in iter {
            index.insert(entry);
        }
        index
    }
}

impl<'a> IntoIterator for &'a ShortcutIndex {
    type Item = (&'a String, &'a String);
    type IntoIter = hash_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
