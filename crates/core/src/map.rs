//! Macro name to value mapping

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Mapping of macro name to replacement text.
///
/// Names are stored as written but compared ignoring ASCII case, mirroring
/// how names are matched during substitution: a map never holds two names
/// that differ only in case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MacroMap {
    entries: FxHashMap<String, String>,
}

impl MacroMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define or redefine a macro, returning the previous value.
    ///
    /// An existing entry whose name differs only in case is replaced and the
    /// new spelling is kept.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let name = name.into();
        let existing = self
            .entries
            .keys()
            .find(|key| key.eq_ignore_ascii_case(&name))
            .cloned();
        let previous = existing.and_then(|key| self.entries.remove(&key));
        self.entries.insert(name, value.into());
        previous
    }

    /// Look up a macro value
    pub fn get(&self, name: &str) -> Option<&str> {
        if let Some(value) = self.entries.get(name) {
            return Some(value.as_str());
        }
        self.entries
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Copy every entry of `other` into this map, overriding shared names
    pub fn extend_from(&mut self, other: &MacroMap) {
        for (name, value) in &other.entries {
            self.insert(name.as_str(), value.as_str());
        }
    }

    /// Layer this map on top of `base`: entries here win on shared names.
    pub fn merged_over(&self, base: &MacroMap) -> MacroMap {
        let mut merged = base.clone();
        merged.extend_from(self);
        merged
    }

    /// Names ordered longest first, ties broken alphabetically.
    ///
    /// When one name is a substring of another the longer one is applied
    /// first, which keeps substitution output independent of hash order.
    pub fn names_longest_first(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        names
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MacroMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = MacroMap::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut map = MacroMap::new();
        assert!(map.is_empty());
        assert_eq!(map.insert("accent", "#f00"), None);
        assert_eq!(map.insert("accent", "#0f0"), Some("#f00".to_string()));
        assert_eq!(map.get("accent"), Some("#0f0"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_case_insensitive_fallback() {
        let map: MacroMap = [("Accent", "#f00")].into_iter().collect();
        assert_eq!(map.get("accent"), Some("#f00"));
        assert_eq!(map.get("ACCENT"), Some("#f00"));
        assert!(!map.contains("accents"));
    }

    #[test]
    fn test_insert_replaces_other_case() {
        let mut map = MacroMap::new();
        map.insert("Accent", "#f00");
        assert_eq!(map.insert("accent", "#0f0"), Some("#f00".to_string()));
        assert_eq!(map.len(), 1);
        assert_eq!(map.names_longest_first(), vec!["accent"]);
        assert_eq!(map.get("ACCENT"), Some("#0f0"));
    }

    #[test]
    fn test_merged_over_ignores_case() {
        let global: MacroMap = [("Accent", "red")].into_iter().collect();
        let local: MacroMap = [("accent", "blue")].into_iter().collect();
        let merged = local.merged_over(&global);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged.get("Accent"), Some("blue"));
    }

    #[test]
    fn test_merged_over_prefers_local() {
        let global: MacroMap = [("accent", "red"), ("gap", "4px")].into_iter().collect();
        let local: MacroMap = [("accent", "blue")].into_iter().collect();
        let merged = local.merged_over(&global);
        assert_eq!(merged.get("accent"), Some("blue"));
        assert_eq!(merged.get("gap"), Some("4px"));
        assert_eq!(global.get("accent"), Some("red"));
    }

    #[test]
    fn test_names_longest_first() {
        let map: MacroMap = [("a", "1"), ("accent", "2"), ("acc", "3"), ("bcc", "4")]
            .into_iter()
            .collect();
        assert_eq!(map.names_longest_first(), vec!["accent", "acc", "bcc", "a"]);
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let map: MacroMap = [("accent", "#f00")].into_iter().collect();
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r##"{"accent":"#f00"}"##);
        let back: MacroMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }
}
