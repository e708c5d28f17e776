//! Ordered header list with case-insensitive names.
//!
//! Headers keep the spelling and position they were first inserted with.
//! Setting a header whose name already exists (in any casing) replaces that
//! entry's value in place, which is what the builder's layered merge relies on.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const CONTENT_TYPE: &str = "Content-Type";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct Headers(Vec<(String, String)>);

impl Headers {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Insert or replace. An existing entry keeps its position; the name takes
    /// the new spelling.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(key, _)| key.eq_ignore_ascii_case(&name)) {
            Some(entry) => *entry = (name, value),
            None => self.0.push((name, value)),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let pos = self.0.iter().position(|(key, _)| key.eq_ignore_ascii_case(name))?;
        Some(self.0.remove(pos).1)
    }

    /// Header-for-header overlay: every entry in `other` wins over ours.
    pub fn merge(&mut self, other: &Headers) {
        for (name, value) in other.iter() {
            self.set(name, value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (name, value) in iter {
            headers.set(name, value);
        }
        headers
    }
}

impl IntoIterator for Headers {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<BTreeMap<String, String>> for Headers {
    fn from(map: BTreeMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

impl From<Headers> for BTreeMap<String, String> {
    fn from(headers: Headers) -> Self {
        headers.0.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_regardless_of_case() {
        let mut headers = Headers::new();
        headers.set("content-type", "application/json");
        headers.set("Accept", "*/*");
        headers.set("CONTENT-TYPE", "text/plain");

        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get("Content-Type"), Some("text/plain"));
        let names: Vec<&str> = headers.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["CONTENT-TYPE", "Accept"]);
    }

    #[test]
    fn merge_keeps_unrelated_entries() {
        let mut base: Headers = [("Content-Type", "application/json")].into_iter().collect();
        let overlay: Headers = [("X-Foo", "bar")].into_iter().collect();
        base.merge(&overlay);

        assert_eq!(base.get("content-type"), Some("application/json"));
        assert_eq!(base.get("x-foo"), Some("bar"));
    }

    #[test]
    fn merge_overlay_wins() {
        let mut base: Headers = [("Content-Type", "application/json")].into_iter().collect();
        let overlay: Headers = [("content-type", "text/csv")].into_iter().collect();
        base.merge(&overlay);

        assert_eq!(base.len(), 1);
        assert_eq!(base.get("Content-Type"), Some("text/csv"));
    }

    #[test]
    fn remove_is_case_insensitive() {
        let mut headers: Headers = [("Authorization", "secret")].into_iter().collect();
        assert_eq!(headers.remove("authorization").as_deref(), Some("secret"));
        assert!(headers.is_empty());
        assert_eq!(headers.remove("authorization"), None);
    }

    #[test]
    fn deserializes_from_a_map() {
        let headers: Headers = serde_json::from_str(r#"{"X-Api-Key":"k","Accept":"application/json"}"#).unwrap();
        assert_eq!(headers.get("x-api-key"), Some("k"));
        assert_eq!(headers.get("accept"), Some("application/json"));
    }
}
