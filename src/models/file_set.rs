//! Path-keyed file storage.
//!
//! - `FileSet`: the workspace's records, keyed by path, in insertion order.
//! - `FileMap`: the persisted `path -> content` form stored on a project.
//!
//! Both keep insertion order so the derived path tree never silently turns
//! alphabetical.

use rustc_hash::FxHashMap;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::Language;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub path: String,
    pub content: String,
    pub language: Language,
}

impl FileRecord {
    pub fn new(path: impl Into<String>, content: impl Into<String>, language: Language) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            language,
        }
    }

    /// Builds a record whose language is detected from the path's extension.
    pub fn detect(path: impl Into<String>, content: impl Into<String>) -> Self {
        let path = path.into();
        let language = Language::from_path(&path);
        Self {
            path,
            content: content.into(),
            language,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FileSet {
    records: Vec<FileRecord>,
    index: FxHashMap<String, usize>,
}

impl FileSet {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, path: &str) -> Option<&FileRecord> {
        self.index.get(path).and_then(|&i| self.records.get(i))
    }

    pub fn contains(&self, path: &str) -> bool {
        self.index.contains_key(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FileRecord> {
        self.records.iter()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.path.as_str())
    }

    /// Inserts `record`, or replaces the record with the same path in place.
    ///
    /// Returns `false` when an identical record was already stored.
    pub fn upsert(&mut self, record: FileRecord) -> bool {
        match self.index.get(&record.path) {
            Some(&i) => {
                let slot = &mut self.records[i];
                if *slot == record {
                    return false;
                }
                *slot = record;
                true
            }
            None => {
                self.index.insert(record.path.clone(), self.records.len());
                self.records.push(record);
                true
            }
        }
    }

    /// Replaces the content of an existing record. Absent paths are left alone.
    pub fn set_content(&mut self, path: &str, content: String) -> bool {
        let Some(&i) = self.index.get(path) else {
            return false;
        };
        let record = &mut self.records[i];
        if record.content == content {
            return false;
        }
        record.content = content;
        true
    }

    pub fn remove(&mut self, path: &str) -> Option<FileRecord> {
        let i = self.index.remove(path)?;
        let record = self.records.remove(i);
        for slot in self.index.values_mut() {
            if *slot > i {
                *slot -= 1;
            }
        }
        Some(record)
    }

    pub fn clear(&mut self) -> bool {
        if self.records.is_empty() {
            return false;
        }
        self.records.clear();
        self.index.clear();
        true
    }

    pub fn to_file_map(&self) -> FileMap {
        let mut map = FileMap::default();
        for record in &self.records {
            map.insert(record.path.clone(), record.content.clone());
        }
        map
    }

    /// Rebuilds a set from persisted project files, detecting each language
    /// from its path.
    pub fn from_file_map(map: &FileMap) -> Self {
        let mut set = Self::default();
        for (path, content) in map.iter() {
            if path.is_empty() {
                continue;
            }
            set.upsert(FileRecord::detect(path, content));
        }
        set
    }
}

/// Ordered `path -> content` mapping, serialized as a JSON object whose key
/// order is the insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileMap {
    entries: Vec<(String, String)>,
    index: FxHashMap<String, usize>,
}

impl FileMap {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.index
            .get(path)
            .and_then(|&i| self.entries.get(i))
            .map(|(_, c)| c.as_str())
    }

    pub fn insert(&mut self, path: String, content: String) {
        match self.index.get(&path) {
            Some(&i) => self.entries[i].1 = content,
            None => {
                self.index.insert(path.clone(), self.entries.len());
                self.entries.push((path, content));
            }
        }
    }

    pub fn remove(&mut self, path: &str) -> Option<String> {
        let i = self.index.remove(path)?;
        let (_, content) = self.entries.remove(i);
        for slot in self.index.values_mut() {
            if *slot > i {
                *slot -= 1;
            }
        }
        Some(content)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, c)| (p.as_str(), c.as_str()))
    }
}

impl<P: Into<String>, C: Into<String>> FromIterator<(P, C)> for FileMap {
    fn from_iter<I: IntoIterator<Item = (P, C)>>(iter: I) -> Self {
        let mut map = Self::default();
        for (path, content) in iter {
            map.insert(path.into(), content.into());
        }
        map
    }
}

impl Serialize for FileMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (path, content) in &self.entries {
            map.serialize_entry(path, content)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FileMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FileMapVisitor;

        impl<'de> Visitor<'de> for FileMapVisitor {
            type Value = FileMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of file paths to contents")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<FileMap, A::Error> {
                let mut map = FileMap::default();
                while let Some((path, content)) = access.next_entry::<String, String>()? {
                    map.insert(path, content);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(FileMapVisitor)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/file_set.rs"]
mod tests;
