use super::{MetaKind, MetadataSink};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaEntry {
    pub key: String,
    pub value: String,
    pub kind: MetaKind,
}

/// Metadata of one rendered document, kept in insertion order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DocumentMetadata {
    entries: Vec<MetaEntry>,
}

impl DocumentMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.value.as_str())
    }

    pub fn entries(&self) -> &[MetaEntry] {
        &self.entries
    }
}

impl MetadataSink for DocumentMetadata {
    fn has_metadata(&self, key: &str) -> bool {
        self.get(key).is_some_and(|value| !value.is_empty())
    }

    fn set_metadata(&mut self, key: &str, value: &str, kind: MetaKind) {
        match self.entries.iter_mut().find(|e| e.key == key) {
            Some(entry) => {
                entry.value = value.to_string();
                entry.kind = kind;
            }
            None => self.entries.push(MetaEntry {
                key: key.to_string(),
                value: value.to_string(),
                kind,
            }),
        }
    }
}
