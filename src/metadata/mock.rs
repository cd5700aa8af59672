use super::{MetaKind, MetadataSink};
use std::sync::{Arc, Mutex};

/// Sink that records every publish call, duplicates included.
#[derive(Clone, Default)]
pub struct MockMetadataSink {
    existing: Arc<Mutex<Vec<String>>>,
    published: Arc<Mutex<Vec<(String, String, MetaKind)>>>,
}

impl MockMetadataSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretend another component already set `key`.
    pub fn with_existing(self, key: &str) -> Self {
        self.existing.lock().unwrap().push(key.to_string());
        self
    }

    pub fn get_published(&self) -> Vec<(String, String, MetaKind)> {
        self.published.lock().unwrap().clone()
    }

    pub fn get_publish_count(&self) -> usize {
        self.published.lock().unwrap().len()
    }
}

impl MetadataSink for MockMetadataSink {
    fn has_metadata(&self, key: &str) -> bool {
        self.existing.lock().unwrap().iter().any(|k| k == key)
    }

    fn set_metadata(&mut self, key: &str, value: &str, kind: MetaKind) {
        self.published
            .lock()
            .unwrap()
            .push((key.to_string(), value.to_string(), kind));
    }
}
