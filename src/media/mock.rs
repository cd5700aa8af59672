use super::{CleanImageReference, CleanedImage};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Cleaner that records every reference it sees.
///
/// Unknown references are returned unchanged with no attributes.
#[derive(Clone)]
pub struct MockImageCleaner {
    responses: Arc<Mutex<HashMap<String, CleanedImage>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockImageCleaner {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_response(self, raw: &str, cleaned: CleanedImage) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(raw.to_string(), cleaned);
        self
    }

    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn get_call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Default for MockImageCleaner {
    fn default() -> Self {
        Self::new()
    }
}

impl CleanImageReference for MockImageCleaner {
    fn clean(&self, raw: &str) -> CleanedImage {
        self.calls.lock().unwrap().push(raw.to_string());

        self.responses
            .lock()
            .unwrap()
            .get(raw)
            .cloned()
            .unwrap_or_else(|| CleanedImage::new(raw))
    }
}
