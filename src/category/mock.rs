use super::CategoryImageLookup;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct MockCategoryLookup {
    images: Arc<Mutex<HashMap<u64, String>>>,
    lookup_count: Arc<Mutex<usize>>,
    should_fail: Arc<Mutex<bool>>,
}

impl MockCategoryLookup {
    pub fn new() -> Self {
        Self {
            images: Arc::new(Mutex::new(HashMap::new())),
            lookup_count: Arc::new(Mutex::new(0)),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    pub fn with_image(self, category_id: u64, image: &str) -> Self {
        self.images
            .lock()
            .unwrap()
            .insert(category_id, image.to_string());
        self
    }

    /// Simulate a broken backend. Lookups then behave like "no image".
    pub fn with_failure(self, should_fail: bool) -> Self {
        *self.should_fail.lock().unwrap() = should_fail;
        self
    }

    pub fn get_lookup_count(&self) -> usize {
        *self.lookup_count.lock().unwrap()
    }
}

impl Default for MockCategoryLookup {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryImageLookup for MockCategoryLookup {
    fn category_image(&self, category_id: u64) -> Option<String> {
        *self.lookup_count.lock().unwrap() += 1;

        if *self.should_fail.lock().unwrap() {
            return None;
        }
        self.images.lock().unwrap().get(&category_id).cloned()
    }
}
