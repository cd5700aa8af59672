use super::CategoryImageLookup;
use crate::Result;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CategoryTable(HashMap<String, String>);

/// In-memory category id to image table.
#[derive(Debug, Clone, Default)]
pub struct CategoryDirectory {
    images: HashMap<u64, String>,
}

impl CategoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image(mut self, category_id: u64, image: &str) -> Self {
        self.images.insert(category_id, image.to_string());
        self
    }

    /// Load a JSON object of `{"<category id>": "<image>"}`.
    pub fn from_file(path: &Path) -> Result<Self> {
        let table: CategoryTable = serde_json::from_str(&fs::read_to_string(path)?)?;

        let mut images = HashMap::with_capacity(table.0.len());
        for (key, image) in table.0 {
            let id = key.trim().parse::<u64>().map_err(|_| {
                crate::Error::InvalidInput(format!(
                    "{}: category id '{}' is not a number",
                    path.display(),
                    key
                ))
            })?;
            images.insert(id, image);
        }

        Ok(Self { images })
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl CategoryImageLookup for CategoryDirectory {
    fn category_image(&self, category_id: u64) -> Option<String> {
        self.images
            .get(&category_id)
            .filter(|image| !image.is_empty())
            .cloned()
    }
}
