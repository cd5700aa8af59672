//! Media-manager image references
//!
//! Image fields written by the media picker carry extra data after the path
//! (`#joomlaImage://...?width=..&height=..`). A cleaner strips that and hands
//! back the bare path plus any size attributes it found.

pub mod cleaner;
pub mod mock;

pub use cleaner::MediaReferenceCleaner;
pub use mock::MockImageCleaner;

use std::collections::HashMap;

/// A cleaned image reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanedImage {
    pub path: String,
    /// May contain `width` and `height` string values.
    pub attributes: HashMap<String, String>,
}

impl CleanedImage {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            attributes: HashMap::new(),
        }
    }

    pub fn with_attribute(mut self, key: &str, value: impl Into<String>) -> Self {
        self.attributes.insert(key.to_string(), value.into());
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

/// Normalizes a raw image reference. Must not panic on malformed input;
/// return an empty path instead.
pub trait CleanImageReference: Send + Sync {
    fn clean(&self, raw: &str) -> CleanedImage;
}
