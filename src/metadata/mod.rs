//! Document head metadata
//!
//! The page document owns its `<meta>` entries; the publisher only checks for
//! an existing `og:image` and adds its own entries.

pub mod document;
pub mod mock;

pub use document::{DocumentMetadata, MetaEntry};
pub use mock::MockMetadataSink;

use serde::Serialize;

/// Which attribute names the entry: `<meta name=..>` or `<meta property=..>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetaKind {
    Name,
    Property,
}

pub trait MetadataSink {
    /// True when a non-empty entry for `key` already exists.
    fn has_metadata(&self, key: &str) -> bool;
    fn set_metadata(&mut self, key: &str, value: &str, kind: MetaKind);
}
