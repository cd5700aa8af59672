//! Category image lookup
//!
//! Listing and featured pages prefer the image configured on the item's
//! category. Lookups never fail loudly: an unknown category or a broken
//! backend both mean "no category image".

pub mod directory;
pub mod mock;

pub use directory::CategoryDirectory;
pub use mock::MockCategoryLookup;

pub trait CategoryImageLookup: Send + Sync {
    fn category_image(&self, category_id: u64) -> Option<String>;
}
