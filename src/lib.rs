//! Open Graph image resolution for CMS content pages
//!
//! Picks one representative image for an article, category listing or
//! featured page and turns it into normalized `og:image` metadata.

pub mod app;
pub mod category;
pub mod error;
pub mod media;
pub mod metadata;
pub mod models;
pub mod resolver;

pub use error::{Error, Result};
pub use resolver::{first_img_src, resolve};
