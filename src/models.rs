//! Data models and structures
//!
//! Defines the request-scoped inputs of a resolution (content item, view,
//! configuration) and the resolved image descriptor.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::num::NonZeroU32;
use std::path::Path;

/// Which content view is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Single,
    Listing,
    Featured,
}

impl ViewKind {
    /// Map a CMS view name to a supported view. Unsupported views are `None`.
    pub fn from_view_name(name: &str) -> Option<Self> {
        match name {
            "article" => Some(Self::Single),
            "category" => Some(Self::Listing),
            "featured" => Some(Self::Featured),
            _ => None,
        }
    }

    /// Listing and featured pages show the category image before any item image.
    pub fn prefers_category_image(self) -> bool {
        matches!(self, Self::Listing | Self::Featured)
    }
}

/// Intro/fulltext image pair attached to an item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageSet {
    pub fulltext_image: Option<String>,
    pub intro_image: Option<String>,
}

impl ImageSet {
    pub fn new(fulltext_image: Option<&str>, intro_image: Option<&str>) -> Self {
        Self {
            fulltext_image: fulltext_image.map(str::to_string),
            intro_image: intro_image.map(str::to_string),
        }
    }

    /// Parse the JSON blob a CMS stores for item images.
    ///
    /// Anything that is not a JSON object collapses to `None`, same as a
    /// missing blob. Non-string field values are ignored.
    pub fn from_json(blob: &str) -> Option<Self> {
        match serde_json::from_str::<Value>(blob) {
            Ok(value) => Self::from_value(&value),
            Err(_) => None,
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        Some(Self {
            fulltext_image: string_value(object.get("image_fulltext")),
            intro_image: string_value(object.get("image_intro")),
        })
    }

    /// Fulltext first, then intro. Empty strings count as unset.
    pub fn first_non_empty(&self) -> Option<&str> {
        non_empty(self.fulltext_image.as_deref()).or_else(|| non_empty(self.intro_image.as_deref()))
    }
}

/// One content item as handed over by the rendering pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "ArticleRecord")]
pub struct ContentItem {
    pub category_id: Option<u64>,
    /// Structured image set decoded from the item's `images` blob.
    pub image_set: Option<ImageSet>,
    /// Images set directly on the item by some listing contexts.
    pub raw_image_attr: ImageSet,
    /// Rendered HTML body.
    pub body_text: Option<String>,
}

impl ContentItem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category_id(mut self, id: u64) -> Self {
        self.category_id = Some(id);
        self
    }

    pub fn with_image_set(mut self, images: ImageSet) -> Self {
        self.image_set = Some(images);
        self
    }

    pub fn with_raw_images(mut self, images: ImageSet) -> Self {
        self.raw_image_attr = images;
        self
    }

    pub fn with_body(mut self, body: &str) -> Self {
        self.body_text = Some(body.to_string());
        self
    }

    /// Read one item, or an array of items, from a JSON file.
    pub fn load_file(path: &Path) -> crate::Result<Vec<Self>> {
        let value: Value = serde_json::from_str(&fs::read_to_string(path)?)?;
        match value {
            Value::Array(_) => Ok(serde_json::from_value(value)?),
            Value::Object(_) => Ok(vec![serde_json::from_value(value)?]),
            _ => Err(crate::Error::InvalidInput(format!(
                "{}: expected a content item object or an array of them",
                path.display()
            ))),
        }
    }
}

/// Wire shape of a CMS article record. Every field is loosely typed so a
/// malformed value reads as absent instead of rejecting the item.
#[derive(Debug, Default, Deserialize)]
struct ArticleRecord {
    #[serde(default)]
    catid: Option<Value>,
    #[serde(default)]
    images: Option<Value>,
    #[serde(default)]
    image_fulltext: Option<Value>,
    #[serde(default)]
    image_intro: Option<Value>,
    #[serde(default)]
    text: Option<Value>,
}

impl From<ArticleRecord> for ContentItem {
    fn from(record: ArticleRecord) -> Self {
        let category_id = match record.catid {
            Some(Value::Number(n)) => n.as_u64(),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        }
        .filter(|id| *id != 0);

        let image_set = match record.images {
            Some(Value::String(blob)) => ImageSet::from_json(&blob),
            Some(ref value @ Value::Object(_)) => ImageSet::from_value(value),
            _ => None,
        };

        Self {
            category_id,
            image_set,
            raw_image_attr: ImageSet {
                fulltext_image: string_value(record.image_fulltext.as_ref()),
                intro_image: string_value(record.image_intro.as_ref()),
            },
            body_text: string_value(record.text.as_ref()),
        }
    }
}

/// Resolution settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Look at item images before falling back to the default image.
    pub prefer_item_image: bool,
    pub default_image_path: Option<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            prefer_item_image: true,
            default_image_path: None,
        }
    }
}

impl ResolverConfig {
    /// Read the process environment after loading `.env` when one exists.
    pub fn from_env() -> crate::Result<Self> {
        match dotenvy::dotenv() {
            Ok(_) => {}
            Err(e) if e.not_found() => {}
            Err(e) => return Err(e.into()),
        }

        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Read settings from a dotenv-style file only, ignoring the process
    /// environment.
    pub fn from_env_file(path: &Path) -> crate::Result<Self> {
        let mut vars = HashMap::new();
        for pair in dotenvy::from_path_iter(path)? {
            let (key, value) = pair?;
            vars.insert(key, value);
        }

        Self::from_vars(|key| vars.get(key).cloned())
    }

    /// Build a config from any key lookup (`OGIMAGE_USE_ARTICLE_IMAGE`,
    /// `OGIMAGE_DEFAULT_IMAGE`).
    pub fn from_vars<F>(lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let prefer_item_image = match lookup("OGIMAGE_USE_ARTICLE_IMAGE") {
            Some(raw) => parse_flag(&raw).ok_or_else(|| {
                crate::Error::Config(format!(
                    "OGIMAGE_USE_ARTICLE_IMAGE must be a boolean, got '{}'",
                    raw
                ))
            })?,
            None => true,
        };

        let default_image_path = lookup("OGIMAGE_DEFAULT_IMAGE")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(Self {
            prefer_item_image,
            default_image_path,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// A resolved `og:image`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageDescriptor {
    /// Site-absolute path, always starting with `/`.
    pub path: String,
    pub width: Option<NonZeroU32>,
    pub height: Option<NonZeroU32>,
}

impl ImageDescriptor {
    /// Metadata entries in publish order: image, then width, then height.
    pub fn meta_entries(&self) -> Vec<(&'static str, String)> {
        let mut entries = vec![("og:image", self.path.clone())];
        if let Some(width) = self.width {
            entries.push(("og:image:width", width.to_string()));
        }
        if let Some(height) = self.height {
            entries.push(("og:image:height", height.to_string()));
        }
        entries
    }
}

fn string_value(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_string)
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}
