//! Representative image resolution
//!
//! Rules are tried in a fixed order and the first non-empty candidate wins:
//! category image (listing/featured only), item images (when enabled),
//! default image. The winner is cleaned and normalized into an
//! [`ImageDescriptor`].

use crate::media::CleanImageReference;
use crate::models::{non_empty, ContentItem, ImageDescriptor, ResolverConfig, ViewKind};
use regex::Regex;
use std::num::NonZeroU32;
use std::sync::LazyLock;
use tracing::debug;

static IMG_SRC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<img[^>]+src=["']([^"']+)["']"#).expect("img src pattern is valid")
});

/// Resolve the `og:image` for one item.
///
/// `None` means no metadata should be published. Pure: the only call made is
/// one `cleaner.clean` on the winning candidate.
pub fn resolve<C>(
    item: &ContentItem,
    category_image: Option<&str>,
    view: ViewKind,
    config: &ResolverConfig,
    cleaner: &C,
) -> Option<ImageDescriptor>
where
    C: CleanImageReference + ?Sized,
{
    let (rule, candidate) = pick_candidate(item, category_image, view, config)?;
    debug!("og:image candidate '{}' from {}", candidate, rule);

    let descriptor = normalize(candidate, cleaner);
    if descriptor.is_none() {
        debug!("og:image candidate '{}' cleaned to an empty path", candidate);
    }
    descriptor
}

fn pick_candidate<'a>(
    item: &'a ContentItem,
    category_image: Option<&'a str>,
    view: ViewKind,
    config: &'a ResolverConfig,
) -> Option<(&'static str, &'a str)> {
    if view.prefers_category_image() {
        if let Some(image) = non_empty(category_image) {
            return Some(("category image", image));
        }
    }

    if config.prefer_item_image {
        if let Some(image) = item.image_set.as_ref().and_then(|set| set.first_non_empty()) {
            return Some(("item image set", image));
        }
        if let Some(image) = item.raw_image_attr.first_non_empty() {
            return Some(("item image fields", image));
        }
        if let Some(image) = item.body_text.as_deref().and_then(first_img_src) {
            return Some(("item body", image));
        }
    }

    non_empty(config.default_image_path.as_deref()).map(|image| ("default image", image))
}

/// Source of the first `<img>` tag in an HTML fragment, verbatim.
pub fn first_img_src(html: &str) -> Option<&str> {
    IMG_SRC
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn normalize<C>(raw: &str, cleaner: &C) -> Option<ImageDescriptor>
where
    C: CleanImageReference + ?Sized,
{
    let cleaned = cleaner.clean(raw);
    if cleaned.path.is_empty() {
        return None;
    }

    let path = if cleaned.path.starts_with('/') {
        cleaned.path.clone()
    } else {
        format!("/{}", cleaned.path)
    };

    let dimension = |key: &str| {
        cleaned
            .attribute(key)
            .and_then(|v| v.trim().parse::<NonZeroU32>().ok())
    };

    Some(ImageDescriptor {
        path,
        width: dimension("width"),
        height: dimension("height"),
    })
}
