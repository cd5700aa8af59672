use ogimage_resolver::{
    app::{OgImagePublisher, PublisherServices, RequestContext},
    category::{CategoryDirectory, MockCategoryLookup},
    media::{CleanImageReference, MediaReferenceCleaner, MockImageCleaner},
    metadata::{DocumentMetadata, MetaEntry, MetaKind, MetadataSink},
    models::{ContentItem, ImageSet, ResolverConfig, ViewKind},
    resolve,
};
use pretty_assertions::assert_eq;
use std::fs;
use std::num::NonZeroU32;

fn entry(key: &str, value: &str) -> MetaEntry {
    MetaEntry {
        key: key.to_string(),
        value: value.to_string(),
        kind: MetaKind::Property,
    }
}

#[test]
fn test_listing_page_publishes_first_category_image() {
    let dir = tempfile::tempdir().unwrap();
    let categories_path = dir.path().join("categories.json");
    fs::write(
        &categories_path,
        r#"{"2": "images/headers/blog.jpg#joomlaImage://local-images/headers/blog.jpg?width=1200&height=630"}"#,
    )
    .unwrap();
    let items_path = dir.path().join("items.json");
    fs::write(
        &items_path,
        r#"[
            {"catid": 2, "images": "{\"image_intro\":\"images/first.jpg\"}", "text": ""},
            {"catid": 2, "images": "{\"image_intro\":\"images/second.jpg\"}", "text": ""}
        ]"#,
    )
    .unwrap();

    let publisher = OgImagePublisher::new(
        ResolverConfig::default(),
        PublisherServices {
            categories: Box::new(CategoryDirectory::from_file(&categories_path).unwrap()),
            cleaner: Box::new(MediaReferenceCleaner::new()),
        },
    );

    let items = ContentItem::load_file(&items_path).unwrap();
    assert_eq!(items.len(), 2);

    let mut ctx = RequestContext::site("category");
    let mut doc = DocumentMetadata::new();
    for item in &items {
        publisher.on_content_after_display(&mut ctx, item, &mut doc);
    }

    assert_eq!(
        doc.entries(),
        &[
            entry("og:image", "/images/headers/blog.jpg"),
            entry("og:image:width", "1200"),
            entry("og:image:height", "630"),
        ]
    );
}

#[test]
fn test_article_page_uses_body_image() {
    let dir = tempfile::tempdir().unwrap();
    let item_path = dir.path().join("article.json");
    fs::write(
        &item_path,
        r#"{"catid": "5", "images": "{}", "text": "<p>Intro</p><img src=\"images/body.png\" alt=\"\">"}"#,
    )
    .unwrap();

    let categories = MockCategoryLookup::new().with_image(5, "images/cat.jpg");
    let publisher = OgImagePublisher::new(
        ResolverConfig {
            prefer_item_image: true,
            default_image_path: Some("images/def.jpg".to_string()),
        },
        PublisherServices {
            categories: Box::new(categories.clone()),
            cleaner: Box::new(MediaReferenceCleaner::new()),
        },
    );

    let items = ContentItem::load_file(&item_path).unwrap();
    let mut ctx = RequestContext::site("article");
    let mut doc = DocumentMetadata::new();
    let published = publisher.on_content_after_display(&mut ctx, &items[0], &mut doc);

    assert_eq!(published.map(|d| d.path), Some("/images/body.png".to_string()));
    assert_eq!(categories.get_lookup_count(), 0);
    assert_eq!(doc.entries(), &[entry("og:image", "/images/body.png")]);
}

#[test]
fn test_default_only_mode_ignores_item_images() {
    let publisher = OgImagePublisher::new(
        ResolverConfig::from_vars(|key| match key {
            "OGIMAGE_USE_ARTICLE_IMAGE" => Some("false".to_string()),
            "OGIMAGE_DEFAULT_IMAGE" => Some("images/site.jpg".to_string()),
            _ => None,
        })
        .unwrap(),
        PublisherServices {
            categories: Box::new(MockCategoryLookup::new()),
            cleaner: Box::new(MediaReferenceCleaner::new()),
        },
    );

    let item = ContentItem::new()
        .with_image_set(ImageSet::new(Some("images/a.jpg"), Some("images/b.jpg")))
        .with_body(r#"<img src="images/c.jpg">"#);

    let mut doc = DocumentMetadata::new();
    publisher.on_content_after_display(&mut RequestContext::site("article"), &item, &mut doc);
    assert_eq!(doc.get("og:image"), Some("/images/site.jpg"));
}

#[test]
fn test_existing_metadata_wins_over_resolution() {
    let publisher = OgImagePublisher::new(
        ResolverConfig::default(),
        PublisherServices {
            categories: Box::new(MockCategoryLookup::new()),
            cleaner: Box::new(MediaReferenceCleaner::new()),
        },
    );

    let mut doc = DocumentMetadata::new();
    doc.set_metadata("og:image", "https://other.example.com/x.jpg", MetaKind::Property);

    let item = ContentItem::new().with_image_set(ImageSet::new(Some("images/a.jpg"), None));
    let result = publisher.on_content_after_display(&mut RequestContext::site("article"), &item, &mut doc);

    assert_eq!(result, None);
    assert_eq!(doc.get("og:image"), Some("https://other.example.com/x.jpg"));
    assert_eq!(doc.entries().len(), 1);
}

#[test]
fn test_single_candidate_reaches_cleaner() {
    let cleaner = MockImageCleaner::new();
    let item = ContentItem::new()
        .with_image_set(ImageSet::new(Some("images/a.jpg"), Some("images/b.jpg")))
        .with_raw_images(ImageSet::new(Some("images/c.jpg"), None))
        .with_body(r#"<img src="images/d.jpg">"#);
    let config = ResolverConfig {
        prefer_item_image: true,
        default_image_path: Some("images/def.jpg".to_string()),
    };

    for view in [ViewKind::Single, ViewKind::Listing, ViewKind::Featured] {
        resolve(&item, Some("images/cat.jpg"), view, &config, &cleaner);
    }

    assert_eq!(
        cleaner.get_calls(),
        vec![
            "images/a.jpg".to_string(),
            "images/cat.jpg".to_string(),
            "images/cat.jpg".to_string(),
        ]
    );
}

#[test]
fn test_output_path_invariant() {
    let cleaner = MediaReferenceCleaner::new();
    let config = ResolverConfig::default();
    let candidates = [
        "images/a.jpg",
        "/images/a.jpg",
        "a.jpg?joomla_image_width=0&joomla_image_height=20",
        "images/a.jpg#joomlaImage://local-images/a.jpg?width=abc&height=5",
        "#joomlaImage://only-marker",
        "https://cdn.example.com/a.jpg",
    ];

    for raw in candidates {
        let item = ContentItem::new().with_image_set(ImageSet::new(Some(raw), None));
        let cleaned = cleaner.clean(raw);

        match resolve(&item, None, ViewKind::Single, &config, &cleaner) {
            Some(descriptor) => {
                assert!(!cleaned.path.is_empty());
                assert!(descriptor.path.starts_with('/'), "{}", descriptor.path);
                assert!(descriptor.path.len() > 1);
            }
            None => assert!(cleaned.path.is_empty(), "{} should resolve", raw),
        }
    }

    let legacy = ContentItem::new().with_image_set(ImageSet::new(
        Some("a.jpg?joomla_image_width=0&joomla_image_height=20"),
        None,
    ));
    let descriptor = resolve(&legacy, None, ViewKind::Single, &config, &cleaner).unwrap();
    assert_eq!(descriptor.path, "/a.jpg");
    assert_eq!(descriptor.width, None);
    assert_eq!(descriptor.height, NonZeroU32::new(20));
}

#[test]
fn test_non_string_legacy_field_still_resolves_from_image_set() {
    let dir = tempfile::tempdir().unwrap();
    let item_path = dir.path().join("article.json");
    fs::write(
        &item_path,
        r#"{"images": "{\"image_intro\":\"images/i.jpg\"}", "image_fulltext": 0, "text": null}"#,
    )
    .unwrap();

    let items = ContentItem::load_file(&item_path).unwrap();
    let descriptor = resolve(
        &items[0],
        None,
        ViewKind::Single,
        &ResolverConfig::default(),
        &MediaReferenceCleaner::new(),
    )
    .unwrap();

    assert_eq!(descriptor.path, "/images/i.jpg");
}
