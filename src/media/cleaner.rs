use super::{CleanImageReference, CleanedImage};
use std::borrow::Cow;
use url::form_urlencoded;

const LEGACY_WIDTH: &str = "joomla_image_width";
const LEGACY_HEIGHT: &str = "joomla_image_height";

type QueryPairs<'a> = Vec<(Cow<'a, str>, Cow<'a, str>)>;

/// Cleaner for media-manager references.
///
/// Handles both reference styles:
/// - `images/a.jpg#joomlaImage://local-images/a.jpg?width=300&height=200`
/// - `images/a.jpg?joomla_image_width=300&joomla_image_height=200` (legacy)
///
/// Any `#` fragment is dropped, including one without a `?`, so a bare
/// `#joomlaImage://...` marker never reaches the published path.
#[derive(Debug, Clone, Copy, Default)]
pub struct MediaReferenceCleaner;

impl MediaReferenceCleaner {
    pub fn new() -> Self {
        Self
    }
}

impl CleanImageReference for MediaReferenceCleaner {
    fn clean(&self, raw: &str) -> CleanedImage {
        let (location, fragment) = match raw.split_once('#') {
            Some((location, fragment)) => (location, Some(fragment)),
            None => (raw, None),
        };
        let (base, query) = match location.split_once('?') {
            Some((base, query)) => (base, Some(query)),
            None => (location, None),
        };

        let params: QueryPairs = query.map(parse_query).unwrap_or_default();
        let legacy = params.iter().any(|(key, _)| key == LEGACY_HEIGHT);

        let (width, height, kept) = if legacy {
            let width = lookup(&params, LEGACY_WIDTH).and_then(leading_positive_int);
            let height = lookup(&params, LEGACY_HEIGHT).and_then(leading_positive_int);
            let kept: QueryPairs = params
                .into_iter()
                .filter(|(key, _)| key != LEGACY_WIDTH && key != LEGACY_HEIGHT)
                .collect();
            (width, height, kept)
        } else {
            let fragment_params: QueryPairs = fragment
                .and_then(|f| f.split_once('?'))
                .map(|(_, q)| parse_query(q))
                .unwrap_or_default();
            let width = lookup(&fragment_params, "width").and_then(leading_positive_int);
            let height = lookup(&fragment_params, "height").and_then(leading_positive_int);
            (width, height, params)
        };

        let mut path = base.to_string();
        if !kept.is_empty() {
            let rebuilt = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(kept.iter())
                .finish();
            path.push('?');
            path.push_str(&rebuilt);
        }

        let mut cleaned = CleanedImage::new(path);
        if let Some(width) = width {
            cleaned = cleaned.with_attribute("width", width.to_string());
        }
        if let Some(height) = height {
            cleaned = cleaned.with_attribute("height", height.to_string());
        }
        cleaned
    }
}

fn parse_query(query: &str) -> QueryPairs<'_> {
    form_urlencoded::parse(query.as_bytes()).collect()
}

fn lookup<'a>(params: &'a [(Cow<'_, str>, Cow<'_, str>)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| &**v)
}

/// Integer cast over the leading digits (`"300px"` is 300). Zero is `None`.
fn leading_positive_int(value: &str) -> Option<u32> {
    let trimmed = value.trim_start();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..end].parse::<u32>().ok().filter(|n| *n > 0)
}
