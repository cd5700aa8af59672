//! Per-request publishing of the resolved `og:image`.
//!
//! A listing page renders many items, but only the first item that resolves
//! an image gets to publish. That state lives in [`RequestContext`], which
//! the host creates fresh for every request.

use crate::category::CategoryImageLookup;
use crate::media::CleanImageReference;
use crate::metadata::{MetaKind, MetadataSink};
use crate::models::{ContentItem, ImageDescriptor, ResolverConfig, ViewKind};
use crate::resolver::resolve;
use tracing::{debug, info};

pub const CONTENT_COMPONENT: &str = "com_content";

/// Which application is serving the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Client {
    Site,
    Administrator,
}

/// Routing info and publish state for one request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub client: Client,
    pub component: String,
    pub view: String,
    published: bool,
}

impl RequestContext {
    pub fn new(client: Client, component: &str, view: &str) -> Self {
        Self {
            client,
            component: component.to_string(),
            view: view.to_string(),
            published: false,
        }
    }

    /// Front-end request for a content view.
    pub fn site(view: &str) -> Self {
        Self::new(Client::Site, CONTENT_COMPONENT, view)
    }

    pub fn is_published(&self) -> bool {
        self.published
    }

    fn view_kind(&self) -> Option<ViewKind> {
        if self.client != Client::Site || self.component != CONTENT_COMPONENT {
            return None;
        }
        ViewKind::from_view_name(&self.view)
    }
}

/// Injectable collaborators used to construct [`OgImagePublisher`].
pub struct PublisherServices {
    pub categories: Box<dyn CategoryImageLookup>,
    pub cleaner: Box<dyn CleanImageReference>,
}

/// Resolves and publishes `og:image` metadata after an item is displayed.
pub struct OgImagePublisher {
    config: ResolverConfig,
    categories: Box<dyn CategoryImageLookup>,
    cleaner: Box<dyn CleanImageReference>,
}

impl OgImagePublisher {
    pub fn new(config: ResolverConfig, services: PublisherServices) -> Self {
        Self {
            config,
            categories: services.categories,
            cleaner: services.cleaner,
        }
    }

    /// Handle one displayed item. Returns the descriptor when this call
    /// published metadata.
    pub fn on_content_after_display(
        &self,
        ctx: &mut RequestContext,
        item: &ContentItem,
        doc: &mut dyn MetadataSink,
    ) -> Option<ImageDescriptor> {
        let Some(view) = ctx.view_kind() else {
            debug!(
                "Skipping og:image for {:?} {} view '{}'",
                ctx.client, ctx.component, ctx.view
            );
            return None;
        };

        if ctx.published {
            return None;
        }

        if doc.has_metadata("og:image") {
            debug!("og:image already set by another component");
            return None;
        }

        let category_image = if view.prefers_category_image() {
            item.category_id
                .and_then(|id| self.categories.category_image(id))
        } else {
            None
        };

        let descriptor = resolve(
            item,
            category_image.as_deref(),
            view,
            &self.config,
            self.cleaner.as_ref(),
        )?;

        for (key, value) in descriptor.meta_entries() {
            doc.set_metadata(key, &value, MetaKind::Property);
        }
        ctx.published = true;

        info!(
            "Published og:image {} ({:?} view)",
            descriptor.path, view
        );
        Some(descriptor)
    }
}
