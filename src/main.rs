use anyhow::Result;
use clap::{Parser, ValueEnum};
use ogimage_resolver::app::{Client, OgImagePublisher, PublisherServices, RequestContext};
use ogimage_resolver::category::CategoryDirectory;
use ogimage_resolver::media::MediaReferenceCleaner;
use ogimage_resolver::metadata::{DocumentMetadata, MetaKind, MetadataSink};
use ogimage_resolver::models::{ContentItem, ResolverConfig};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ClientArg {
    Site,
    Administrator,
}

impl From<ClientArg> for Client {
    fn from(arg: ClientArg) -> Self {
        match arg {
            ClientArg::Site => Client::Site,
            ClientArg::Administrator => Client::Administrator,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "ogimage-resolver")]
#[command(about = "Resolve og:image metadata for one rendered content page")]
struct CliArgs {
    /// Content view being rendered (article, category, featured).
    #[arg(long)]
    view: String,

    /// Serving application.
    #[arg(long, value_enum, default_value = "site")]
    client: ClientArg,

    /// Component handling the request.
    #[arg(long, default_value = "com_content")]
    option: String,

    /// JSON object mapping category ids to images.
    #[arg(long, value_name = "FILE")]
    categories: Option<PathBuf>,

    /// Pretend another component already set og:image to this value.
    #[arg(long, value_name = "URL")]
    existing_og_image: Option<String>,

    /// Read settings from this dotenv file instead of the environment.
    #[arg(long, value_name = "FILE")]
    env_file: Option<PathBuf>,

    /// Override OGIMAGE_USE_ARTICLE_IMAGE.
    #[arg(long)]
    use_article_image: Option<bool>,

    /// Override OGIMAGE_DEFAULT_IMAGE.
    #[arg(long, value_name = "PATH")]
    default_image: Option<String>,

    /// Content item files, rendered in order within one request.
    #[arg(value_name = "ITEM_FILE", required = true)]
    items: Vec<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ogimage_resolver=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();

    let mut config = match &args.env_file {
        Some(path) => ResolverConfig::from_env_file(path)?,
        None => ResolverConfig::from_env()?,
    };
    if let Some(prefer) = args.use_article_image {
        config.prefer_item_image = prefer;
    }
    if let Some(default_image) = args.default_image {
        config.default_image_path = Some(default_image).filter(|s| !s.is_empty());
    }

    let categories = match &args.categories {
        Some(path) => match CategoryDirectory::from_file(path) {
            Ok(directory) if directory.is_empty() => {
                warn!("Category table {} has no entries", path.display());
                directory
            }
            Ok(directory) => {
                info!("Loaded {} category image(s)", directory.len());
                directory
            }
            Err(e) => {
                warn!("Could not load categories from {}: {}", path.display(), e);
                CategoryDirectory::new()
            }
        },
        None => CategoryDirectory::new(),
    };

    let mut items = Vec::new();
    for path in &args.items {
        items.extend(ContentItem::load_file(path)?);
    }
    info!("Rendering {} item(s) for view '{}'", items.len(), args.view);

    let publisher = OgImagePublisher::new(
        config,
        PublisherServices {
            categories: Box::new(categories),
            cleaner: Box::new(MediaReferenceCleaner::new()),
        },
    );

    let mut doc = DocumentMetadata::new();
    if let Some(existing) = &args.existing_og_image {
        doc.set_metadata("og:image", existing, MetaKind::Property);
    }

    let mut ctx = RequestContext::new(args.client.into(), &args.option, &args.view);
    for item in &items {
        publisher.on_content_after_display(&mut ctx, item, &mut doc);
    }

    if !ctx.is_published() {
        info!("No og:image published");
    }

    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}
