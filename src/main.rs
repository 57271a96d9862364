//! Amiibo of the Day - show a deterministic random amiibo in your terminal
//!
//! One invocation per run: ensure the catalog, pick the item for the current
//! update interval, resolve its data and image through the cache, render a
//! card, then sweep expired cache entries.

use std::error::Error;
use std::io::{self, Write};
use std::path::Path;

use chrono::{DateTime, Local, Utc};
use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use amiiboday::cache::{CacheStore, CatalogCache, RetentionSweeper, SeedStore, RETENTION_DAYS};
use amiiboday::cli::{Cli, SelectionParams};
use amiiboday::data::{Amiibo, AmiiboApi, ItemKey};
use amiiboday::render;
use amiiboday::select::ItemSelector;
use amiiboday::service::CatalogService;

/// Item rendered on the error card when the selection cannot be resolved
const FALLBACK_ITEM_NAME: &str = "Bowser";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Keeps the fallback item and its image warm in the cache, so the error
/// card has something to name even when the day's selection fails
async fn resolve_fallback(service: &mut CatalogService) -> Option<Amiibo> {
    match service.resolve_item(&ItemKey::Name(FALLBACK_ITEM_NAME.to_string())) {
        Ok(item) => {
            if service.resolve_image(item.id, &item.image).await.is_none() {
                debug!(name = FALLBACK_ITEM_NAME, "fallback image unavailable");
            }
            Some(item)
        }
        Err(err) => {
            debug!(%err, "fallback item is not in the catalog");
            None
        }
    }
}

/// Selects, resolves, and renders the item of the day
async fn show_item_of_today(
    service: &mut CatalogService,
    params: &SelectionParams,
    max_id: usize,
    cache_root: &Path,
    now: DateTime<Local>,
    out: &mut impl Write,
    fallback: Option<&Amiibo>,
) -> io::Result<()> {
    let selector = ItemSelector::new(max_id, SeedStore::new(cache_root));
    let key = match selector.select_of_today(&params.selector, now, params.interval_hours) {
        Ok(key) => key,
        Err(err) => {
            warn!(%err, "selection failed");
            return render::render_error(out, fallback);
        }
    };
    debug!(?key, "selected item of the day");

    let item = match service.resolve_item(&key) {
        Ok(item) => item,
        Err(err) => {
            warn!(%err, "selected item could not be resolved");
            return render::render_error(out, fallback);
        }
    };

    match service.resolve_image(item.id, &item.image).await {
        Some(image) => render::render_item(out, &item, image.len()),
        None => render::render_error(out, fallback),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let cli = Cli::parse();
    let params = SelectionParams::from_cli(&cli);

    let store = match cli.cache_dir {
        Some(dir) => CacheStore::with_root(dir),
        None => CacheStore::open_default().ok_or("could not determine a cache directory")?,
    };
    let cache_root = store.root().to_path_buf();

    let mut service = CatalogService::new(CatalogCache::new(store), AmiiboApi::new());
    let mut stdout = io::stdout();

    let now = Local::now();
    match service.ensure_catalog(now.date_naive()).await {
        Some(size) if size > 0 => {
            let fallback = resolve_fallback(&mut service).await;
            show_item_of_today(
                &mut service,
                &params,
                size - 1,
                &cache_root,
                now,
                &mut stdout,
                fallback.as_ref(),
            )
            .await?;
        }
        _ => {
            warn!("no catalog available");
            render::render_error(&mut stdout, None)?;
        }
    }

    // After the card is out; a failed sweep never affects the render
    RetentionSweeper::new(cache_root).sweep(Utc::now(), RETENTION_DAYS);

    Ok(())
}
