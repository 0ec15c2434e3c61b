//! Cart command handlers.
//!
//! A cart lives only for the duration of one command. Tracking events are
//! queued during the purchase and relayed once the cart has settled.

use std::sync::Arc;

use clap::Subcommand;
use vitrine_client::{deliver, LogPixelSink, ProductPage, SettingsCache, StorefrontClient};
use vitrine_core::{format_tnd, AppConfig, InMemoryOutbox, PurchaseEffect, PurchaseIntent, Storefront};

/// Sub-commands available under `cart`.
#[derive(Debug, Subcommand)]
pub enum CartCommands {
    /// Add one unit of a product to the cart
    Add {
        /// Product slug (e.g., robe-lin)
        slug: String,
        /// Color to select, by name
        #[arg(long)]
        color: Option<String>,
        /// Size to select, by name
        #[arg(long)]
        size: Option<String>,
        /// Go straight to checkout instead of opening the cart
        #[arg(long)]
        buy_now: bool,
    },
}

/// Load a product, add the selected variant to a fresh cart, then relay the
/// queued tracking events.
///
/// # Errors
///
/// Returns an error if the product cannot be loaded, a named variant does
/// not exist, or the selection is out of stock. Relay failures are only
/// counted.
pub(crate) async fn run_cart_add(
    client: StorefrontClient,
    config: &AppConfig,
    slug: &str,
    color: Option<&str>,
    size: Option<&str>,
    buy_now: bool,
) -> anyhow::Result<()> {
    let settings = SettingsCache::new(client.clone());
    let plan = settings
        .tracking_plan(config.default_fb_pixel_id.as_deref())
        .await;

    let mut page = ProductPage::new(client.clone(), slug);
    page.load().await?;
    let Some(view) = page.view_mut() else {
        anyhow::bail!("product {slug} did not load");
    };
    crate::product::apply_selection(view, color, size)?;

    let outbox = Arc::new(InMemoryOutbox::new());
    let mut shop = Storefront::new(Arc::clone(&outbox));
    shop.view_product(view);

    let intent = if buy_now {
        PurchaseIntent::BuyNow
    } else {
        PurchaseIntent::AddToCart
    };
    let effect = shop.purchase(view, intent)?;

    for line in shop.cart().lines() {
        let variant = [line.selected_color.as_deref(), line.selected_size.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" / ");
        println!(
            "{} x{} {}  {}",
            line.name,
            line.quantity,
            variant,
            format_tnd(line.line_total())
        );
    }
    println!("subtotal: {}", format_tnd(shop.cart().subtotal()));
    match effect {
        PurchaseEffect::CartOpened => println!("cart opened"),
        PurchaseEffect::NavigateToCheckout => println!("continue to checkout"),
    }

    let pixel = LogPixelSink {
        pixel_id: plan.facebook_pixel_id,
    };
    let report = deliver(&outbox, &pixel, &client).await;
    tracing::info!(
        pixel_sent = report.pixel_sent,
        server_sent = report.server_sent,
        failed = report.failed,
        "tracking events relayed"
    );

    Ok(())
}
