use vitrine_client::{ProductPage, StorefrontClient};
use vitrine_core::{format_tnd, MediaKind, ProductView};

/// Load one product and print its resolved view.
///
/// # Errors
///
/// Returns an error if the product cannot be fetched or a named variant
/// does not exist.
pub(crate) async fn run_product_show(
    client: StorefrontClient,
    slug: &str,
    color: Option<&str>,
    size: Option<&str>,
) -> anyhow::Result<()> {
    let mut page = ProductPage::new(client, slug);
    page.load().await?;
    let Some(view) = page.view_mut() else {
        anyhow::bail!("product {slug} did not load");
    };
    super::apply_selection(view, color, size)?;

    print_view(view);
    Ok(())
}

fn print_view(view: &ProductView) {
    let product = view.product();
    let price = view.price();

    println!("{}", product.title);
    println!("category:     {}", product.category_name());
    if price.has_promotion() {
        println!(
            "price:        {} (was {}, save {})",
            format_tnd(price.discounted),
            format_tnd(price.original),
            format_tnd(price.savings)
        );
    } else {
        println!("price:        {}", format_tnd(price.discounted));
    }

    if let Some(color) = view.selected_color() {
        println!("color:        {}", color.name);
    }
    if let Some(size) = view.selected_size() {
        match size.price_override {
            Some(override_price) => {
                println!("size:         {} ({})", size.name, format_tnd(override_price));
            }
            None => println!("size:         {}", size.name),
        }
    }
    println!(
        "availability: {}",
        if view.is_available() {
            "in stock"
        } else {
            "out of stock"
        }
    );

    let selected = view.selected_media();
    let media = view.active_media();
    if media.is_empty() {
        println!("media:        none");
        return;
    }
    println!("media:");
    for item in media {
        let marker = if selected == Some(item) { "*" } else { " " };
        let kind = match item.kind {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        };
        println!("  {marker} {kind:<6}{}", item.src);
    }
}
