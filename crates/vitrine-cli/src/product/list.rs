use vitrine_client::StorefrontClient;
use vitrine_core::{
    category_display_name, format_tnd, resolve_price, PageWindow, Product, ProductQuery,
};

/// Print one page of the catalog with its "showing X to Y of N" window.
///
/// # Errors
///
/// Returns an error if the listing request fails.
pub(crate) async fn run_product_list(
    client: &StorefrontClient,
    page: u32,
    per_page: u32,
    sort: Option<String>,
    category: Option<String>,
) -> anyhow::Result<()> {
    if let Some(slug) = &category {
        println!("{}", category_display_name(slug));
    }

    let query = ProductQuery {
        page,
        items_per_page: per_page,
        sort,
        category,
        filters: Vec::new(),
    };
    let listing = client.list_products(&query).await?;

    let window = PageWindow::new(page, per_page, listing.total);
    println!(
        "showing {} to {} of {} (page {} of {})",
        window.start,
        window.end,
        window.total,
        page + 1,
        listing.total_pages.max(1)
    );

    if listing.products.is_empty() {
        println!("no products found");
        return Ok(());
    }

    print_product_table(&listing.products);
    Ok(())
}

/// Print the first `limit` new arrivals for `category` (`all` for every
/// category).
///
/// # Errors
///
/// Returns an error if the request fails.
pub(crate) async fn run_new_arrivals(
    client: &StorefrontClient,
    category: &str,
    limit: usize,
) -> anyhow::Result<()> {
    let mut products = client.list_new_arrivals(category).await?;
    products.truncate(limit);
    if products.is_empty() {
        println!("no new arrivals");
        return Ok(());
    }
    print_product_table(&products);
    Ok(())
}

fn print_product_table(products: &[Product]) {
    println!("{:<24}{:<32}{:>16}", "SLUG", "TITLE", "PRICE");
    for product in products {
        let price = resolve_price(product.base_price, product.promotion_percent);
        let title = if product.title.chars().count() > 30 {
            format!("{}...", product.title.chars().take(27).collect::<String>())
        } else {
            product.title.clone()
        };
        println!(
            "{:<24}{:<32}{:>16}",
            product.slug.as_deref().unwrap_or("\u{2014}"),
            title,
            format_tnd(price.discounted)
        );
    }
}
