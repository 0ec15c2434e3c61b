//! Purchasability of the current selection.

use crate::model::{ColorVariant, Product, SizeVariant, Stock};

/// Decides whether the current selection can be bought.
///
/// Evaluated top-down, the first applicable rule decides:
/// 1. a selected size with tracked stock: available iff its count is > 0;
/// 2. only when the product has no size axis at all, a selected color with
///    tracked stock: available iff its count is > 0;
/// 3. otherwise the product's global quantity must be > 0.
///
/// A size with untracked stock on a product that does have sizes falls
/// straight through to rule 3, never to the color count.
#[must_use]
pub fn resolve_availability(
    product: &Product,
    selected_size: Option<&SizeVariant>,
    selected_color: Option<&ColorVariant>,
) -> bool {
    match selected_size.map(|s| s.stock) {
        Some(Stock::Tracked(quantity)) => return quantity > 0,
        Some(Stock::Untracked) | None => {}
    }

    if !product.has_size_axis() {
        match selected_color.map(|c| c.stock) {
            Some(Stock::Tracked(quantity)) => return quantity > 0,
            Some(Stock::Untracked) | None => {}
        }
    }

    product.global_quantity > 0
}

/// Total stock written back to the product when an admin saves it.
///
/// Sums the size counts when the product has sizes, otherwise the color
/// counts when it has colors. Untracked variants count as zero. A zero sum
/// falls back to the product's own global quantity.
#[must_use]
pub fn aggregate_quantity(product: &Product) -> u32 {
    let total = if product.has_size_axis() {
        tracked_total(product.sizes.iter().map(|s| s.stock))
    } else if !product.colors.is_empty() {
        tracked_total(product.colors.iter().map(|c| c.stock))
    } else {
        0
    };

    if total == 0 {
        product.global_quantity
    } else {
        total
    }
}

fn tracked_total(stocks: impl Iterator<Item = Stock>) -> u32 {
    stocks
        .filter_map(Stock::quantity)
        .fold(0, u32::saturating_add)
}
