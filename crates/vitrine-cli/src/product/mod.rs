//! Product browsing command handlers.
//!
//! `show` loads a product page and resolves the variant selection the same
//! way the storefront's detail view does; `list` pages through the catalog
//! and `new-arrivals` prints the home page's newest products.

mod list;
mod show;

use clap::Subcommand;
use vitrine_core::listing::DEFAULT_ITEMS_PER_PAGE;
use vitrine_core::{CoreError, ProductView};

pub(crate) use list::{run_new_arrivals, run_product_list};
pub(crate) use show::run_product_show;

/// Sub-commands available under `product`.
#[derive(Debug, Subcommand)]
pub enum ProductCommands {
    /// Show price, availability and media for one product
    Show {
        /// Product slug (e.g., robe-lin)
        slug: String,
        /// Color to select, by name
        #[arg(long)]
        color: Option<String>,
        /// Size to select, by name
        #[arg(long)]
        size: Option<String>,
    },
    /// List products, one page at a time
    List {
        /// Zero-based page index
        #[arg(long, default_value_t = 0)]
        page: u32,
        /// Products per page
        #[arg(long, default_value_t = DEFAULT_ITEMS_PER_PAGE)]
        per_page: u32,
        /// Sort key passed through to the API
        #[arg(long)]
        sort: Option<String>,
        /// Category slug to restrict the listing to
        #[arg(long)]
        category: Option<String>,
    },
    /// Show the newest products, as on the home page
    NewArrivals {
        /// Category slug, or `all`
        #[arg(long, default_value = "all")]
        category: String,
        /// How many products to show
        #[arg(long, default_value_t = 4)]
        limit: usize,
    },
}

/// Applies `--color` / `--size` on top of the initial selection.
pub(crate) fn apply_selection(
    view: &mut ProductView,
    color: Option<&str>,
    size: Option<&str>,
) -> Result<(), CoreError> {
    if let Some(color) = color {
        view.select_color_named(color)?;
    }
    if let Some(size) = size {
        view.select_size_named(size)?;
    }
    Ok(())
}
