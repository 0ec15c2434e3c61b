//! Product snapshot as the storefront sees it after normalization.
//!
//! Variant stock is carried as [`Stock`] rather than an optional count so the
//! availability cascade can match on it exhaustively.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Category label used when a product has no category attached.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    #[default]
    Image,
    Video,
}

/// One entry of a gallery: an absolute URL plus its kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    pub src: String,
    #[serde(rename = "type", default)]
    pub kind: MediaKind,
}

impl MediaItem {
    pub fn image(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            kind: MediaKind::Image,
        }
    }

    pub fn video(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            kind: MediaKind::Video,
        }
    }
}

/// Per-axis stock signal.
///
/// `Untracked` means the merchant never filled in a count for this variant,
/// which is different from a tracked count of zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stock {
    Tracked(u32),
    Untracked,
}

impl Stock {
    #[must_use]
    pub fn from_quantity(quantity: Option<u32>) -> Self {
        quantity.map_or(Stock::Untracked, Stock::Tracked)
    }

    #[must_use]
    pub fn quantity(self) -> Option<u32> {
        match self {
            Stock::Tracked(q) => Some(q),
            Stock::Untracked => None,
        }
    }

    /// Swatch-level display flag: untracked variants are shown as in stock.
    ///
    /// This only styles the selector. Selection itself is never blocked.
    #[must_use]
    pub fn shows_in_stock(self) -> bool {
        match self {
            Stock::Tracked(q) => q > 0,
            Stock::Untracked => true,
        }
    }
}

/// How a color is rendered in the selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Swatch {
    /// CSS color value, e.g. `"#1c1c1c"`.
    Color(String),
    /// Absolute URL of a fabric/texture image.
    Image(String),
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorVariant {
    pub name: String,
    /// CSS value exactly as stored, kept even when an image swatch wins for
    /// display. Saving a product writes this back unchanged.
    pub value: Option<String>,
    pub swatch: Swatch,
    pub stock: Stock,
    /// Color-specific gallery; may be empty.
    pub media: Vec<MediaItem>,
}

impl ColorVariant {
    #[must_use]
    pub fn shows_in_stock(&self) -> bool {
        self.stock.shows_in_stock()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeVariant {
    pub name: String,
    /// Size-level price. Carried to the cart line but not charged.
    pub price_override: Option<Decimal>,
    pub stock: Stock,
}

impl SizeVariant {
    #[must_use]
    pub fn shows_in_stock(&self) -> bool {
        self.stock.shows_in_stock()
    }
}

/// The category a product points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: String,
    pub name: String,
}

/// A category as listed by the category endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: Option<String>,
    /// Absolute image URL, when the category has one.
    pub image: Option<String>,
}

/// Read-only product snapshot fetched from the storefront API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub slug: Option<String>,
    pub title: String,
    pub description: String,
    /// Price in TND before any promotion.
    pub base_price: Decimal,
    /// Promotion percentage, nominally 0–100.
    pub promotion_percent: Decimal,
    pub global_quantity: u32,
    pub sold: u32,
    pub category: Option<CategoryRef>,
    pub sub_category: Option<String>,
    /// Product-wide gallery, used only as the last fallback.
    pub media: Vec<MediaItem>,
    pub colors: Vec<ColorVariant>,
    pub sizes: Vec<SizeVariant>,
}

impl Product {
    /// Returns `true` when the merchant populated at least one size.
    #[must_use]
    pub fn has_size_axis(&self) -> bool {
        !self.sizes.is_empty()
    }

    #[must_use]
    pub fn category_name(&self) -> &str {
        self.category
            .as_ref()
            .map_or(UNKNOWN_CATEGORY, |c| c.name.as_str())
    }

    /// Index of the first color whose name matches, ignoring ASCII case.
    #[must_use]
    pub fn color_index(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.colors
            .iter()
            .position(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Index of the first size whose name matches, ignoring ASCII case.
    #[must_use]
    pub fn size_index(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.sizes
            .iter()
            .position(|s| s.name.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn color(name: &str, stock: Stock, media: &[&str]) -> ColorVariant {
        ColorVariant {
            name: name.to_owned(),
            value: Some("#000000".to_owned()),
            swatch: Swatch::Color("#000000".to_owned()),
            stock,
            media: media.iter().map(|src| MediaItem::image(*src)).collect(),
        }
    }

    pub fn size(name: &str, stock: Stock) -> SizeVariant {
        SizeVariant {
            name: name.to_owned(),
            price_override: None,
            stock,
        }
    }

    pub fn product() -> Product {
        Product {
            id: "665f1c2a9b".to_owned(),
            slug: Some("robe-lin-noir".to_owned()),
            title: "Robe Lin".to_owned(),
            description: "Robe en lin lavé.".to_owned(),
            base_price: Decimal::new(100_000, 3),
            promotion_percent: Decimal::ZERO,
            global_quantity: 10,
            sold: 0,
            category: Some(CategoryRef {
                id: "cat-1".to_owned(),
                name: "Robes".to_owned(),
            }),
            sub_category: None,
            media: vec![MediaItem::image("https://cdn.example.tn/global-1.jpg")],
            colors: Vec::new(),
            sizes: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn stock_from_quantity_distinguishes_zero_from_absent() {
        assert_eq!(Stock::from_quantity(Some(0)), Stock::Tracked(0));
        assert_eq!(Stock::from_quantity(None), Stock::Untracked);
    }

    #[test]
    fn untracked_stock_shows_in_stock() {
        assert!(Stock::Untracked.shows_in_stock());
        assert!(!Stock::Tracked(0).shows_in_stock());
        assert!(Stock::Tracked(3).shows_in_stock());
    }

    #[test]
    fn category_name_defaults_to_unknown() {
        let mut p = product();
        assert_eq!(p.category_name(), "Robes");
        p.category = None;
        assert_eq!(p.category_name(), UNKNOWN_CATEGORY);
    }

    #[test]
    fn variant_lookup_by_name_ignores_case() {
        let mut p = product();
        p.sizes = vec![size("S", Stock::Untracked), size("M", Stock::Tracked(0))];
        p.colors = vec![color("Noir", Stock::Untracked, &[])];
        assert_eq!(p.size_index("m"), Some(1));
        assert_eq!(p.color_index(" noir "), Some(0));
        assert_eq!(p.size_index("XL"), None);
    }

    #[test]
    fn media_kind_deserializes_from_type_field() {
        let item: MediaItem =
            serde_json::from_str(r#"{"src":"https://x/a.mp4","type":"video"}"#).unwrap();
        assert_eq!(item.kind, MediaKind::Video);
        let item: MediaItem = serde_json::from_str(r#"{"src":"https://x/a.jpg"}"#).unwrap();
        assert_eq!(item.kind, MediaKind::Image);
    }
}
