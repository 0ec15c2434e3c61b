//! Conversion of storefront API types into [`vitrine_core`] domain types.
//!
//! Every relative media path is prefixed with the media base URL here, so
//! nothing downstream ever sees a relative `src`.

use vitrine_core::model::UNKNOWN_CATEGORY;
use vitrine_core::{
    normalize_media_src, normalize_story_video_src, Category, CategoryRef, ColorVariant,
    MediaItem, MediaKind, Product, SizeVariant, Stock, Swatch,
};

use crate::types::{
    WireCategory, WireColor, WireMedia, WireProduct, WireProductList, WireRef, WireSize,
    WireSlide, WireStorySlide,
};

/// One page of the product listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductListing {
    pub products: Vec<Product>,
    pub total_pages: u32,
    pub total: u64,
}

/// A home page banner slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    pub id: Option<String>,
    pub title: String,
    pub button: Option<String>,
    pub link: Option<String>,
    pub image: Option<String>,
}

/// A home page story: a short video with caption and call to action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorySlide {
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    pub cta: Option<String>,
    pub link: Option<String>,
    pub video_url: Option<String>,
}

#[must_use]
pub fn normalize_product(wire: WireProduct, media_base: &str) -> Product {
    let category = wire.category.map(|c| match c {
        WireRef::Populated { id, name } => CategoryRef {
            id,
            name: name.unwrap_or_else(|| UNKNOWN_CATEGORY.to_owned()),
        },
        WireRef::Id(id) => CategoryRef {
            id,
            name: UNKNOWN_CATEGORY.to_owned(),
        },
    });

    let sub_category = wire.sub_category.map(|s| match s {
        WireRef::Populated { id, name } => name.unwrap_or(id),
        WireRef::Id(id) => id,
    });

    Product {
        id: wire.id,
        slug: wire.slug.filter(|s| !s.is_empty()),
        title: wire.title,
        description: wire.description.unwrap_or_default(),
        base_price: wire.price,
        promotion_percent: wire.promotion,
        global_quantity: wire.quantity,
        sold: wire.sold,
        category,
        sub_category,
        media: normalize_media(wire.media, media_base),
        colors: wire
            .colors
            .into_iter()
            .map(|c| normalize_color(c, media_base))
            .collect(),
        sizes: wire.sizes.into_iter().map(normalize_size).collect(),
    }
}

fn normalize_media(media: Vec<WireMedia>, media_base: &str) -> Vec<MediaItem> {
    media
        .into_iter()
        .filter(|m| !m.src.is_empty())
        .map(|m| MediaItem {
            src: normalize_media_src(media_base, &m.src),
            kind: match m.kind.as_deref() {
                Some("video") => MediaKind::Video,
                _ => MediaKind::Image,
            },
        })
        .collect()
}

fn normalize_color(color: WireColor, media_base: &str) -> ColorVariant {
    let swatch = match (color.src.filter(|s| !s.is_empty()), color.value.as_deref()) {
        (Some(src), _) => Swatch::Image(normalize_media_src(media_base, &src)),
        (None, Some(value)) if !value.is_empty() => Swatch::Color(value.to_owned()),
        (None, _) => Swatch::None,
    };

    ColorVariant {
        name: color.name,
        value: color.value,
        swatch,
        stock: Stock::from_quantity(color.quantity),
        media: normalize_media(color.media, media_base),
    }
}

fn normalize_size(size: WireSize) -> SizeVariant {
    SizeVariant {
        name: size.name,
        price_override: size.price,
        stock: Stock::from_quantity(size.quantity),
    }
}

#[must_use]
pub fn normalize_listing(wire: WireProductList, media_base: &str) -> ProductListing {
    ProductListing {
        products: wire
            .products
            .into_iter()
            .map(|p| normalize_product(p, media_base))
            .collect(),
        total_pages: wire.total_pages,
        total: u64::from(wire.total),
    }
}

#[must_use]
pub fn normalize_category(wire: WireCategory, media_base: &str) -> Category {
    Category {
        id: wire.id,
        name: wire.name,
        slug: wire.slug.filter(|s| !s.is_empty()),
        image: wire
            .image
            .filter(|s| !s.is_empty())
            .map(|img| normalize_media_src(media_base, &img)),
    }
}

#[must_use]
pub fn normalize_slide(wire: WireSlide, media_base: &str) -> Slide {
    Slide {
        id: wire.id,
        title: wire.title.unwrap_or_default(),
        button: wire.button.filter(|s| !s.is_empty()),
        link: wire.link.filter(|s| !s.is_empty()),
        image: wire
            .img
            .filter(|s| !s.is_empty())
            .map(|img| normalize_media_src(media_base, &img)),
    }
}

#[must_use]
pub fn normalize_story_slide(wire: WireStorySlide, media_base: &str) -> StorySlide {
    StorySlide {
        id: wire.id,
        title: wire.title.unwrap_or_default(),
        description: wire.description.unwrap_or_default(),
        cta: wire.cta.filter(|s| !s.is_empty()),
        link: wire.link.filter(|s| !s.is_empty()),
        video_url: wire
            .video_url
            .filter(|s| !s.is_empty())
            .map(|path| normalize_story_video_src(media_base, &path)),
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
