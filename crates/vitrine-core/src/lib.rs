//! Storefront domain for vitrine.
//!
//! Holds the product data model and the variant resolution engine used by the
//! product detail view (active media, effective price, availability), the
//! selection state machine, the cart store, and the tracking outbox that keeps
//! analytics side effects out of cart mutations. Nothing in this crate talks
//! to the network.

pub mod account;
pub mod app_config;
pub mod availability;
pub mod cart;
pub mod config;
pub mod draft;
pub mod error;
pub mod listing;
pub mod media;
pub mod model;
pub mod pricing;
pub mod selection;
pub mod settings;
pub mod tracking;

pub use account::PasswordChange;
pub use app_config::{AppConfig, Environment};
pub use availability::{aggregate_quantity, resolve_availability};
pub use cart::{
    build_cart_line, CartAction, CartLineItem, CartStore, PurchaseEffect, PurchaseIntent,
    Storefront,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use draft::{CategoryDraft, FilePart, ProductDraft, SlideDraft, SlideImage, StoryDraft};
pub use error::{ConfigError, CoreError};
pub use listing::{category_display_name, PageWindow, ProductQuery};
pub use media::{
    initial_media, normalize_media_src, normalize_story_video_src, resolve_active_media,
};
pub use model::{
    Category, CategoryRef, ColorVariant, MediaItem, MediaKind, Product, SizeVariant, Stock,
    Swatch,
};
pub use pricing::{format_tnd, resolve_price, PriceBreakdown};
pub use selection::{ProductView, Selection, SelectionState};
pub use settings::{StoreSettings, StoreSettingsUpdate};
pub use tracking::{
    Channel, EventName, EventProduct, InMemoryOutbox, Outbox, OutboxEntry, TrackingEvent,
    TrackingPlan,
};
