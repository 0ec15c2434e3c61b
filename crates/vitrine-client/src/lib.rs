//! Async client for the storefront REST API.
//!
//! Wraps `reqwest` with typed responses, wire-to-domain normalization, a
//! shared store-settings cache, delivery of queued tracking events, and the
//! product page loader.

pub mod account;
pub mod client;
pub mod error;
pub mod normalize;
pub mod page;
pub mod relay;
pub mod settings_cache;
pub mod types;

pub use account::{change_password, update_profile, AuthProvider};
pub use client::StorefrontClient;
pub use error::ClientError;
pub use normalize::{ProductListing, Slide, StorySlide};
pub use page::{ProductPage, ViewTask};
pub use relay::{deliver, DeliveryReport, LogPixelSink, PixelSink};
pub use settings_cache::{SettingsCache, SettingsSource};
