//! Analytics events and the outbox they are queued in.
//!
//! Cart logic never calls a vendor SDK. It pushes [`OutboxEntry`] values and
//! something else (the relay in the client crate) delivers them later. A
//! failed delivery can therefore never undo or block a cart mutation.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::model::Product;
use crate::settings::StoreSettings;

pub const FB_PIXEL_SCRIPT: &str = "https://connect.facebook.net/en_US/fbevents.js";
const GTAG_SCRIPT: &str = "https://www.googletagmanager.com/gtag/js";
const GTM_SCRIPT: &str = "https://www.googletagmanager.com/gtm.js";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EventName {
    PageView,
    ViewContent,
    AddToCart,
}

impl EventName {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            EventName::PageView => "PageView",
            EventName::ViewContent => "ViewContent",
            EventName::AddToCart => "AddToCart",
        }
    }
}

/// One product line inside a conversion event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventProduct {
    #[serde(rename = "_id")]
    pub id: String,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub category: String,
}

/// A conversion event, shared by the pixel and the server relay.
///
/// Both copies carry the same `event_id` so the ad platform can deduplicate
/// the browser and server hits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingEvent {
    pub event_id: Uuid,
    pub event_name: EventName,
    pub products: Vec<EventProduct>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub event_time: DateTime<Utc>,
}

impl TrackingEvent {
    /// Single-unit event for `product` at `unit_price`.
    #[must_use]
    pub fn for_product(event_name: EventName, product: &Product, unit_price: Decimal) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            event_name,
            products: vec![EventProduct {
                id: product.id.clone(),
                quantity: 1,
                price: unit_price,
                category: product.category_name().to_owned(),
            }],
            total: unit_price,
            event_time: Utc::now(),
        }
    }

    #[must_use]
    pub fn page_view() -> Self {
        Self {
            event_id: Uuid::new_v4(),
            event_name: EventName::PageView,
            products: Vec::new(),
            total: Decimal::ZERO,
            event_time: Utc::now(),
        }
    }
}

/// Where an entry should be delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Client-side pixel call.
    Pixel,
    /// Conversions API hit relayed through the storefront backend.
    ServerRelay,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboxEntry {
    pub channel: Channel,
    pub event: TrackingEvent,
}

/// Sink for tracking events. Emission is infallible from the caller's side.
pub trait Outbox {
    fn emit(&self, entry: OutboxEntry);

    /// Queues `event` on both the pixel and the server relay.
    fn emit_everywhere(&self, event: TrackingEvent) {
        self.emit(OutboxEntry {
            channel: Channel::Pixel,
            event: event.clone(),
        });
        self.emit(OutboxEntry {
            channel: Channel::ServerRelay,
            event,
        });
    }
}

impl<T: Outbox + ?Sized> Outbox for Arc<T> {
    fn emit(&self, entry: OutboxEntry) {
        (**self).emit(entry);
    }
}

impl<T: Outbox + ?Sized> Outbox for &T {
    fn emit(&self, entry: OutboxEntry) {
        (**self).emit(entry);
    }
}

/// FIFO outbox kept in memory until drained.
#[derive(Debug, Default)]
pub struct InMemoryOutbox {
    queue: Mutex<VecDeque<OutboxEntry>>,
}

impl InMemoryOutbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns every queued entry in emission order.
    pub fn drain(&self) -> Vec<OutboxEntry> {
        match self.queue.lock() {
            Ok(mut queue) => queue.drain(..).collect(),
            Err(poisoned) => poisoned.into_inner().drain(..).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.lock().map_or(0, |q| q.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Outbox for InMemoryOutbox {
    fn emit(&self, entry: OutboxEntry) {
        match self.queue.lock() {
            Ok(mut queue) => queue.push_back(entry),
            Err(_) => tracing::warn!(
                event = entry.event.event_name.as_str(),
                "outbox lock poisoned, dropping tracking event"
            ),
        }
    }
}

/// Which vendor tags to load, derived from store settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackingPlan {
    pub facebook_pixel_id: Option<String>,
    pub google_analytics_id: Option<String>,
    pub google_tag_manager_id: Option<String>,
    pub google_ads_id: Option<String>,
}

impl TrackingPlan {
    /// Builds the plan from fetched settings.
    ///
    /// `settings` is `None` when the fetch failed; the pixel then falls back
    /// to `default_pixel_id` and no Google tag is loaded. Google tags never
    /// fall back to a default.
    #[must_use]
    pub fn from_settings(settings: Option<&StoreSettings>, default_pixel_id: Option<&str>) -> Self {
        let facebook_pixel_id = settings
            .and_then(|s| s.fb_pixel_id.clone())
            .or_else(|| default_pixel_id.map(str::to_owned));

        Self {
            facebook_pixel_id,
            google_analytics_id: settings.and_then(|s| s.google_analytics_id.clone()),
            google_tag_manager_id: settings.and_then(|s| s.google_tag_manager_id.clone()),
            google_ads_id: settings.and_then(|s| s.google_ads_id.clone()),
        }
    }

    /// Vendor script URLs to inject, each at most once.
    ///
    /// The gtag library is shared by GA4 and Ads: it is loaded with the GA4
    /// measurement ID when present, otherwise with the Ads ID.
    #[must_use]
    pub fn script_sources(&self) -> Vec<String> {
        let mut sources = Vec::new();

        if self.facebook_pixel_id.is_some() {
            sources.push(FB_PIXEL_SCRIPT.to_owned());
        }

        if let Some(gtag_id) = self
            .google_analytics_id
            .as_deref()
            .or(self.google_ads_id.as_deref())
        {
            sources.push(format!("{GTAG_SCRIPT}?id={gtag_id}"));
        }

        if let Some(gtm_id) = &self.google_tag_manager_id {
            sources.push(format!("{GTM_SCRIPT}?id={gtm_id}"));
        }

        sources
    }

    /// IDs passed to `gtag('config', ...)`, GA4 first.
    #[must_use]
    pub fn gtag_config_ids(&self) -> Vec<&str> {
        [&self.google_analytics_id, &self.google_ads_id]
            .into_iter()
            .filter_map(Option::as_deref)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::product;

    #[test]
    fn event_for_product_uses_category_or_unknown() {
        let mut p = product();
        let event = TrackingEvent::for_product(EventName::AddToCart, &p, Decimal::new(90, 0));
        assert_eq!(event.products[0].category, "Robes");
        assert_eq!(event.total, Decimal::new(90, 0));

        p.category = None;
        let event = TrackingEvent::for_product(EventName::ViewContent, &p, Decimal::ONE);
        assert_eq!(event.products[0].category, "Unknown");
    }

    #[test]
    fn event_serializes_for_the_relay() {
        let p = product();
        let event = TrackingEvent::for_product(EventName::AddToCart, &p, Decimal::new(905, 1));
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["eventName"], "AddToCart");
        assert_eq!(json["products"][0]["_id"], "665f1c2a9b");
        assert_eq!(json["products"][0]["price"], 90.5);
        assert_eq!(json["total"], 90.5);
        assert!(json["eventTime"].is_i64());
    }

    #[test]
    fn emit_everywhere_queues_both_channels_with_same_id() {
        let outbox = InMemoryOutbox::new();
        outbox.emit_everywhere(TrackingEvent::page_view());
        let entries = outbox.drain();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].channel, Channel::Pixel);
        assert_eq!(entries[1].channel, Channel::ServerRelay);
        assert_eq!(entries[0].event.event_id, entries[1].event.event_id);
        assert!(outbox.is_empty());
    }

    #[test]
    fn plan_falls_back_to_default_pixel() {
        let plan = TrackingPlan::from_settings(None, Some("999"));
        assert_eq!(plan.facebook_pixel_id.as_deref(), Some("999"));
        assert_eq!(plan.script_sources(), vec![FB_PIXEL_SCRIPT.to_owned()]);

        let settings = StoreSettings {
            fb_pixel_id: Some("111".to_owned()),
            ..StoreSettings::default()
        };
        let plan = TrackingPlan::from_settings(Some(&settings), Some("999"));
        assert_eq!(plan.facebook_pixel_id.as_deref(), Some("111"));
    }

    #[test]
    fn plan_without_any_ids_loads_nothing() {
        let plan = TrackingPlan::from_settings(Some(&StoreSettings::default()), None);
        assert!(plan.script_sources().is_empty());
        assert!(plan.gtag_config_ids().is_empty());
    }

    #[test]
    fn gtag_library_is_loaded_once() {
        let settings = StoreSettings {
            google_analytics_id: Some("G-ABC123".to_owned()),
            google_ads_id: Some("AW-42".to_owned()),
            google_tag_manager_id: Some("GTM-XYZ".to_owned()),
            ..StoreSettings::default()
        };
        let plan = TrackingPlan::from_settings(Some(&settings), None);
        assert_eq!(
            plan.script_sources(),
            vec![
                "https://www.googletagmanager.com/gtag/js?id=G-ABC123".to_owned(),
                "https://www.googletagmanager.com/gtm.js?id=GTM-XYZ".to_owned(),
            ]
        );
        assert_eq!(plan.gtag_config_ids(), vec!["G-ABC123", "AW-42"]);
    }

    #[test]
    fn ads_alone_loads_gtag_with_ads_id() {
        let settings = StoreSettings {
            google_ads_id: Some("AW-42".to_owned()),
            ..StoreSettings::default()
        };
        let plan = TrackingPlan::from_settings(Some(&settings), None);
        assert_eq!(
            plan.script_sources(),
            vec!["https://www.googletagmanager.com/gtag/js?id=AW-42".to_owned()]
        );
    }
}
