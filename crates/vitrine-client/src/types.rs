//! Storefront API response types.
//!
//! Field names follow the API exactly, including its mixed casing
//! (`_id`, `Title`, `Price`, `Quantity`, `promotion`, `subCategory`).
//!
//! Numbers are not reliable on the wire: prices and quantities edited through
//! the admin form come back as strings (`"59.990"`, `"3"`) on older
//! documents. The `lenient_*` deserializers accept either form; anything
//! non-numeric or negative reads as zero, and a fractional count is rounded
//! up so `0.5` still reads as in stock.
//!
//! A variant's `quantity` key is meaningful when absent: it means the
//! merchant never tracked stock for that variant, and only an absent key maps
//! to `None`. An explicit `null` is a tracked count of zero.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// `GET /products/:slug`, and each entry of the listing.
#[derive(Debug, Deserialize)]
pub struct WireProduct {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "Description", default)]
    pub description: Option<String>,
    #[serde(rename = "Price", default, deserialize_with = "lenient_decimal")]
    pub price: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub promotion: Decimal,
    #[serde(rename = "Quantity", default, deserialize_with = "lenient_u32")]
    pub quantity: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub sold: u32,
    /// Populated object on public reads, bare ID on some admin reads.
    #[serde(rename = "Category", default)]
    pub category: Option<WireRef>,
    #[serde(rename = "subCategory", default)]
    pub sub_category: Option<WireRef>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub media: Vec<WireMedia>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub colors: Vec<WireColor>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sizes: Vec<WireSize>,
}

/// A reference that may or may not have been populated server-side.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum WireRef {
    Populated {
        #[serde(rename = "_id")]
        id: String,
        #[serde(default)]
        name: Option<String>,
    },
    Id(String),
}

#[derive(Debug, Deserialize)]
pub struct WireMedia {
    pub src: String,
    /// `"image"` or `"video"`; anything else is shown as an image.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WireColor {
    pub name: String,
    /// CSS color value.
    #[serde(default)]
    pub value: Option<String>,
    /// Fabric swatch image path. Wins over `value` when present.
    #[serde(default)]
    pub src: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_u32")]
    pub quantity: Option<u32>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub media: Vec<WireMedia>,
}

#[derive(Debug, Deserialize)]
pub struct WireSize {
    pub name: String,
    #[serde(default, deserialize_with = "lenient_opt_decimal")]
    pub price: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_opt_u32")]
    pub quantity: Option<u32>,
}

/// `GET /products?...`. The shop listing reports `total`, the category
/// listing `totalProducts`.
#[derive(Debug, Deserialize)]
pub struct WireProductList {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub products: Vec<WireProduct>,
    #[serde(rename = "totalPages", default, deserialize_with = "lenient_u32")]
    pub total_pages: u32,
    #[serde(default, alias = "totalProducts", deserialize_with = "lenient_u32")]
    pub total: u32,
}

#[derive(Debug, Deserialize)]
pub struct WireCategory {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// `GET /slider` banner entry.
#[derive(Debug, Deserialize)]
pub struct WireSlide {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub button: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub img: Option<String>,
}

/// `GET /story-slides` entry. `videoUrl` is a server path that may use
/// backslash separators.
#[derive(Debug, Deserialize)]
pub struct WireStorySlide {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub cta: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(rename = "videoUrl", default)]
    pub video_url: Option<String>,
}

/// `POST /user/upload-profile-image`.
#[derive(Debug, Deserialize)]
pub struct ImageUploadResponse {
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

/// Error body shape used by the API: `{"error": "..."}` or `{"message": "..."}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    pub(crate) fn into_message(self) -> Option<String> {
        self.error
            .or(self.message)
            .map(|m| m.trim().to_owned())
            .filter(|m| !m.is_empty())
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map_or(Decimal::ZERO, decimal_from_value))
}

fn lenient_opt_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .filter(|v| !v.is_null())
        .as_ref()
        .map(decimal_from_value))
}

fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map_or(0, count_from_value))
}

/// Only called when the key is present (absent keys take the field's
/// `default`), so every value here, `null` included, is a tracked count.
fn lenient_opt_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(Some(value.as_ref().map_or(0, count_from_value)))
}

fn decimal_from_value(value: &Value) -> Decimal {
    let parsed = match value {
        Value::Number(n) => {
            let text = n.to_string();
            text.parse::<Decimal>()
                .ok()
                .or_else(|| Decimal::from_scientific(&text).ok())
        }
        Value::String(s) => s.trim().parse::<Decimal>().ok(),
        _ => None,
    };
    parsed.unwrap_or(Decimal::ZERO).max(Decimal::ZERO)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn count_from_value(value: &Value) -> u32 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|n| n.is_finite() && *n > 0.0)
        .map_or(0, |n| n.ceil().min(f64::from(u32::MAX)) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_accepts_numeric_strings() {
        let product: WireProduct = serde_json::from_value(serde_json::json!({
            "_id": "p1",
            "Title": "Robe",
            "Price": "59.990",
            "promotion": 10,
            "Quantity": "4",
            "sold": null,
            "colors": [{ "name": "Noir", "quantity": "abc" }],
            "sizes": [{ "name": "M", "price": 65.5 }, { "name": "L", "quantity": 0 }]
        }))
        .unwrap();

        assert_eq!(product.price, Decimal::new(59_990, 3));
        assert_eq!(product.promotion, Decimal::new(10, 0));
        assert_eq!(product.quantity, 4);
        assert_eq!(product.sold, 0);
        assert_eq!(product.colors[0].quantity, Some(0));
        assert_eq!(product.sizes[0].price, Some(Decimal::new(655, 1)));
        assert_eq!(product.sizes[0].quantity, None);
        assert_eq!(product.sizes[1].quantity, Some(0));
        assert!(product.media.is_empty());
    }

    #[test]
    fn null_quantity_is_tracked_zero_but_absent_is_untracked() {
        let sizes: Vec<WireSize> = serde_json::from_value(serde_json::json!([
            { "name": "M", "quantity": null },
            { "name": "L" }
        ]))
        .unwrap();
        assert_eq!(sizes[0].quantity, Some(0));
        assert_eq!(sizes[1].quantity, None);

        let color: WireColor =
            serde_json::from_value(serde_json::json!({ "name": "Noir", "quantity": null }))
                .unwrap();
        assert_eq!(color.quantity, Some(0));
    }

    #[test]
    fn fractional_counts_round_up() {
        let sizes: Vec<WireSize> = serde_json::from_value(serde_json::json!([
            { "name": "S", "quantity": "0.5" },
            { "name": "M", "quantity": 2.2 },
            { "name": "L", "quantity": 3 }
        ]))
        .unwrap();
        let counts: Vec<Option<u32>> = sizes.iter().map(|s| s.quantity).collect();
        assert_eq!(counts, vec![Some(1), Some(3), Some(3)]);
    }

    #[test]
    fn negative_counts_read_as_zero() {
        let size: WireSize =
            serde_json::from_value(serde_json::json!({ "name": "S", "quantity": -3 })).unwrap();
        assert_eq!(size.quantity, Some(0));
    }

    #[test]
    fn category_may_be_bare_id() {
        let product: WireProduct = serde_json::from_value(serde_json::json!({
            "_id": "p1",
            "Category": "cat-9",
            "subCategory": { "_id": "sub-1", "name": "Maxi" }
        }))
        .unwrap();
        assert!(matches!(product.category, Some(WireRef::Id(ref id)) if id == "cat-9"));
        assert!(matches!(
            product.sub_category,
            Some(WireRef::Populated { ref name, .. }) if name.as_deref() == Some("Maxi")
        ));
    }

    #[test]
    fn listing_accepts_either_total_key() {
        let shop: WireProductList =
            serde_json::from_str(r#"{"products":[],"totalPages":3,"total":30}"#).unwrap();
        let category: WireProductList =
            serde_json::from_str(r#"{"products":null,"totalPages":"1","totalProducts":7}"#)
                .unwrap();
        assert_eq!((shop.total_pages, shop.total), (3, 30));
        assert_eq!((category.total_pages, category.total), (1, 7));
    }

    #[test]
    fn story_slide_tolerates_missing_fields() {
        let slide: WireStorySlide = serde_json::from_str(
            r#"{"_id":"s1","title":"Atelier","videoUrl":"uploads\\stories\\a.mp4"}"#,
        )
        .unwrap();
        assert_eq!(slide.video_url.as_deref(), Some(r"uploads\stories\a.mp4"));
        assert!(slide.cta.is_none());
    }

    #[test]
    fn error_body_prefers_error_field() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"error":"Slug taken","message":"Bad Request"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Slug taken"));

        let body: ErrorBody = serde_json::from_str(r#"{"message":"  "}"#).unwrap();
        assert!(body.into_message().is_none());
    }
}
