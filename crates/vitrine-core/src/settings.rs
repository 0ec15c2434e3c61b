//! Store-wide settings edited from the admin screens.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::draft::FilePart;
use crate::media::normalize_media_src;

/// Settings returned by `GET /store-settings`.
///
/// Blank strings on the wire are read as absent so "configured" always means
/// "has a usable value".
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSettings {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub store_name: Option<String>,
    /// Relative logo path, as stored by the API.
    #[serde(default, deserialize_with = "blank_as_none")]
    pub logo: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub fb_pixel_id: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing)]
    pub fb_access_token: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub google_analytics_id: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub google_tag_manager_id: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub google_ads_id: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub google_ads_conversion_label: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub google_search_console_code: Option<String>,
}

impl StoreSettings {
    /// Absolute logo URL under `media_base`.
    #[must_use]
    pub fn logo_url(&self, media_base: &str) -> Option<String> {
        self.logo
            .as_deref()
            .map(|logo| normalize_media_src(media_base, logo))
    }
}

impl fmt::Debug for StoreSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreSettings")
            .field("store_name", &self.store_name)
            .field("logo", &self.logo)
            .field("fb_pixel_id", &self.fb_pixel_id)
            .field(
                "fb_access_token",
                &self.fb_access_token.as_ref().map(|_| "[redacted]"),
            )
            .field("google_analytics_id", &self.google_analytics_id)
            .field("google_tag_manager_id", &self.google_tag_manager_id)
            .field("google_ads_id", &self.google_ads_id)
            .field(
                "google_ads_conversion_label",
                &self.google_ads_conversion_label,
            )
            .field("google_search_console_code", &self.google_search_console_code)
            .finish()
    }
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.and_then(|s| {
        let trimmed = s.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_owned())
    }))
}

/// Multipart body for `PUT /store-settings`.
///
/// Each admin form owns a subset of the fields and always sends all of them;
/// an empty string clears a value. Fields left as `None` are not sent and
/// keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreSettingsUpdate {
    pub store_name: Option<String>,
    pub logo: Option<FilePart>,
    pub fb_pixel_id: Option<String>,
    pub fb_access_token: Option<String>,
    pub google_analytics_id: Option<String>,
    pub google_tag_manager_id: Option<String>,
    pub google_ads_id: Option<String>,
    pub google_ads_conversion_label: Option<String>,
    pub google_search_console_code: Option<String>,
}

impl StoreSettingsUpdate {
    /// Store identity form: name plus an optional new logo.
    pub fn store(store_name: impl Into<String>, logo: Option<FilePart>) -> Self {
        Self {
            store_name: Some(store_name.into()),
            logo,
            ..Self::default()
        }
    }

    pub fn pixel(fb_pixel_id: impl Into<String>, fb_access_token: impl Into<String>) -> Self {
        Self {
            fb_pixel_id: Some(fb_pixel_id.into()),
            fb_access_token: Some(fb_access_token.into()),
            ..Self::default()
        }
    }

    pub fn analytics(
        google_analytics_id: impl Into<String>,
        google_tag_manager_id: impl Into<String>,
        google_ads_id: impl Into<String>,
        google_ads_conversion_label: impl Into<String>,
    ) -> Self {
        Self {
            google_analytics_id: Some(google_analytics_id.into()),
            google_tag_manager_id: Some(google_tag_manager_id.into()),
            google_ads_id: Some(google_ads_id.into()),
            google_ads_conversion_label: Some(google_ads_conversion_label.into()),
            ..Self::default()
        }
    }

    pub fn search_console(code: impl Into<String>) -> Self {
        Self {
            google_search_console_code: Some(code.into()),
            ..Self::default()
        }
    }

    /// Text parts in wire order, values trimmed.
    #[must_use]
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        [
            ("storeName", &self.store_name),
            ("fbPixelId", &self.fb_pixel_id),
            ("fbAccessToken", &self.fb_access_token),
            ("googleAnalyticsId", &self.google_analytics_id),
            ("googleTagManagerId", &self.google_tag_manager_id),
            ("googleAdsId", &self.google_ads_id),
            ("googleAdsConversionLabel", &self.google_ads_conversion_label),
            ("googleSearchConsoleCode", &self.google_search_console_code),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.as_deref().map(|v| (name, v.trim().to_owned())))
        .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.logo.is_none() && self.text_fields().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_strings_deserialize_as_absent() {
        let settings: StoreSettings = serde_json::from_str(
            r#"{"storeName":"Maison Sfax","logo":"","fbPixelId":"  ","googleAdsId":"AW-1"}"#,
        )
        .unwrap();
        assert_eq!(settings.store_name.as_deref(), Some("Maison Sfax"));
        assert!(settings.logo.is_none());
        assert!(settings.fb_pixel_id.is_none());
        assert_eq!(settings.google_ads_id.as_deref(), Some("AW-1"));
        assert!(settings.google_analytics_id.is_none());
    }

    #[test]
    fn null_and_unknown_fields_are_tolerated() {
        let settings: StoreSettings =
            serde_json::from_str(r#"{"_id":"x","storeName":null,"__v":0}"#).unwrap();
        assert_eq!(settings, StoreSettings::default());
    }

    #[test]
    fn debug_redacts_access_token() {
        let settings = StoreSettings {
            fb_access_token: Some("EAAB-secret".to_owned()),
            ..StoreSettings::default()
        };
        let rendered = format!("{settings:?}");
        assert!(!rendered.contains("EAAB-secret"));
        assert!(rendered.contains("[redacted]"));
    }

    #[test]
    fn logo_url_is_prefixed_with_media_base() {
        let settings = StoreSettings {
            logo: Some("/uploads/logo.png".to_owned()),
            ..StoreSettings::default()
        };
        assert_eq!(
            settings.logo_url("https://media.example.tn").as_deref(),
            Some("https://media.example.tn/uploads/logo.png")
        );
        assert!(StoreSettings::default().logo_url("x").is_none());
    }

    #[test]
    fn pixel_form_sends_both_fields_even_when_clearing() {
        let update = StoreSettingsUpdate::pixel(" 123456 ", "");
        assert_eq!(
            update.text_fields(),
            vec![
                ("fbPixelId", "123456".to_owned()),
                ("fbAccessToken", String::new()),
            ]
        );
    }

    #[test]
    fn empty_update_sends_nothing() {
        assert!(StoreSettingsUpdate::default().is_empty());
        assert!(!StoreSettingsUpdate::search_console("abc").is_empty());
    }
}
