//! Store settings and tracking command handlers.
//!
//! Every write goes through the settings cache so the next read in the same
//! process sees the new values. The pixel and analytics forms always submit
//! every field, so a flag left off is filled from the stored settings; only
//! an explicit empty value clears a field.

use std::path::PathBuf;

use clap::Subcommand;
use vitrine_client::{SettingsCache, StorefrontClient};
use vitrine_core::{FilePart, StoreSettings, StoreSettingsUpdate};

/// Sub-commands available under `settings`.
#[derive(Debug, Subcommand)]
pub enum SettingsCommands {
    /// Print the current store settings as JSON
    Show,
    /// Update the store name and optionally the logo
    Store {
        /// Store name shown in the header
        #[arg(long)]
        name: String,
        /// Logo image file
        #[arg(long)]
        logo: Option<PathBuf>,
    },
    /// Update the Facebook pixel and Conversions API token
    Pixel {
        /// Facebook pixel ID (pass "" to clear)
        #[arg(long)]
        pixel_id: Option<String>,
        /// Conversions API access token (pass "" to clear)
        #[arg(long, env = "VITRINE_FB_ACCESS_TOKEN", hide_env_values = true)]
        access_token: Option<String>,
    },
    /// Update Google Analytics, Tag Manager and Ads IDs
    Analytics {
        /// GA4 measurement ID (e.g., G-XXXXXXX)
        #[arg(long)]
        analytics_id: Option<String>,
        /// Tag Manager container ID (e.g., GTM-XXXXXX)
        #[arg(long)]
        tag_manager_id: Option<String>,
        /// Ads ID (e.g., AW-XXXXXXX)
        #[arg(long)]
        ads_id: Option<String>,
        /// Ads conversion label
        #[arg(long)]
        conversion_label: Option<String>,
    },
    /// Update the Search Console verification code
    SearchConsole {
        /// Verification code
        code: String,
    },
}

/// Sub-commands available under `tracking`.
#[derive(Debug, Subcommand)]
pub enum TrackingCommands {
    /// Show which vendor scripts the storefront would load
    Plan,
}

/// # Errors
///
/// Returns an error if a logo file cannot be read or the API request fails.
pub(crate) async fn run_settings(
    client: StorefrontClient,
    command: SettingsCommands,
) -> anyhow::Result<()> {
    let cache = SettingsCache::new(client);

    let update = match command {
        SettingsCommands::Show => {
            let settings = cache.get().await?;
            println!("{}", serde_json::to_string_pretty(&*settings)?);
            return Ok(());
        }
        SettingsCommands::Store { name, logo } => {
            let logo = logo.as_deref().map(FilePart::from_path).transpose()?;
            StoreSettingsUpdate::store(name, logo)
        }
        SettingsCommands::Pixel {
            pixel_id,
            access_token,
        } => pixel_update(pixel_id, access_token, &*cache.get().await?),
        SettingsCommands::Analytics {
            analytics_id,
            tag_manager_id,
            ads_id,
            conversion_label,
        } => analytics_update(
            analytics_id,
            tag_manager_id,
            ads_id,
            conversion_label,
            &*cache.get().await?,
        ),
        SettingsCommands::SearchConsole { code } => StoreSettingsUpdate::search_console(code),
    };

    cache.update(&update).await?;
    println!("settings saved");
    Ok(())
}

/// Pixel form: omitted flags keep their stored values.
pub(crate) fn pixel_update(
    pixel_id: Option<String>,
    access_token: Option<String>,
    current: &StoreSettings,
) -> StoreSettingsUpdate {
    StoreSettingsUpdate::pixel(
        keep(pixel_id, current.fb_pixel_id.as_deref()),
        keep(access_token, current.fb_access_token.as_deref()),
    )
}

/// Analytics form: omitted flags keep their stored values.
pub(crate) fn analytics_update(
    analytics_id: Option<String>,
    tag_manager_id: Option<String>,
    ads_id: Option<String>,
    conversion_label: Option<String>,
    current: &StoreSettings,
) -> StoreSettingsUpdate {
    StoreSettingsUpdate::analytics(
        keep(analytics_id, current.google_analytics_id.as_deref()),
        keep(tag_manager_id, current.google_tag_manager_id.as_deref()),
        keep(ads_id, current.google_ads_id.as_deref()),
        keep(conversion_label, current.google_ads_conversion_label.as_deref()),
    )
}

fn keep(flag: Option<String>, stored: Option<&str>) -> String {
    flag.or_else(|| stored.map(str::to_owned)).unwrap_or_default()
}

/// Print the tracking plan derived from the current store settings.
///
/// A failed settings fetch is not an error here: the plan degrades to the
/// default pixel, exactly as the storefront does.
pub(crate) async fn run_tracking_plan(client: StorefrontClient, default_pixel_id: Option<&str>) {
    let cache = SettingsCache::new(client);
    let plan = cache.tracking_plan(default_pixel_id).await;

    println!(
        "facebook pixel:     {}",
        plan.facebook_pixel_id.as_deref().unwrap_or("\u{2014}")
    );
    println!(
        "gtag config:        {}",
        match plan.gtag_config_ids().as_slice() {
            [] => "\u{2014}".to_owned(),
            ids => ids.join(", "),
        }
    );
    println!(
        "tag manager:        {}",
        plan.google_tag_manager_id.as_deref().unwrap_or("\u{2014}")
    );

    let sources = plan.script_sources();
    if sources.is_empty() {
        println!("scripts:            none");
        return;
    }
    println!("scripts:");
    for src in sources {
        println!("  {src}");
    }
}
