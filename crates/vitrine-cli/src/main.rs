mod cart;
mod categories;
mod home;
mod product;
mod settings;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use vitrine_client::{ClientError, StorefrontClient};
use vitrine_core::{AppConfig, CoreError};

use crate::cart::CartCommands;
use crate::categories::CategoryCommands;
use crate::home::{BannerCommands, StoryCommands};
use crate::product::ProductCommands;
use crate::settings::{SettingsCommands, TrackingCommands};

/// Message shown when an error carries nothing fit for the user.
const GENERIC_FAILURE: &str = "Une erreur est survenue. Veuillez réessayer.";

#[derive(Debug, Parser)]
#[command(name = "vitrine-cli")]
#[command(about = "Storefront catalog, cart and store settings from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse products
    Product {
        #[command(subcommand)]
        command: ProductCommands,
    },
    /// Add products to a cart and relay the tracking events
    Cart {
        #[command(subcommand)]
        command: CartCommands,
    },
    /// Manage categories
    Categories {
        #[command(subcommand)]
        command: CategoryCommands,
    },
    /// Manage the home page banner slides
    Banners {
        #[command(subcommand)]
        command: BannerCommands,
    },
    /// Manage the home page story videos
    Stories {
        #[command(subcommand)]
        command: StoryCommands,
    },
    /// Read and edit store settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },
    /// Inspect which analytics tags the storefront loads
    Tracking {
        #[command(subcommand)]
        command: TrackingCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("vitrine-cli: no command given; run with --help");
        return Ok(());
    };

    dotenvy::dotenv().ok();
    let config = vitrine_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(error) = run(command, &config).await {
        tracing::debug!(error = %error, "command failed");
        eprintln!("error: {}", user_message(&error));
        std::process::exit(1);
    }

    Ok(())
}

async fn run(command: Commands, config: &AppConfig) -> anyhow::Result<()> {
    let client = StorefrontClient::new(config)?;

    match command {
        Commands::Product { command } => match command {
            ProductCommands::Show { slug, color, size } => {
                product::run_product_show(client, &slug, color.as_deref(), size.as_deref())
                    .await?;
            }
            ProductCommands::List {
                page,
                per_page,
                sort,
                category,
            } => {
                product::run_product_list(&client, page, per_page, sort, category).await?;
            }
            ProductCommands::NewArrivals { category, limit } => {
                product::run_new_arrivals(&client, &category, limit).await?;
            }
        },
        Commands::Cart { command } => match command {
            CartCommands::Add {
                slug,
                color,
                size,
                buy_now,
            } => {
                cart::run_cart_add(
                    client,
                    config,
                    &slug,
                    color.as_deref(),
                    size.as_deref(),
                    buy_now,
                )
                .await?;
            }
        },
        Commands::Categories { command } => categories::run(&client, command).await?,
        Commands::Banners { command } => home::run_banners(&client, command).await?,
        Commands::Stories { command } => home::run_stories(&client, command).await?,
        Commands::Settings { command } => settings::run_settings(client, command).await?,
        Commands::Tracking { command } => match command {
            TrackingCommands::Plan => {
                settings::run_tracking_plan(client, config.default_fb_pixel_id.as_deref()).await;
            }
        },
    }

    Ok(())
}

/// Toast-style text for a failed command: the server's or validator's own
/// message when there is one, otherwise a generic notice.
fn user_message(error: &anyhow::Error) -> String {
    if let Some(client_error) = error.downcast_ref::<ClientError>() {
        return client_error.user_message(GENERIC_FAILURE);
    }
    if let Some(core_error) = error.downcast_ref::<CoreError>() {
        return core_error.to_string();
    }
    GENERIC_FAILURE.to_owned()
}
