//! Category admin command handlers.

use std::path::PathBuf;

use clap::Subcommand;
use vitrine_client::StorefrontClient;
use vitrine_core::{CategoryDraft, FilePart};

/// Sub-commands available under `categories`.
#[derive(Debug, Subcommand)]
pub enum CategoryCommands {
    /// List all categories
    List,
    /// Create a category
    Create {
        /// Category name (e.g., Robes)
        name: String,
        /// Image file to upload with the category
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Delete a category by ID
    Delete {
        /// Category ID
        id: String,
    },
}

/// # Errors
///
/// Returns an error if the image cannot be read, the name is blank, or the
/// API request fails.
pub(crate) async fn run(client: &StorefrontClient, command: CategoryCommands) -> anyhow::Result<()> {
    match command {
        CategoryCommands::List => {
            let categories = client.list_categories().await?;
            if categories.is_empty() {
                println!("no categories found");
                return Ok(());
            }
            println!("{:<28}{:<24}{:<24}IMAGE", "ID", "NAME", "SLUG");
            for category in &categories {
                println!(
                    "{:<28}{:<24}{:<24}{}",
                    category.id,
                    category.name,
                    category.slug.as_deref().unwrap_or("\u{2014}"),
                    category.image.as_deref().unwrap_or("\u{2014}")
                );
            }
        }
        CategoryCommands::Create { name, image } => {
            let image = image.as_deref().map(FilePart::from_path).transpose()?;
            let draft = CategoryDraft::new(&name, image)?;
            client.create_category(&draft).await?;
            println!("category \"{}\" created", draft.name());
        }
        CategoryCommands::Delete { id } => {
            client.delete_category(&id).await?;
            println!("category {id} deleted");
        }
    }

    Ok(())
}
