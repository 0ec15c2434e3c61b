//! Home page banner and story admin command handlers.

use std::path::PathBuf;

use clap::Subcommand;
use vitrine_client::StorefrontClient;
use vitrine_core::{FilePart, SlideDraft, SlideImage, StoryDraft};

/// Sub-commands available under `banners`.
#[derive(Debug, Subcommand)]
pub enum BannerCommands {
    /// List the home page banner slides
    List,
    /// Create a banner slide from an uploaded file or a hosted image
    Create {
        #[command(flatten)]
        fields: BannerFields,
    },
    /// Replace a banner slide's text, and its image when one is given
    Update {
        /// Slide ID
        id: String,
        #[command(flatten)]
        fields: BannerFields,
    },
    /// Delete a banner slide by ID
    Delete {
        /// Slide ID
        id: String,
    },
}

#[derive(Debug, clap::Args)]
pub struct BannerFields {
    /// Headline shown over the image
    #[arg(long)]
    pub title: String,
    /// Button label
    #[arg(long, default_value = "Discover Selection")]
    pub button: String,
    /// Where the button leads
    #[arg(long, default_value = "/")]
    pub link: String,
    /// Image file to upload
    #[arg(long, conflicts_with = "image_url")]
    pub image: Option<PathBuf>,
    /// Already hosted image URL
    #[arg(long)]
    pub image_url: Option<String>,
}

impl BannerFields {
    fn into_draft(self) -> std::io::Result<SlideDraft> {
        let image = match (self.image, self.image_url) {
            (Some(path), _) => Some(SlideImage::Upload(FilePart::from_path(&path)?)),
            (None, Some(url)) => Some(SlideImage::Url(url)),
            (None, None) => None,
        };
        Ok(SlideDraft {
            title: self.title,
            button: self.button,
            link: self.link,
            image,
        })
    }
}

/// Sub-commands available under `stories`.
#[derive(Debug, Subcommand)]
pub enum StoryCommands {
    /// List the home page story videos
    List,
    /// Upload a story video
    Create {
        /// Video file to upload
        video: PathBuf,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Call-to-action label
        #[arg(long)]
        cta: Option<String>,
        #[arg(long)]
        link: Option<String>,
    },
    /// Delete a story by ID
    Delete {
        /// Story ID
        id: String,
    },
}

/// # Errors
///
/// Returns an error if the image cannot be read, a new slide has no image,
/// or the API request fails.
pub(crate) async fn run_banners(
    client: &StorefrontClient,
    command: BannerCommands,
) -> anyhow::Result<()> {
    match command {
        BannerCommands::List => {
            let slides = client.list_slides().await?;
            if slides.is_empty() {
                println!("no banner slides");
                return Ok(());
            }
            println!("{:<28}{:<32}{:<20}IMAGE", "ID", "TITLE", "LINK");
            for slide in &slides {
                println!(
                    "{:<28}{:<32}{:<20}{}",
                    slide.id.as_deref().unwrap_or("\u{2014}"),
                    slide.title,
                    slide.link.as_deref().unwrap_or("\u{2014}"),
                    slide.image.as_deref().unwrap_or("\u{2014}")
                );
            }
        }
        BannerCommands::Create { fields } => {
            let slide = client.create_slide(&fields.into_draft()?).await?;
            println!(
                "slide {} created: {}",
                slide.id.as_deref().unwrap_or("\u{2014}"),
                slide.image.as_deref().unwrap_or("no image")
            );
        }
        BannerCommands::Update { id, fields } => {
            client.update_slide(&id, &fields.into_draft()?).await?;
            println!("slide {id} updated");
        }
        BannerCommands::Delete { id } => {
            client.delete_slide(&id).await?;
            println!("slide {id} deleted");
        }
    }

    Ok(())
}

/// # Errors
///
/// Returns an error if the video cannot be read or is not a video, the
/// title is blank, or the API request fails.
pub(crate) async fn run_stories(
    client: &StorefrontClient,
    command: StoryCommands,
) -> anyhow::Result<()> {
    match command {
        StoryCommands::List => {
            let stories = client.list_story_slides().await?;
            if stories.is_empty() {
                println!("no stories");
                return Ok(());
            }
            println!("{:<28}{:<32}VIDEO", "ID", "TITLE");
            for story in &stories {
                println!(
                    "{:<28}{:<32}{}",
                    story.id.as_deref().unwrap_or("\u{2014}"),
                    story.title,
                    story.video_url.as_deref().unwrap_or("\u{2014}")
                );
            }
        }
        StoryCommands::Create {
            video,
            title,
            description,
            cta,
            link,
        } => {
            let video = FilePart::from_path(&video)?;
            let draft =
                StoryDraft::new(&title, &description, cta.as_deref(), link.as_deref(), video)?;
            client.create_story_slide(&draft).await?;
            println!("story \"{}\" created", title.trim());
        }
        StoryCommands::Delete { id } => {
            client.delete_story_slide(&id).await?;
            println!("story {id} deleted");
        }
    }

    Ok(())
}
