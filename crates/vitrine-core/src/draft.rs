//! Multipart payloads for the admin product, category, banner and story forms.

use std::fmt;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::availability::aggregate_quantity;
use crate::error::CoreError;
use crate::model::Product;

/// A file to be sent as one multipart part.
#[derive(Clone, PartialEq, Eq)]
pub struct FilePart {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl FilePart {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Reads `path` and guesses the content type from its extension.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the file cannot be read.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map_or_else(|| "upload".to_owned(), |n| n.to_string_lossy().into_owned());
        let content_type = content_type_for(path).to_owned();
        Ok(Self {
            file_name,
            content_type,
            bytes,
        })
    }

    #[must_use]
    pub fn is_video(&self) -> bool {
        self.content_type.starts_with("video/")
    }
}

impl fmt::Debug for FilePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilePart")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

#[derive(Serialize)]
struct ColorPayload<'a> {
    name: &'a str,
    value: &'a str,
    quantity: u32,
}

#[derive(Serialize)]
struct SizePayload<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none", with = "rust_decimal::serde::float_option")]
    price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    quantity: Option<u32>,
}

/// Body of `POST /product` and `PUT /product/:slug`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub product: Product,
    /// New uploads for the product-wide gallery.
    pub new_media: Vec<FilePart>,
    /// New uploads per color, keyed by the color's index.
    pub new_color_media: Vec<(usize, FilePart)>,
}

impl ProductDraft {
    pub fn new(product: Product) -> Self {
        Self {
            product,
            new_media: Vec::new(),
            new_color_media: Vec::new(),
        }
    }

    /// Text parts in the order the API expects them.
    ///
    /// `Quantity` is the variant aggregate, so the stored global count stays
    /// in sync with per-variant stock on every save.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MissingField`] when the title is blank.
    pub fn text_fields(&self) -> Result<Vec<(String, String)>, CoreError> {
        let p = &self.product;
        if p.title.trim().is_empty() {
            return Err(CoreError::MissingField("title"));
        }

        let mut fields = vec![
            ("Title".to_owned(), p.title.trim().to_owned()),
            ("Price".to_owned(), p.base_price.normalize().to_string()),
            ("promotion".to_owned(), p.promotion_percent.normalize().to_string()),
            ("Description".to_owned(), p.description.clone()),
            ("Quantity".to_owned(), aggregate_quantity(p).to_string()),
            ("sold".to_owned(), p.sold.to_string()),
        ];
        if let Some(category) = &p.category {
            fields.push(("Category".to_owned(), category.id.clone()));
        }
        if let Some(sub) = &p.sub_category {
            fields.push(("subCategory".to_owned(), sub.clone()));
        }

        let colors: Vec<ColorPayload<'_>> = p
            .colors
            .iter()
            .map(|c| ColorPayload {
                name: &c.name,
                value: c.value.as_deref().unwrap_or_default(),
                quantity: c.stock.quantity().unwrap_or(0),
            })
            .collect();
        fields.push(("colors".to_owned(), to_json(&colors)?));

        let sizes: Vec<SizePayload<'_>> = p
            .sizes
            .iter()
            .map(|s| SizePayload {
                name: &s.name,
                price: s.price_override,
                quantity: s.stock.quantity(),
            })
            .collect();
        fields.push(("sizes".to_owned(), to_json(&sizes)?));

        fields.extend(
            p.media
                .iter()
                .map(|m| ("existingMediaUrls[]".to_owned(), m.src.clone())),
        );

        Ok(fields)
    }

    /// File parts: gallery uploads then per-color uploads.
    #[must_use]
    pub fn file_parts(&self) -> Vec<(String, &FilePart)> {
        self.new_media
            .iter()
            .map(|f| ("mediaFiles".to_owned(), f))
            .chain(
                self.new_color_media
                    .iter()
                    .map(|(i, f)| (format!("colorMediaFiles[{i}]"), f)),
            )
            .collect()
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, CoreError> {
    serde_json::to_string(value).map_err(|e| CoreError::Invalid {
        field: "variants",
        reason: e.to_string(),
    })
}

/// Body of `POST /category` and `PUT /category/:slug`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDraft {
    name: String,
    image: Option<FilePart>,
}

impl CategoryDraft {
    /// # Errors
    ///
    /// Returns [`CoreError::MissingField`] when `name` is blank, before any
    /// request is built.
    pub fn new(name: &str, image: Option<FilePart>) -> Result<Self, CoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CoreError::MissingField("category name"));
        }
        Ok(Self {
            name: name.to_owned(),
            image,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn image(&self) -> Option<&FilePart> {
        self.image.as_ref()
    }
}

/// Where a banner slide's image comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlideImage {
    /// Uploaded as the `img` part.
    Upload(FilePart),
    /// An already hosted image, sent as the `imgUrl` field.
    Url(String),
}

/// Body of `POST /slider/create` and `PUT /slider/:id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideDraft {
    pub title: String,
    pub button: String,
    pub link: String,
    pub image: Option<SlideImage>,
}

impl SlideDraft {
    /// Multipart text fields in form order. `imgUrl` is only sent when the
    /// image is a hosted URL.
    #[must_use]
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("title", self.title.trim().to_owned()),
            ("button", self.button.trim().to_owned()),
            ("link", self.link.trim().to_owned()),
        ];
        if let Some(SlideImage::Url(url)) = &self.image {
            fields.push(("imgUrl", url.trim().to_owned()));
        }
        fields
    }

    #[must_use]
    pub fn upload(&self) -> Option<&FilePart> {
        match &self.image {
            Some(SlideImage::Upload(file)) => Some(file),
            _ => None,
        }
    }

    /// A new slide needs an image; an update may keep the stored one.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MissingField`] when there is neither an upload
    /// nor a non-blank URL.
    pub fn validate_for_create(&self) -> Result<(), CoreError> {
        match &self.image {
            Some(SlideImage::Upload(_)) => Ok(()),
            Some(SlideImage::Url(url)) if !url.trim().is_empty() => Ok(()),
            _ => Err(CoreError::MissingField("slide image")),
        }
    }
}

/// Body of the story slide upload: a short video with its caption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryDraft {
    title: String,
    description: String,
    cta: String,
    link: String,
    video: FilePart,
}

impl StoryDraft {
    /// # Errors
    ///
    /// - [`CoreError::MissingField`] when `title` is blank.
    /// - [`CoreError::Invalid`] when `video` is not a video file.
    pub fn new(
        title: &str,
        description: &str,
        cta: Option<&str>,
        link: Option<&str>,
        video: FilePart,
    ) -> Result<Self, CoreError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(CoreError::MissingField("story title"));
        }
        if !video.is_video() {
            return Err(CoreError::Invalid {
                field: "story video",
                reason: format!("{} is {}", video.file_name, video.content_type),
            });
        }
        Ok(Self {
            title: title.to_owned(),
            description: description.trim().to_owned(),
            cta: cta.unwrap_or_default().trim().to_owned(),
            link: link.unwrap_or_default().trim().to_owned(),
            video,
        })
    }

    /// Text fields in form order; `cta` and `link` go out blank when unset.
    #[must_use]
    pub fn text_fields(&self) -> [(&'static str, String); 4] {
        [
            ("title", self.title.clone()),
            ("description", self.description.clone()),
            ("cta", self.cta.clone()),
            ("link", self.link.clone()),
        ]
    }

    #[must_use]
    pub fn video(&self) -> &FilePart {
        &self.video
    }
}
