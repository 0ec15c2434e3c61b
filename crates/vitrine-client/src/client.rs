//! HTTP client for the storefront REST API.
//!
//! Every call is attempted exactly once. Failures surface as [`ClientError`]
//! and the caller decides what to show; nothing here retries.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use vitrine_core::{
    AppConfig, Category, CategoryDraft, FilePart, Product, ProductDraft, ProductQuery,
    SlideDraft, StoreSettings, StoreSettingsUpdate, StoryDraft, TrackingEvent,
};

use crate::error::ClientError;
use crate::normalize::{
    normalize_category, normalize_listing, normalize_product, normalize_slide,
    normalize_story_slide, ProductListing, Slide, StorySlide,
};
use crate::types::{
    ErrorBody, ImageUploadResponse, WireCategory, WireProduct, WireProductList, WireSlide,
    WireStorySlide,
};

/// Client for the storefront REST API.
///
/// Use [`StorefrontClient::new`] with the loaded [`AppConfig`], or
/// [`StorefrontClient::with_base_url`] to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct StorefrontClient {
    client: Client,
    base_url: Url,
    media_base: String,
}

impl StorefrontClient {
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if the
    /// configured API base URL does not parse.
    pub fn new(config: &AppConfig) -> Result<Self, ClientError> {
        Self::with_base_url(
            &config.api_base_url,
            &config.media_base_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        base_url: &str,
        media_base: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so endpoint segments are appended to
        // the base path instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: "URL cannot carry a path".to_owned(),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
            media_base: media_base.trim_end_matches('/').to_owned(),
        })
    }

    /// Prefix applied to relative media paths returned by the API.
    #[must_use]
    pub fn media_base(&self) -> &str {
        &self.media_base
    }

    // -----------------------------------------------------------------------
    // products
    // -----------------------------------------------------------------------

    /// `GET /products/:slug`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::NotFound`] if no product has that slug.
    /// - [`ClientError::Api`] on any other non-2xx status.
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Deserialize`] if the body does not match the product shape.
    pub async fn get_product(&self, slug: &str) -> Result<Product, ClientError> {
        let url = self.endpoint(&["products", slug]);
        let wire: WireProduct = self
            .fetch_json(self.client.get(url.clone()), &url, || format!("product {slug}"))
            .await?;
        Ok(normalize_product(wire, &self.media_base))
    }

    /// `GET /products` with paging, sort, category and filters.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_product`].
    pub async fn list_products(&self, query: &ProductQuery) -> Result<ProductListing, ClientError> {
        let mut url = self.endpoint(&["products"]);
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query.query_pairs() {
                pairs.append_pair(k, &v);
            }
        }
        let wire: WireProductList = self
            .fetch_json(self.client.get(url.clone()), &url, || {
                format!("product listing page {}", query.page)
            })
            .await?;
        Ok(normalize_listing(wire, &self.media_base))
    }

    /// `GET /products/new-arrivals/:category`, newest first. `"all"` spans
    /// every category.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_product`].
    pub async fn list_new_arrivals(&self, category: &str) -> Result<Vec<Product>, ClientError> {
        let url = self.endpoint(&["products", "new-arrivals", category]);
        let wire: WireProductList = self
            .fetch_json(self.client.get(url.clone()), &url, || {
                format!("new arrivals in {category}")
            })
            .await?;
        Ok(normalize_listing(wire, &self.media_base).products)
    }

    /// `POST /product` with the multipart draft.
    ///
    /// # Errors
    ///
    /// [`ClientError::Validation`] if the draft is incomplete, otherwise as
    /// [`Self::get_product`].
    pub async fn create_product(&self, draft: &ProductDraft) -> Result<(), ClientError> {
        let url = self.endpoint(&["product"]);
        let form = product_form(draft)?;
        self.send(self.client.post(url.clone()).multipart(form), &url)
            .await?;
        tracing::info!(title = %draft.product.title, "product created");
        Ok(())
    }

    /// `PUT /product/:slug` with the multipart draft.
    ///
    /// # Errors
    ///
    /// Same as [`Self::create_product`].
    pub async fn update_product(&self, slug: &str, draft: &ProductDraft) -> Result<(), ClientError> {
        let url = self.endpoint(&["product", slug]);
        let form = product_form(draft)?;
        self.send(self.client.put(url.clone()).multipart(form), &url)
            .await?;
        tracing::info!(slug, "product updated");
        Ok(())
    }

    /// `DELETE /product/:slug`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_product`].
    pub async fn delete_product(&self, slug: &str) -> Result<(), ClientError> {
        let url = self.endpoint(&["product", slug]);
        self.send(self.client.delete(url.clone()), &url).await?;
        tracing::info!(slug, "product deleted");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // categories
    // -----------------------------------------------------------------------

    /// `GET /categories`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_product`].
    pub async fn list_categories(&self) -> Result<Vec<Category>, ClientError> {
        let url = self.endpoint(&["categories"]);
        let wire: Vec<WireCategory> = self
            .fetch_json(self.client.get(url.clone()), &url, || "categories".to_owned())
            .await?;
        Ok(wire
            .into_iter()
            .map(|c| normalize_category(c, &self.media_base))
            .collect())
    }

    /// `GET /category/:slug`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_product`].
    pub async fn get_category(&self, slug: &str) -> Result<Category, ClientError> {
        let url = self.endpoint(&["category", slug]);
        let wire: WireCategory = self
            .fetch_json(self.client.get(url.clone()), &url, || format!("category {slug}"))
            .await?;
        Ok(normalize_category(wire, &self.media_base))
    }

    /// `GET /category/subs/:id`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_product`].
    pub async fn list_subcategories(&self, category_id: &str) -> Result<Vec<Category>, ClientError> {
        let url = self.endpoint(&["category", "subs", category_id]);
        let wire: Vec<WireCategory> = self
            .fetch_json(self.client.get(url.clone()), &url, || {
                format!("subcategories of {category_id}")
            })
            .await?;
        Ok(wire
            .into_iter()
            .map(|c| normalize_category(c, &self.media_base))
            .collect())
    }

    /// `POST /category` with `name` and an optional `image`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_product`].
    pub async fn create_category(&self, draft: &CategoryDraft) -> Result<(), ClientError> {
        let url = self.endpoint(&["category"]);
        let form = category_form(draft)?;
        self.send(self.client.post(url.clone()).multipart(form), &url)
            .await?;
        tracing::info!(name = draft.name(), "category created");
        Ok(())
    }

    /// `PUT /category/:slug`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_product`].
    pub async fn update_category(&self, slug: &str, draft: &CategoryDraft) -> Result<(), ClientError> {
        let url = self.endpoint(&["category", slug]);
        let form = category_form(draft)?;
        self.send(self.client.put(url.clone()).multipart(form), &url)
            .await?;
        tracing::info!(slug, "category updated");
        Ok(())
    }

    /// `DELETE /category/:id`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_product`].
    pub async fn delete_category(&self, id: &str) -> Result<(), ClientError> {
        let url = self.endpoint(&["category", id]);
        self.send(self.client.delete(url.clone()), &url).await?;
        tracing::info!(id, "category deleted");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // settings, media, tracking
    // -----------------------------------------------------------------------

    /// `GET /store-settings`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_product`].
    pub async fn get_store_settings(&self) -> Result<StoreSettings, ClientError> {
        let url = self.endpoint(&["store-settings"]);
        self.fetch_json(self.client.get(url.clone()), &url, || {
            "store settings".to_owned()
        })
        .await
    }

    /// `PUT /store-settings` (multipart). An empty update sends nothing.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_product`].
    pub async fn update_store_settings(
        &self,
        update: &StoreSettingsUpdate,
    ) -> Result<(), ClientError> {
        if update.is_empty() {
            tracing::debug!("store settings update has no fields, skipping request");
            return Ok(());
        }

        let url = self.endpoint(&["store-settings"]);
        let mut form = Form::new();
        for (name, value) in update.text_fields() {
            form = form.text(name, value);
        }
        if let Some(logo) = &update.logo {
            form = form.part("logo", file_part(logo)?);
        }
        self.send(self.client.put(url.clone()).multipart(form), &url)
            .await?;
        tracing::info!("store settings updated");
        Ok(())
    }

    /// `POST /user/upload-profile-image`. Returns the stored relative path.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_product`].
    pub async fn upload_profile_image(&self, image: &FilePart) -> Result<String, ClientError> {
        let url = self.endpoint(&["user", "upload-profile-image"]);
        let form = Form::new().part("image", file_part(image)?);
        let response: ImageUploadResponse = self
            .fetch_json(self.client.post(url.clone()).multipart(form), &url, || {
                "profile image upload".to_owned()
            })
            .await?;
        Ok(response.image_url)
    }

    /// `POST /fb-capi/event`: hands a conversion event to the backend, which
    /// forwards it to the Conversions API with the stored access token.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_product`].
    pub async fn send_server_event(&self, event: &TrackingEvent) -> Result<(), ClientError> {
        let url = self.endpoint(&["fb-capi", "event"]);
        self.send(self.client.post(url.clone()).json(event), &url)
            .await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // home page banners and stories
    // -----------------------------------------------------------------------

    /// `GET /slider`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_product`].
    pub async fn list_slides(&self) -> Result<Vec<Slide>, ClientError> {
        let url = self.endpoint(&["slider"]);
        let wire: Vec<WireSlide> = self
            .fetch_json(self.client.get(url.clone()), &url, || "slider".to_owned())
            .await?;
        Ok(wire
            .into_iter()
            .map(|s| normalize_slide(s, &self.media_base))
            .collect())
    }

    /// `POST /slider/create`. Returns the stored slide with its image URL
    /// resolved.
    ///
    /// # Errors
    ///
    /// [`ClientError::Validation`] if the draft has no image, otherwise as
    /// [`Self::get_product`].
    pub async fn create_slide(&self, draft: &SlideDraft) -> Result<Slide, ClientError> {
        draft.validate_for_create()?;
        let url = self.endpoint(&["slider", "create"]);
        let form = slide_form(draft)?;
        let wire: WireSlide = self
            .fetch_json(self.client.post(url.clone()).multipart(form), &url, || {
                "created slide".to_owned()
            })
            .await?;
        let slide = normalize_slide(wire, &self.media_base);
        tracing::info!(id = ?slide.id, title = %slide.title, "slide created");
        Ok(slide)
    }

    /// `PUT /slider/:id`. Without an image the stored one is kept.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_product`].
    pub async fn update_slide(&self, id: &str, draft: &SlideDraft) -> Result<(), ClientError> {
        let url = self.endpoint(&["slider", id]);
        let form = slide_form(draft)?;
        self.send(self.client.put(url.clone()).multipart(form), &url)
            .await?;
        tracing::info!(id, "slide updated");
        Ok(())
    }

    /// `DELETE /slider/delete/:id`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_product`].
    pub async fn delete_slide(&self, id: &str) -> Result<(), ClientError> {
        let url = self.endpoint(&["slider", "delete", id]);
        self.send(self.client.delete(url.clone()), &url).await?;
        tracing::info!(id, "slide deleted");
        Ok(())
    }

    /// `GET /story-slides`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_product`].
    pub async fn list_story_slides(&self) -> Result<Vec<StorySlide>, ClientError> {
        let url = self.endpoint(&["story-slides"]);
        let wire: Vec<WireStorySlide> = self
            .fetch_json(self.client.get(url.clone()), &url, || "story slides".to_owned())
            .await?;
        Ok(wire
            .into_iter()
            .map(|s| normalize_story_slide(s, &self.media_base))
            .collect())
    }

    /// `POST /story-slides` with the caption fields and the `video` part.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_product`].
    pub async fn create_story_slide(&self, draft: &StoryDraft) -> Result<(), ClientError> {
        let url = self.endpoint(&["story-slides"]);
        let mut form = Form::new();
        for (name, value) in draft.text_fields() {
            form = form.text(name, value);
        }
        form = form.part("video", file_part(draft.video())?);
        self.send(self.client.post(url.clone()).multipart(form), &url)
            .await?;
        tracing::info!("story slide created");
        Ok(())
    }

    /// `DELETE /story-slides/:id`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_product`].
    pub async fn delete_story_slide(&self, id: &str) -> Result<(), ClientError> {
        let url = self.endpoint(&["story-slides", id]);
        self.send(self.client.delete(url.clone()), &url).await?;
        tracing::info!(id, "story slide deleted");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // plumbing
    // -----------------------------------------------------------------------

    /// Appends path segments to the base URL. Segments are percent-encoded,
    /// so slugs containing `/` or spaces stay a single segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `with_base_url` rejects cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Sends the request and returns the body of a 2xx response.
    ///
    /// # Errors
    ///
    /// - [`ClientError::NotFound`] on 404.
    /// - [`ClientError::Api`] on any other non-2xx status, carrying the
    ///   server's message when the body has one.
    /// - [`ClientError::Http`] on network failure.
    async fn send(&self, request: RequestBuilder, url: &Url) -> Result<String, ClientError> {
        tracing::debug!(%url, "storefront request");
        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound {
                url: url.to_string(),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(ErrorBody::into_message);
            tracing::warn!(%url, status = status.as_u16(), ?message, "storefront API error");
            return Err(ClientError::Api {
                status: status.as_u16(),
                url: url.to_string(),
                message,
            });
        }

        Ok(response.text().await?)
    }

    async fn fetch_json<T, F>(
        &self,
        request: RequestBuilder,
        url: &Url,
        context: F,
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        F: FnOnce() -> String,
    {
        let body = self.send(request, url).await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
            context: context(),
            source: e,
        })
    }
}

fn file_part(file: &FilePart) -> Result<Part, ClientError> {
    Ok(Part::bytes(file.bytes.clone())
        .file_name(file.file_name.clone())
        .mime_str(&file.content_type)?)
}

fn product_form(draft: &ProductDraft) -> Result<Form, ClientError> {
    let mut form = Form::new();
    for (name, value) in draft.text_fields()? {
        form = form.text(name, value);
    }
    for (name, file) in draft.file_parts() {
        form = form.part(name, file_part(file)?);
    }
    Ok(form)
}

fn category_form(draft: &CategoryDraft) -> Result<Form, ClientError> {
    let mut form = Form::new().text("name", draft.name().to_owned());
    if let Some(image) = draft.image() {
        form = form.part("image", file_part(image)?);
    }
    Ok(form)
}

fn slide_form(draft: &SlideDraft) -> Result<Form, ClientError> {
    let mut form = Form::new();
    for (name, value) in draft.text_fields() {
        form = form.text(name, value);
    }
    if let Some(image) = draft.upload() {
        form = form.part("img", file_part(image)?);
    }
    Ok(form)
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
