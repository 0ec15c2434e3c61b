//! Product detail page loading.
//!
//! Fetches run as spawned tasks owned by the page. Dropping the page (the
//! user navigated away) aborts any fetch still in flight, so a late response
//! can never land on a view that no longer exists.

use std::future::Future;

use tokio::task::JoinHandle;
use vitrine_core::{Product, ProductView};

use crate::client::StorefrontClient;
use crate::error::ClientError;

/// A spawned task that is aborted when dropped.
#[derive(Debug)]
pub struct ViewTask<T> {
    handle: JoinHandle<T>,
}

impl<T: Send + 'static> ViewTask<T> {
    pub fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Self {
            handle: tokio::spawn(future),
        }
    }

    /// Waits for the task's output.
    ///
    /// # Errors
    ///
    /// Returns the join error if the task was aborted or panicked.
    pub async fn join(mut self) -> Result<T, tokio::task::JoinError> {
        (&mut self.handle).await
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl<T> Drop for ViewTask<T> {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// The product detail page: the last good view plus any fetch in flight.
#[derive(Debug)]
pub struct ProductPage {
    client: StorefrontClient,
    slug: String,
    view: Option<ProductView>,
    pending: Option<ViewTask<Result<Product, ClientError>>>,
}

impl ProductPage {
    pub fn new(client: StorefrontClient, slug: impl Into<String>) -> Self {
        Self {
            client,
            slug: slug.into(),
            view: None,
            pending: None,
        }
    }

    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// The last successfully loaded view, if any.
    #[must_use]
    pub fn view(&self) -> Option<&ProductView> {
        self.view.as_ref()
    }

    pub fn view_mut(&mut self) -> Option<&mut ProductView> {
        self.view.as_mut()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Starts fetching the product in the background. A fetch already in
    /// flight is aborted and replaced.
    pub fn start_load(&mut self) {
        self.pending = Some(self.spawn_fetch());
    }

    fn spawn_fetch(&self) -> ViewTask<Result<Product, ClientError>> {
        let client = self.client.clone();
        let slug = self.slug.clone();
        ViewTask::spawn(async move { client.get_product(&slug).await })
    }

    /// Waits for the pending fetch and applies it.
    ///
    /// On success the view is replaced and the selection starts over from
    /// the new product. On failure the previous view stays displayed and the
    /// error is returned for the caller to report. With nothing pending,
    /// a fetch is started first.
    ///
    /// # Errors
    ///
    /// Returns the fetch error, or [`ClientError::Task`] if the fetch task
    /// was aborted.
    pub async fn finish_load(&mut self) -> Result<&ProductView, ClientError> {
        let task = self.pending.take().unwrap_or_else(|| self.spawn_fetch());
        let result = match task.join().await {
            Ok(result) => result,
            Err(e) => Err(ClientError::from(e)),
        };

        match result {
            Ok(product) => {
                tracing::debug!(slug = %self.slug, product_id = %product.id, "product loaded");
                Ok(&*self.view.insert(ProductView::new(product)))
            }
            Err(e) => {
                tracing::warn!(
                    slug = %self.slug,
                    error = %e,
                    stale = self.view.is_some(),
                    "product fetch failed, keeping previous view"
                );
                Err(e)
            }
        }
    }

    /// Fetches the product and waits for it.
    ///
    /// # Errors
    ///
    /// Same as [`Self::finish_load`].
    pub async fn load(&mut self) -> Result<&ProductView, ClientError> {
        self.start_load();
        self.finish_load().await
    }
}
