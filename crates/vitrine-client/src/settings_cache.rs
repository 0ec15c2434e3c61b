//! Process-wide store settings, fetched once and shared.
//!
//! Consumers hold an `Arc<SettingsCache<_>>` and call [`SettingsCache::get`];
//! only the first call (or the first after an invalidation) reaches the API.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Mutex;
use vitrine_core::{StoreSettings, StoreSettingsUpdate, TrackingPlan};

use crate::client::StorefrontClient;
use crate::error::ClientError;

/// Where settings are read from and written to.
pub trait SettingsSource {
    fn fetch_settings(&self) -> impl Future<Output = Result<StoreSettings, ClientError>> + Send;

    fn store_settings(
        &self,
        update: &StoreSettingsUpdate,
    ) -> impl Future<Output = Result<(), ClientError>> + Send;
}

impl SettingsSource for StorefrontClient {
    fn fetch_settings(&self) -> impl Future<Output = Result<StoreSettings, ClientError>> + Send {
        self.get_store_settings()
    }

    fn store_settings(
        &self,
        update: &StoreSettingsUpdate,
    ) -> impl Future<Output = Result<(), ClientError>> + Send {
        self.update_store_settings(update)
    }
}

#[derive(Debug)]
pub struct SettingsCache<S> {
    source: S,
    slot: Mutex<Option<Arc<StoreSettings>>>,
}

impl<S: SettingsSource> SettingsCache<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            slot: Mutex::new(None),
        }
    }

    /// Returns the cached settings, fetching them on first use.
    ///
    /// The lock is held across the fetch, so concurrent first callers wait
    /// for a single request instead of each issuing one. A failed fetch is
    /// not cached; the next call tries again.
    ///
    /// # Errors
    ///
    /// Propagates the source's error when a fetch is needed and fails.
    pub async fn get(&self) -> Result<Arc<StoreSettings>, ClientError> {
        let mut slot = self.slot.lock().await;
        if let Some(settings) = slot.as_ref() {
            return Ok(Arc::clone(settings));
        }

        let settings = Arc::new(self.source.fetch_settings().await?);
        tracing::debug!("store settings loaded");
        *slot = Some(Arc::clone(&settings));
        Ok(settings)
    }

    /// Settings already in the cache, without fetching.
    pub async fn cached(&self) -> Option<Arc<StoreSettings>> {
        self.slot.lock().await.clone()
    }

    /// Forces the next [`Self::get`] to refetch.
    pub async fn invalidate(&self) {
        *self.slot.lock().await = None;
    }

    /// Writes `update` through the source, then invalidates.
    ///
    /// # Errors
    ///
    /// Propagates the source's error; the cache is left untouched on failure.
    pub async fn update(&self, update: &StoreSettingsUpdate) -> Result<(), ClientError> {
        self.source.store_settings(update).await?;
        self.invalidate().await;
        Ok(())
    }

    /// Tag plan for the current settings.
    ///
    /// A failed settings fetch is logged and degrades to the default pixel
    /// with no Google tags.
    pub async fn tracking_plan(&self, default_pixel_id: Option<&str>) -> TrackingPlan {
        match self.get().await {
            Ok(settings) => TrackingPlan::from_settings(Some(&*settings), default_pixel_id),
            Err(e) => {
                tracing::warn!(error = %e, "store settings unavailable, using default tracking");
                TrackingPlan::from_settings(None, default_pixel_id)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;

    #[derive(Default)]
    struct CountingSource {
        fetches: AtomicUsize,
        stores: AtomicUsize,
        fail: bool,
    }

    impl SettingsSource for CountingSource {
        fn fetch_settings(&self) -> impl Future<Output = Result<StoreSettings, ClientError>> + Send {
            let n = self.fetches.fetch_add(1, Ordering::SeqCst) + 1;
            let fail = self.fail;
            async move {
                tokio::time::sleep(Duration::from_millis(20)).await;
                if fail {
                    return Err(ClientError::Api {
                        status: 500,
                        url: "http://api/store-settings".to_owned(),
                        message: None,
                    });
                }
                Ok(StoreSettings {
                    store_name: Some(format!("fetch {n}")),
                    fb_pixel_id: Some("111".to_owned()),
                    ..StoreSettings::default()
                })
            }
        }

        fn store_settings(
            &self,
            _update: &StoreSettingsUpdate,
        ) -> impl Future<Output = Result<(), ClientError>> + Send {
            self.stores.fetch_add(1, Ordering::SeqCst);
            async { Ok(()) }
        }
    }

    #[tokio::test]
    async fn concurrent_first_callers_share_one_fetch() {
        let cache = SettingsCache::new(CountingSource::default());
        let (a, b, c) = tokio::join!(cache.get(), cache.get(), cache.get());
        assert_eq!(cache.source.fetches.load(Ordering::SeqCst), 1);
        let (a, b, c) = (a.unwrap(), b.unwrap(), c.unwrap());
        assert!(Arc::ptr_eq(&a, &b) && Arc::ptr_eq(&b, &c));
    }

    #[tokio::test]
    async fn invalidate_forces_refetch() {
        let cache = SettingsCache::new(CountingSource::default());
        assert_eq!(cache.get().await.unwrap().store_name.as_deref(), Some("fetch 1"));
        assert_eq!(cache.get().await.unwrap().store_name.as_deref(), Some("fetch 1"));

        cache.invalidate().await;
        assert!(cache.cached().await.is_none());
        assert_eq!(cache.get().await.unwrap().store_name.as_deref(), Some("fetch 2"));
    }

    #[tokio::test]
    async fn update_writes_then_invalidates() {
        let cache = SettingsCache::new(CountingSource::default());
        cache.get().await.unwrap();
        cache
            .update(&StoreSettingsUpdate::search_console("abc"))
            .await
            .unwrap();
        assert_eq!(cache.source.stores.load(Ordering::SeqCst), 1);
        assert!(cache.cached().await.is_none());
    }

    #[tokio::test]
    async fn failed_fetch_is_not_cached_and_plan_degrades() {
        let cache = SettingsCache::new(CountingSource {
            fail: true,
            ..CountingSource::default()
        });
        let plan = cache.tracking_plan(Some("999")).await;
        assert_eq!(plan.facebook_pixel_id.as_deref(), Some("999"));
        assert!(cache.get().await.is_err());
        assert_eq!(cache.source.fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn plan_uses_fetched_pixel() {
        let cache = SettingsCache::new(CountingSource::default());
        let plan = cache.tracking_plan(Some("999")).await;
        assert_eq!(plan.facebook_pixel_id.as_deref(), Some("111"));
    }
}
