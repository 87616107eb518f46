//! Mount-once binding of the collection loader to a view
//! 目录列表与视图的绑定 (每次挂载仅加载一次)

use super::load_catalog_page::LoadCatalogPage;
use anyhow::Result;
use pd_core::catalog::{EntityReference, PageRequest};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use tokio::sync::watch;
use tracing::{debug, warn};

/// View-side handle on one page of references.
///
/// ## Behavior / 行为
/// - Initial value is an empty list
/// - [`mount`](Self::mount) invokes the loader exactly once per binding
/// - A remount is a new binding; the list is replaced wholesale, never mutated
/// - A failed load is remembered: later `mount` calls return the same error
pub struct EntityListBinding {
    loader: Arc<LoadCatalogPage>,
    page: PageRequest,
    mounted: AtomicBool,
    failure: OnceLock<String>,
    references: watch::Sender<Vec<EntityReference>>,
}

impl EntityListBinding {
    pub fn new(loader: Arc<LoadCatalogPage>, page: PageRequest) -> Self {
        let (references, _) = watch::channel(Vec::new());
        Self {
            loader,
            page,
            mounted: AtomicBool::new(false),
            failure: OnceLock::new(),
            references,
        }
    }

    /// Load the page and publish it.
    ///
    /// On failure the list stays empty and the error is returned so the
    /// caller can present an error state. Later calls do not reload: they
    /// return `Ok` after a successful load and the original error after a
    /// failed one.
    pub async fn mount(&self) -> Result<()> {
        if self.mounted.swap(true, Ordering::SeqCst) {
            debug!("entity list already mounted, skipping load");
            return match self.failure.get() {
                Some(message) => Err(anyhow::anyhow!(
                    "Entity list failed to load: {message}"
                )),
                None => Ok(()),
            };
        }

        match self.loader.execute(self.page).await {
            Ok(references) => {
                self.references.send_replace(references);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "entity list failed to load");
                let _ = self.failure.set(err.to_string());
                Err(err)
            }
        }
    }

    pub fn references(&self) -> Vec<EntityReference> {
        self.references.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<EntityReference>> {
        self.references.subscribe()
    }

    pub fn page(&self) -> PageRequest {
        self.page
    }
}
