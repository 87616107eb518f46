use anyhow::Result;
use pd_core::catalog::{EntityReference, PageRequest};
use pd_core::ports::CatalogPort;
use std::sync::Arc;
use tracing::{info, info_span, Instrument};

/// Use case for loading one page of catalog references (collection loader)
/// 加载一页目录引用的用例
pub struct LoadCatalogPage {
    catalog: Arc<dyn CatalogPort>,
    max_limit: u32,
}

impl LoadCatalogPage {
    /// Create a new use case instance from a trait object
    /// 从 trait 对象创建新的用例实例
    pub fn from_arc(catalog: Arc<dyn CatalogPort>) -> Self {
        Self {
            catalog,
            max_limit: 1000, // Business rule: the upstream API caps pages well below this
        }
    }

    /// Lists catalog references for the given pagination window.
    ///
    /// The returned sequence is exactly what the catalog served: no sorting,
    /// no de-duplication. Nothing is retried.
    ///
    /// # Errors
    ///
    /// Returns an error if `limit` is 0, `limit` exceeds the configured
    /// maximum, or the catalog request fails (transport, status or decode).
    pub async fn execute(&self, page: PageRequest) -> Result<Vec<EntityReference>> {
        let span = info_span!(
            "usecase.load_catalog_page.execute",
            limit = page.limit,
            offset = page.offset
        );

        async {
            if page.limit == 0 {
                return Err(anyhow::anyhow!(
                    "Invalid limit: {}. Must be at least 1",
                    page.limit
                ));
            }

            if page.limit > self.max_limit {
                return Err(anyhow::anyhow!(
                    "Invalid limit: {}. Must be at most {}",
                    page.limit,
                    self.max_limit
                ));
            }

            let references = self
                .catalog
                .list_references(page)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to load catalog page: {}", e))?;

            info!(count = references.len(), "Catalog page loaded");
            Ok(references)
        }
        .instrument(span)
        .await
    }
}
