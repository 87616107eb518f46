//! Presentation-facing entry points
//! 面向展示层的入口
//!
//! Each call hands out a fresh, independently owned handle. Nothing is
//! shared between the handles apart from the ports themselves: N detail
//! views mean N resolvers and N requests.

use super::detail_resolver::DetailResolver;
use super::entity_list::EntityListBinding;
use super::load_catalog_page::LoadCatalogPage;
use pd_core::catalog::PageRequest;
use pd_core::detail::{FrontSprite, FullDetail, Projection};
use pd_core::ports::{CatalogPort, DetailSourcePort};
use pd_core::Locator;
use std::sync::Arc;

#[derive(Clone)]
pub struct CatalogFacade {
    loader: Arc<LoadCatalogPage>,
    details: Arc<dyn DetailSourcePort>,
    page: PageRequest,
}

impl CatalogFacade {
    pub fn new(
        catalog: Arc<dyn CatalogPort>,
        details: Arc<dyn DetailSourcePort>,
        page: PageRequest,
    ) -> Self {
        Self {
            loader: Arc::new(LoadCatalogPage::from_arc(catalog)),
            details,
            page,
        }
    }

    /// New list binding for one mount of the list view.
    pub fn entity_list(&self) -> EntityListBinding {
        EntityListBinding::new(self.loader.clone(), self.page)
    }

    /// Full-record resolver already pointed at `locator`.
    pub async fn entity_detail(&self, locator: impl Into<Locator>) -> DetailResolver<FullDetail> {
        self.resolve_with(locator, FullDetail).await
    }

    /// Image-only resolver already pointed at `locator`.
    pub async fn entity_image(&self, locator: impl Into<Locator>) -> DetailResolver<FrontSprite> {
        self.resolve_with(locator, FrontSprite).await
    }

    pub async fn resolve_with<P: Projection>(
        &self,
        locator: impl Into<Locator>,
        projection: P,
    ) -> DetailResolver<P> {
        let resolver = DetailResolver::new(self.details.clone(), projection);
        resolver.set_locator(locator).await;
        resolver
    }
}
