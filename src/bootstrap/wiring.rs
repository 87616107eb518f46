//! # Dependency Injection / 依赖注入模块
//!
//! The only place that depends on pd-infra and pd-app at once. Assembly
//! only: no decisions are made here.

use anyhow::Context;
use pd_app::CatalogFacade;
use pd_core::config::CatalogConfig;
use pd_infra::PokeApiClient;
use std::sync::Arc;

/// One HTTP client backs both the listing and the detail port.
pub fn build_facade(config: &CatalogConfig) -> anyhow::Result<CatalogFacade> {
    let client = Arc::new(PokeApiClient::new(config).context("Failed to create catalog client")?);
    Ok(CatalogFacade::new(
        client.clone(),
        client,
        config.page_request(),
    ))
}
