//! Terminal rendering of the list and detail screens
//! 列表与详情的终端渲染

use anyhow::Context;
use futures::future::join_all;
use pd_app::models::{CardView, ModalContent};
use pd_app::CatalogFacade;
use std::io::Write;
use tracing::{info, info_span, Instrument};

/// Mount the list, then resolve every card concurrently.
///
/// Each card owns its own resolver, so N cards issue N detail requests.
pub async fn render_list(facade: &CatalogFacade, out: &mut impl Write) -> anyhow::Result<()> {
    let span = info_span!("run.render_list");
    async {
        let list = facade.entity_list();
        list.mount().await.context("Could not load the catalog")?;

        let references = list.references();
        info!(count = references.len(), "catalog page loaded");

        let resolvers = join_all(
            references
                .iter()
                .map(|reference| facade.entity_detail(reference.locator())),
        )
        .await;
        let states = join_all(resolvers.iter().map(|resolver| resolver.settled())).await;

        for (reference, state) in references.iter().zip(&states) {
            write!(out, "{}", CardView::from_state(reference, state))?;
            writeln!(out)?;
        }
        anyhow::Ok(())
    }
    .instrument(span)
    .await
}

/// Resolve one entity by name and print its detail view.
pub async fn render_detail(
    facade: &CatalogFacade,
    base_url: &str,
    name: &str,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let locator = detail_locator(base_url, name);
    let span = info_span!("run.render_detail", locator = %locator);
    async {
        let resolver = facade.entity_detail(locator.as_str()).await;
        let state = resolver.settled().await;
        write!(out, "{}", ModalContent::from_state(&state))?;
        anyhow::Ok(())
    }
    .instrument(span)
    .await
}

/// `{base}/pokemon/{name}/`, the shape listing locators take.
fn detail_locator(base_url: &str, name: &str) -> String {
    format!(
        "{}/pokemon/{}/",
        base_url.trim_end_matches('/'),
        name.trim().to_lowercase()
    )
}
