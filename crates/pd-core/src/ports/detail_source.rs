use crate::ids::Locator;
use crate::ports::errors::CatalogError;
use async_trait::async_trait;
use serde_json::Value;

#[async_trait]
pub trait DetailSourcePort: Send + Sync {
    /// Fetch the raw detail document behind `locator`.
    ///
    /// Callers apply a [`Projection`](crate::detail::Projection) to the
    /// returned document; the port itself never narrows it. Non-2xx
    /// responses are errors.
    async fn fetch_document(&self, locator: &Locator) -> Result<Value, CatalogError>;
}
