use crate::catalog::{EntityReference, PageRequest};
use crate::ports::errors::CatalogError;
use async_trait::async_trait;

#[async_trait]
pub trait CatalogPort: Send + Sync {
    /// 按分页窗口列出目录条目引用, 顺序与服务端一致
    ///
    /// Returns the `results` of one listing request verbatim: no sorting,
    /// no de-duplication.
    async fn list_references(
        &self,
        page: PageRequest,
    ) -> Result<Vec<EntityReference>, CatalogError>;
}
