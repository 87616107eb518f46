use crate::ids::Locator;
use serde::{Deserialize, Serialize};

/// Page size used when nothing else is configured.
pub const DEFAULT_PAGE_LIMIT: u32 = 20;

/// Lightweight reference to a catalog entry (name + detail locator).
/// 目录条目的轻量引用（名称 + 详情地址）
///
/// Immutable once produced by the collection loader. Identity is `name`,
/// which is assumed unique within one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityReference {
    pub name: String,
    #[serde(rename = "url")]
    pub detail_url: Locator,
}

impl EntityReference {
    pub fn new(name: impl Into<String>, detail_url: impl Into<Locator>) -> Self {
        Self {
            name: name.into(),
            detail_url: detail_url.into(),
        }
    }

    pub fn locator(&self) -> &Locator {
        &self.detail_url
    }
}

/// JSON envelope returned by the catalog listing endpoint.
///
/// Only `results` is consumed; `count`, `next` and `previous` are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogPage {
    pub results: Vec<EntityReference>,
}

/// Pagination window for one catalog request.
/// 单次目录请求的分页窗口
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub limit: u32,
    pub offset: u32,
}

impl PageRequest {
    pub fn new(limit: u32, offset: u32) -> Self {
        Self { limit, offset }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_LIMIT,
            offset: 0,
        }
    }
}
