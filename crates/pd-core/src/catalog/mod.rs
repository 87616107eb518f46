//! Catalog listing models
//! 目录列表模型

mod reference;

pub use reference::{CatalogPage, EntityReference, PageRequest, DEFAULT_PAGE_LIMIT};
