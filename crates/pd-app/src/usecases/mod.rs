//! Business logic use cases
//!
//! ```text
//! CatalogFacade
//!   ├── entity_list()    → EntityListBinding → LoadCatalogPage → CatalogPort
//!   ├── entity_detail()  → DetailResolver<FullDetail>  ┐
//!   └── entity_image()   → DetailResolver<FrontSprite> ┴→ DetailSourcePort
//! ```

pub mod catalog_facade;
pub mod detail_resolver;
pub mod entity_list;
pub mod load_catalog_page;

pub use catalog_facade::CatalogFacade;
pub use detail_resolver::{DetailResolver, ImageState};
pub use entity_list::EntityListBinding;
pub use load_catalog_page::LoadCatalogPage;
