//! Port interfaces for the application layer
//!
//! Ports define the contract between the application logic (use cases)
//! and infrastructure implementations. The HTTP adapter in `pd-infra`
//! implements both of them; tests substitute in-memory fakes.

mod catalog;
mod detail_source;
pub mod errors;

pub use catalog::CatalogPort;
pub use detail_source::DetailSourcePort;
pub use errors::CatalogError;
