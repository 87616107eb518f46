//! # pd-core
//!
//! Core domain models and business logic for the Pokédex client.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

// Public module exports
pub mod catalog;
pub mod config;
pub mod detail;
pub mod fetch;
pub mod ids;
pub mod ports;

// Re-export commonly used types at the crate root
pub use catalog::{CatalogPage, EntityReference, PageRequest};
pub use config::CatalogConfig;
pub use detail::{FrontSprite, FullDetail, PokemonDetail, Projection, ProjectionError};
pub use fetch::{FetchFailure, FetchState, ResolverAction, ResolverEvent, ResolverState};
pub use ids::Locator;
