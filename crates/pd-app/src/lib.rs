//! Pokédex Application Orchestration Layer
//!
//! This crate contains the use cases that bind catalog ports to views and
//! the view models those views render.

pub mod models;
pub mod usecases;

pub use usecases::{CatalogFacade, DetailResolver, EntityListBinding, ImageState, LoadCatalogPage};
