//! Terminal Pokédex over the PokeAPI catalog
//!
//! Bootstrap only: configuration, tracing and wiring of the workspace crates.

pub mod bootstrap;
