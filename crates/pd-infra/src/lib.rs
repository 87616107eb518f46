//! Infrastructure adapters for the Pokédex client.
//!
//! Currently a single HTTP adapter backing both catalog ports.

pub mod network;

pub use network::PokeApiClient;
