mod pokeapi_client;

pub use pokeapi_client::PokeApiClient;
