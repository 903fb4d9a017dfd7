//! API client for the Pokémon TCG card service

pub mod pokemon_tcg;

pub use pokemon_tcg::PokemonTcgClient;
