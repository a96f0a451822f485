//! Pokedex engine: catalog HTTP client and request execution.
mod client;
mod engine;
mod types;
mod wire;

pub use client::{CatalogClient, ClientSettings, ReqwestCatalogClient, DEFAULT_BASE_URL};
pub use engine::EngineHandle;
pub use types::{EngineEvent, FailureKind, FetchError, RequestId};
pub use wire::{
    AbilityEntry, Artwork, NamedPage, NamedResource, OtherSprites, PokemonPayload, Sprites,
    StatEntry, TypeEntry, TypeMembers, TypeSlot,
};
