//! JSON shapes returned by the catalog. Unknown fields are ignored.
use serde::Deserialize;

/// `{name, url}` reference to another catalog resource.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// Paged listing, e.g. `GET /pokemon?limit=20` or `GET /type`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NamedPage {
    pub results: Vec<NamedResource>,
    #[serde(default)]
    pub next: Option<String>,
}

/// `GET /type/{name}`: every member of one type, unpaged.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TypeMembers {
    pub pokemon: Vec<TypeSlot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TypeSlot {
    pub pokemon: NamedResource,
}

/// `GET /pokemon/{name}`, trimmed to the fields the detail view shows.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PokemonPayload {
    pub name: String,
    pub height: u32,
    pub weight: u32,
    #[serde(default)]
    pub sprites: Sprites,
    #[serde(default)]
    pub types: Vec<TypeEntry>,
    #[serde(default)]
    pub stats: Vec<StatEntry>,
    #[serde(default)]
    pub abilities: Vec<AbilityEntry>,
}

impl PokemonPayload {
    pub fn artwork_url(&self) -> Option<&str> {
        self.sprites
            .other
            .as_ref()
            .and_then(|other| other.official_artwork.as_ref())
            .and_then(|artwork| artwork.front_default.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Sprites {
    #[serde(default)]
    pub other: Option<OtherSprites>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct OtherSprites {
    #[serde(rename = "official-artwork", default)]
    pub official_artwork: Option<Artwork>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Artwork {
    #[serde(default)]
    pub front_default: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TypeEntry {
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatEntry {
    pub base_stat: u32,
    pub stat: NamedResource,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AbilityEntry {
    pub ability: NamedResource,
}
