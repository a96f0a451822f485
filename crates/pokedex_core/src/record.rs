use url::Url;

/// Sprite template used for list thumbnails; `{id}` is the catalog id.
pub const SPRITE_URL_TEMPLATE: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/{id}.png";

/// Pseudo-categories the catalog reports but which have no usable members.
pub const SENTINEL_CATEGORIES: [&str; 2] = ["unknown", "shadow"];

/// Raw `{name, url}` pair as listed by the remote catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRef {
    pub name: String,
    pub url: String,
}

impl ResourceRef {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// One page of the paged catalog listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageData {
    pub results: Vec<ResourceRef>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("invalid resource url {url}: {message}")]
    InvalidUrl { url: String, message: String },
    #[error("resource url {url} has no id segment")]
    MissingId { url: String },
}

/// Minimal catalog entry shown in the list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRecord {
    name: String,
    id: String,
    image_url: String,
}

impl SummaryRecord {
    pub fn from_resource(resource: &ResourceRef) -> Result<Self, RecordError> {
        let id = extract_id(&resource.url)?;
        Ok(Self {
            name: resource.name.clone(),
            image_url: sprite_url(&id),
            id,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    /// Case-insensitive name match, or verbatim id match.
    pub fn matches_search(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(&needle.to_lowercase()) || self.id.contains(needle)
    }
}

/// A selectable "type" from the catalog vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Category {
    name: String,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_sentinel(&self) -> bool {
        SENTINEL_CATEGORIES.contains(&self.name.as_str())
    }
}

/// Extracts the catalog id: the second-to-last path segment of a resource URL.
///
/// `https://pokeapi.co/api/v2/pokemon/25/` yields `"25"`.
pub fn extract_id(resource_url: &str) -> Result<String, RecordError> {
    let parsed = Url::parse(resource_url).map_err(|err| RecordError::InvalidUrl {
        url: resource_url.to_string(),
        message: err.to_string(),
    })?;
    let segments: Vec<&str> = parsed
        .path_segments()
        .map(|segments| segments.collect())
        .unwrap_or_default();

    match segments
        .len()
        .checked_sub(2)
        .and_then(|index| segments.get(index))
    {
        Some(id) if !id.is_empty() => Ok((*id).to_string()),
        _ => Err(RecordError::MissingId {
            url: resource_url.to_string(),
        }),
    }
}

pub fn sprite_url(id: &str) -> String {
    SPRITE_URL_TEMPLATE.replace("{id}", id)
}

pub(crate) fn parse_records(resources: &[ResourceRef]) -> Result<Vec<SummaryRecord>, RecordError> {
    resources.iter().map(SummaryRecord::from_resource).collect()
}
