use pokedex_logging::{dex_debug, dex_warn};

use crate::{Effect, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseStat {
    pub name: String,
    pub base: u32,
}

/// Full record for one Pokémon, fetched on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PokemonDetail {
    pub name: String,
    pub artwork_url: Option<String>,
    pub types: Vec<String>,
    /// Height in decimetres, as reported by the catalog.
    pub height_dm: u32,
    /// Weight in hectograms, as reported by the catalog.
    pub weight_hg: u32,
    pub stats: Vec<BaseStat>,
    pub abilities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DetailPhase {
    #[default]
    Closed,
    Loading {
        request: RequestId,
        name: String,
    },
    Loaded(PokemonDetail),
    Failed {
        name: String,
        message: String,
    },
}

/// Detail coordinator: at most one detail request is awaited.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DetailState {
    phase: DetailPhase,
    last_request: RequestId,
}

impl DetailState {
    pub fn phase(&self) -> &DetailPhase {
        &self.phase
    }

    pub fn open(&mut self, name: impl Into<String>) -> Effect {
        let name = name.into();
        self.last_request += 1;
        let request = self.last_request;
        dex_debug!("Loading details request={} name={}", request, name);
        self.phase = DetailPhase::Loading {
            request,
            name: name.clone(),
        };
        Effect::FetchDetails { request, name }
    }

    pub fn close(&mut self) -> bool {
        let was_open = self.phase != DetailPhase::Closed;
        self.phase = DetailPhase::Closed;
        was_open
    }

    pub fn apply_loaded(&mut self, request: RequestId, detail: PokemonDetail) -> bool {
        if self.awaiting(request).is_none() {
            dex_debug!("Ignoring stale detail response request={}", request);
            return false;
        }
        self.phase = DetailPhase::Loaded(detail);
        true
    }

    pub fn apply_failure(&mut self, request: RequestId, message: String) -> bool {
        let Some(name) = self.awaiting(request) else {
            dex_debug!("Ignoring stale detail failure request={}", request);
            return false;
        };
        dex_warn!("Details for {} failed to load: {}", name, message);
        self.phase = DetailPhase::Failed {
            name,
            message: "Could not load details.".to_string(),
        };
        true
    }

    fn awaiting(&self, request: RequestId) -> Option<String> {
        match &self.phase {
            DetailPhase::Loading {
                request: pending,
                name,
            } if *pending == request => Some(name.clone()),
            _ => None,
        }
    }
}
