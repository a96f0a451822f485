use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use pokedex_core::{BaseStat, Effect, Msg, PageData, PokemonDetail, ResourceRef};
use pokedex_engine::{
    CatalogClient, EngineEvent, EngineHandle, NamedResource, PokemonPayload,
};
use pokedex_logging::{dex_info, dex_warn};

use super::commands::Command;

/// Bridges core effects to the engine and engine events back to messages.
pub struct EffectRunner {
    engine: Arc<EngineHandle>,
}

impl EffectRunner {
    pub fn new(client: Arc<dyn CatalogClient>, msg_tx: mpsc::Sender<Command>) -> Self {
        let engine = Arc::new(EngineHandle::new(client));
        let runner = Self { engine };
        runner.spawn_event_loop(msg_tx);
        runner
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchPage { request, url } => {
                    dex_info!("FetchPage request={} url={}", request, url);
                    self.engine.fetch_page(request, url);
                }
                Effect::FetchCategory { request, category } => {
                    dex_info!("FetchCategory request={} category={}", request, category);
                    self.engine.fetch_category(request, category);
                }
                Effect::FetchCategories => {
                    dex_info!("FetchCategories");
                    self.engine.fetch_categories();
                }
                Effect::FetchDetails { request, name } => {
                    dex_info!("FetchDetails request={} name={}", request, name);
                    self.engine.fetch_details(request, name);
                }
            }
        }
    }

    fn spawn_event_loop(&self, msg_tx: mpsc::Sender<Command>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            if let Some(event) = engine.recv_timeout(Duration::from_millis(100)) {
                if msg_tx.send(Command::Dispatch(map_event(event))).is_err() {
                    break;
                }
            }
        });
    }
}

pub(crate) fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::PageFetched { request, result } => match result {
            Ok(page) => Msg::PageLoaded {
                request,
                page: PageData {
                    results: page.results.into_iter().map(map_resource).collect(),
                    next: page.next,
                },
            },
            Err(err) => {
                dex_warn!("Page request {} failed: {}", request, err);
                Msg::PageFailed {
                    request,
                    message: err.to_string(),
                }
            }
        },
        EngineEvent::CategoryFetched { request, result } => match result {
            Ok(members) => Msg::CategoryLoaded {
                request,
                members: members
                    .pokemon
                    .into_iter()
                    .map(|slot| map_resource(slot.pokemon))
                    .collect(),
            },
            Err(err) => {
                dex_warn!("Category request {} failed: {}", request, err);
                Msg::CategoryFailed {
                    request,
                    message: err.to_string(),
                }
            }
        },
        EngineEvent::CategoriesFetched { result } => match result {
            Ok(page) => {
                Msg::CategoriesLoaded(page.results.into_iter().map(|t| t.name).collect())
            }
            Err(err) => Msg::CategoriesFailed {
                message: err.to_string(),
            },
        },
        EngineEvent::DetailsFetched { request, result } => match result {
            Ok(payload) => Msg::DetailLoaded {
                request,
                detail: map_detail(payload),
            },
            Err(err) => Msg::DetailFailed {
                request,
                message: err.to_string(),
            },
        },
    }
}

fn map_resource(resource: NamedResource) -> ResourceRef {
    ResourceRef::new(resource.name, resource.url)
}

fn map_detail(payload: PokemonPayload) -> PokemonDetail {
    PokemonDetail {
        artwork_url: payload.artwork_url().map(ToOwned::to_owned),
        name: payload.name,
        types: payload.types.into_iter().map(|t| t.kind.name).collect(),
        height_dm: payload.height,
        weight_hg: payload.weight,
        stats: payload
            .stats
            .into_iter()
            .map(|s| BaseStat {
                name: s.stat.name,
                base: s.base_stat,
            })
            .collect(),
        abilities: payload.abilities.into_iter().map(|a| a.ability.name).collect(),
    }
}
