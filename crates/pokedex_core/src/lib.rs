//! Pokedex core: pure listing/detail state machine and view-model helpers.
mod detail;
mod effect;
mod listing;
mod msg;
mod record;
mod state;
mod update;
mod view_model;

pub use detail::{BaseStat, DetailPhase, DetailState, PokemonDetail};
pub use effect::Effect;
pub use listing::{Cursor, FatalListError, ListingState, TransientLoadError, DEFAULT_FIRST_PAGE_URL};
pub use msg::Msg;
pub use record::{
    extract_id, sprite_url, Category, PageData, RecordError, ResourceRef, SummaryRecord,
    SENTINEL_CATEGORIES, SPRITE_URL_TEMPLATE,
};
pub use state::{AppState, RequestId};
pub use update::update;
pub use view_model::{
    format_tenths, AppViewModel, CategoryChipView, DetailCard, DetailViewModel, ListingViewModel,
    StatBarView, SummaryRowView,
};
