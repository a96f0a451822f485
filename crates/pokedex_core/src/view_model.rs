use crate::{DetailPhase, ListingState, PokemonDetail, SummaryRecord};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub listing: ListingViewModel,
    pub detail: DetailViewModel,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListingViewModel {
    pub rows: Vec<SummaryRowView>,
    pub total_items: usize,
    pub is_loading: bool,
    /// Full-screen error; the list is not rendered while this is set.
    pub error: Option<String>,
    pub notification: Option<String>,
    pub search_text: String,
    pub selected_category: Option<String>,
    pub categories: Vec<CategoryChipView>,
    /// True when nothing matches and nothing is loading.
    pub show_empty_hint: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRowView {
    pub id: String,
    pub name: String,
    pub image_url: String,
    /// `#25 PIKACHU`
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryChipView {
    pub name: String,
    pub label: String,
    pub selected: bool,
}

impl ListingViewModel {
    pub(crate) fn from_state(state: &ListingState) -> Self {
        let rows: Vec<SummaryRowView> = state
            .visible_items()
            .into_iter()
            .map(SummaryRowView::from_record)
            .collect();
        let selected = state.selected_category().map(|c| c.name().to_string());
        let categories = state
            .categories()
            .iter()
            .map(|category| CategoryChipView {
                name: category.name().to_string(),
                label: category.name().to_uppercase(),
                selected: selected.as_deref() == Some(category.name()),
            })
            .collect();

        Self {
            show_empty_hint: rows.is_empty() && !state.is_loading(),
            rows,
            total_items: state.items().len(),
            is_loading: state.is_loading(),
            error: state.error().map(ToString::to_string),
            notification: state.notification().map(ToString::to_string),
            search_text: state.search_text().to_string(),
            selected_category: selected,
            categories,
        }
    }
}

impl SummaryRowView {
    fn from_record(record: &SummaryRecord) -> Self {
        Self {
            id: record.id().to_string(),
            name: record.name().to_string(),
            image_url: record.image_url().to_string(),
            label: format!("#{} {}", record.id(), record.name().to_uppercase()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DetailViewModel {
    #[default]
    Closed,
    Loading {
        name: String,
    },
    Loaded(DetailCard),
    Failed {
        name: String,
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailCard {
    pub title: String,
    pub artwork_url: Option<String>,
    pub types: Vec<String>,
    /// Metres, e.g. `"0.4"`.
    pub height_m: String,
    /// Kilograms, e.g. `"6"`.
    pub weight_kg: String,
    pub stats: Vec<StatBarView>,
    pub abilities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatBarView {
    /// `HP (45)`
    pub label: String,
    /// Bar fill, capped at 100.
    pub fill_percent: u32,
    /// Base stat above 50.
    pub strong: bool,
}

impl DetailViewModel {
    pub(crate) fn from_phase(phase: &DetailPhase) -> Self {
        match phase {
            DetailPhase::Closed => DetailViewModel::Closed,
            DetailPhase::Loading { name, .. } => DetailViewModel::Loading { name: name.clone() },
            DetailPhase::Loaded(detail) => DetailViewModel::Loaded(DetailCard::from_detail(detail)),
            DetailPhase::Failed { name, message } => DetailViewModel::Failed {
                name: name.clone(),
                message: message.clone(),
            },
        }
    }
}

impl DetailCard {
    fn from_detail(detail: &PokemonDetail) -> Self {
        Self {
            title: detail.name.to_uppercase(),
            artwork_url: detail.artwork_url.clone(),
            types: detail.types.iter().map(|t| t.to_uppercase()).collect(),
            height_m: format_tenths(detail.height_dm),
            weight_kg: format_tenths(detail.weight_hg),
            stats: detail
                .stats
                .iter()
                .map(|stat| StatBarView {
                    label: format!("{} ({})", stat.name.to_uppercase(), stat.base),
                    fill_percent: stat.base.min(100),
                    strong: stat.base > 50,
                })
                .collect(),
            abilities: detail.abilities.clone(),
        }
    }
}

/// Renders a value in tenths as a decimal, dropping a zero fraction.
pub fn format_tenths(value: u32) -> String {
    match value % 10 {
        0 => format!("{}", value / 10),
        fraction => format!("{}.{}", value / 10, fraction),
    }
}
