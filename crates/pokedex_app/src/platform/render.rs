use pokedex_core::{AppViewModel, DetailCard, DetailViewModel, ListingViewModel};

const BAR_WIDTH: u32 = 20;

/// Renders the active screen. `clock` stamps transient notifications.
pub fn render(view: &AppViewModel, clock: &str) -> String {
    match &view.detail {
        DetailViewModel::Closed => render_listing(&view.listing, clock),
        detail => render_detail(detail),
    }
}

pub fn render_listing(view: &ListingViewModel, clock: &str) -> String {
    let mut lines = Vec::new();

    if let Some(error) = &view.error {
        lines.push(format!("!! {error}"));
        lines.push("Check your internet connection.".to_string());
        lines.push("Type `retry` to try again.".to_string());
        return lines.join("\n");
    }

    lines.push(header(view));
    lines.extend(view.rows.iter().map(|row| format!("  {}", row.label)));

    if view.show_empty_hint {
        lines.push("  No Pokémon found.".to_string());
    }
    if view.is_loading {
        lines.push("  Loading...".to_string());
    }
    if let Some(notification) = &view.notification {
        lines.push(format!("[{clock}] {notification} (`dismiss` to hide)"));
    }
    lines.join("\n")
}

fn header(view: &ListingViewModel) -> String {
    let filter = view
        .selected_category
        .as_deref()
        .map(|name| format!(" | type: {}", name.to_uppercase()))
        .unwrap_or_default();
    let search = if view.search_text.is_empty() {
        String::new()
    } else {
        format!(" | search: {:?}", view.search_text)
    };
    format!(
        "Pokédex: showing {} of {}{}{}",
        view.rows.len(),
        view.total_items,
        filter,
        search
    )
}

/// Category chips; the selected one is bracketed.
pub fn render_categories(view: &ListingViewModel) -> String {
    if view.categories.is_empty() {
        return "No filters available.".to_string();
    }
    view.categories
        .iter()
        .map(|chip| {
            if chip.selected {
                format!("[{}]", chip.label)
            } else {
                chip.label.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_detail(detail: &DetailViewModel) -> String {
    match detail {
        DetailViewModel::Closed => String::new(),
        DetailViewModel::Loading { name } => format!("Loading data for {name}..."),
        DetailViewModel::Failed { name, message } => {
            format!("{message} ({name})\nType `back` to return.")
        }
        DetailViewModel::Loaded(card) => render_card(card),
    }
}

fn render_card(card: &DetailCard) -> String {
    let mut lines = vec![
        card.title.clone(),
        card.types.join(" "),
        format!("Height: {} m", card.height_m),
        format!("Weight: {} kg", card.weight_kg),
    ];
    if let Some(url) = &card.artwork_url {
        lines.push(format!("Artwork: {url}"));
    }

    lines.push(String::new());
    lines.push("Base stats".to_string());
    for stat in &card.stats {
        let filled = stat.fill_percent * BAR_WIDTH / 100;
        let fill = if stat.strong { '#' } else { '=' };
        lines.push(format!(
            "  {:<24} {}{}",
            stat.label,
            fill.to_string().repeat(filled as usize),
            ".".repeat((BAR_WIDTH - filled) as usize)
        ));
    }

    lines.push(String::new());
    lines.push("Abilities".to_string());
    lines.extend(card.abilities.iter().map(|a| format!("  • {a}")));
    lines.push("Type `back` to return.".to_string());
    lines.join("\n")
}
