use crate::{AppState, Category, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let mut changed = true;
    let effects = match msg {
        Msg::Started => {
            let listing = state.listing_mut();
            listing
                .load_categories()
                .into_iter()
                .chain(listing.load_next_page())
                .collect()
        }
        Msg::EndReached => {
            let effects: Vec<Effect> = state.listing_mut().end_reached().into_iter().collect();
            changed = !effects.is_empty();
            effects
        }
        Msg::SearchChanged(text) => {
            state.listing_mut().set_search_text(text);
            Vec::new()
        }
        Msg::CategoryTapped(name) => {
            let effects = state.listing_mut().select_category(Category::new(name));
            changed = !effects.is_empty();
            effects
        }
        Msg::RetryTapped => state.listing_mut().retry().into_iter().collect(),
        Msg::NotificationDismissed => {
            changed = state.listing_mut().dismiss_notification();
            Vec::new()
        }
        Msg::DetailRequested(name) => vec![state.detail_mut().open(name)],
        Msg::DetailClosed => {
            changed = state.detail_mut().close();
            Vec::new()
        }
        Msg::PageLoaded { request, page } => {
            changed = state.listing_mut().apply_page(request, page);
            Vec::new()
        }
        Msg::PageFailed { request, message } => {
            changed = state.listing_mut().apply_page_failure(request, message);
            Vec::new()
        }
        Msg::CategoryLoaded { request, members } => {
            changed = state.listing_mut().apply_category(request, members);
            Vec::new()
        }
        Msg::CategoryFailed { request, message } => {
            changed = state.listing_mut().apply_category_failure(request, message);
            Vec::new()
        }
        Msg::CategoriesLoaded(names) => {
            state.listing_mut().apply_categories(names);
            Vec::new()
        }
        Msg::CategoriesFailed { message } => {
            state.listing_mut().apply_categories_failure(&message);
            changed = false;
            Vec::new()
        }
        Msg::DetailLoaded { request, detail } => {
            changed = state.detail_mut().apply_loaded(request, detail);
            Vec::new()
        }
        Msg::DetailFailed { request, message } => {
            changed = state.detail_mut().apply_failure(request, message);
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => {
            changed = false;
            Vec::new()
        }
    };

    if changed {
        state.mark_dirty();
    }
    (state, effects)
}
