use std::sync::Once;

use pokedex_core::{
    update, AppState, Category, Cursor, Effect, FatalListError, ListingState, Msg, PageData,
    RequestId, ResourceRef, DEFAULT_FIRST_PAGE_URL,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(pokedex_logging::initialize_for_tests);
}

fn resource(name: &str, id: u32) -> ResourceRef {
    ResourceRef::new(name, format!("https://pokeapi.co/api/v2/pokemon/{id}/"))
}

fn page(entries: &[(&str, u32)], next: Option<&str>) -> PageData {
    PageData {
        results: entries.iter().map(|(name, id)| resource(name, *id)).collect(),
        next: next.map(ToOwned::to_owned),
    }
}

fn names(state: &AppState) -> Vec<&str> {
    state.listing().items().iter().map(|r| r.name()).collect()
}

fn page_request(effects: &[Effect]) -> RequestId {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::FetchPage { request, .. } => Some(*request),
            _ => None,
        })
        .expect("page effect")
}

fn category_request(effects: &[Effect]) -> RequestId {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::FetchCategory { request, .. } => Some(*request),
            _ => None,
        })
        .expect("category effect")
}

const SECOND_PAGE: &str = "https://pokeapi.co/api/v2/pokemon?offset=20&limit=20";

/// Started + first page of three records, with a continuation.
fn loaded_first_page() -> AppState {
    let (state, effects) = update(AppState::new(), Msg::Started);
    let request = page_request(&effects);
    let (state, _) = update(
        state,
        Msg::PageLoaded {
            request,
            page: page(
                &[("bulbasaur", 1), ("ivysaur", 2), ("venusaur", 3)],
                Some(SECOND_PAGE),
            ),
        },
    );
    state
}

#[test]
fn started_requests_categories_and_first_page() {
    init_logging();
    let (mut state, effects) = update(AppState::new(), Msg::Started);

    assert_eq!(
        effects,
        vec![
            Effect::FetchCategories,
            Effect::FetchPage {
                request: 1,
                url: DEFAULT_FIRST_PAGE_URL.to_string(),
            },
        ]
    );
    assert!(state.view().listing.is_loading);
    assert!(state.consume_dirty());
}

#[test]
fn pages_append_in_order_and_advance_cursor() {
    init_logging();
    let state = loaded_first_page();
    assert_eq!(names(&state), vec!["bulbasaur", "ivysaur", "venusaur"]);
    assert_eq!(
        state.listing().cursor(),
        &Cursor::Next(SECOND_PAGE.to_string())
    );

    let (state, effects) = update(state, Msg::EndReached);
    assert_eq!(
        effects,
        vec![Effect::FetchPage {
            request: 2,
            url: SECOND_PAGE.to_string(),
        }]
    );

    let (state, _) = update(
        state,
        Msg::PageLoaded {
            request: 2,
            page: page(&[("charmander", 4), ("charmeleon", 5)], None),
        },
    );
    assert_eq!(
        names(&state),
        vec!["bulbasaur", "ivysaur", "venusaur", "charmander", "charmeleon"]
    );
    assert_eq!(state.listing().cursor(), &Cursor::Exhausted);
    assert!(!state.listing().is_loading());

    let (_state, effects) = update(state, Msg::EndReached);
    assert!(effects.is_empty());
}

#[test]
fn end_reached_while_loading_is_noop() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::Started);
    let before = state.clone();

    let (mut next, effects) = update(state, Msg::EndReached);

    assert!(effects.is_empty());
    assert_eq!(next.listing(), before.listing());
    assert!(next.consume_dirty());
    let (mut next, _) = update(next, Msg::EndReached);
    assert!(!next.consume_dirty());
}

#[test]
fn duplicate_names_are_dropped() {
    init_logging();
    let state = loaded_first_page();
    let (state, effects) = update(state, Msg::EndReached);
    let request = page_request(&effects);

    let (state, _) = update(
        state,
        Msg::PageLoaded {
            request,
            page: page(&[("venusaur", 3), ("charmander", 4), ("charmander", 4)], None),
        },
    );

    assert_eq!(
        names(&state),
        vec!["bulbasaur", "ivysaur", "venusaur", "charmander"]
    );
}

#[test]
fn search_matches_id_regardless_of_name() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::Started);
    let request = page_request(&effects);
    let (state, _) = update(
        state,
        Msg::PageLoaded {
            request,
            page: page(&[("pikachu", 25), ("raichu", 26), ("nidorina", 30)], None),
        },
    );

    let (state, effects) = update(state, Msg::SearchChanged("25".to_string()));
    assert!(effects.is_empty());

    let visible: Vec<&str> = state
        .listing()
        .visible_items()
        .iter()
        .map(|r| r.name())
        .collect();
    assert_eq!(visible, vec!["pikachu"]);
    assert_eq!(state.listing().visible_items(), state.listing().visible_items());

    let (state, _) = update(state, Msg::SearchChanged("CHU".to_string()));
    let view = state.view();
    let labels: Vec<&str> = view.listing.rows.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, vec!["#25 PIKACHU", "#26 RAICHU"]);
    assert_eq!(view.listing.total_items, 3);
}

#[test]
fn empty_search_result_shows_hint() {
    init_logging();
    let state = loaded_first_page();
    let (state, _) = update(state, Msg::SearchChanged("mew".to_string()));

    let view = state.view();
    assert!(view.listing.rows.is_empty());
    assert!(view.listing.show_empty_hint);
}

#[test]
fn first_page_failure_is_fatal() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::Started);
    let request = page_request(&effects);

    let (state, _) = update(
        state,
        Msg::PageFailed {
            request,
            message: "network error".to_string(),
        },
    );

    assert!(state.listing().items().is_empty());
    assert_eq!(
        state.listing().error(),
        Some(&FatalListError::Page {
            cause: "network error".to_string()
        })
    );
    assert!(state.listing().notification().is_none());
    assert_eq!(
        state.view().listing.error.as_deref(),
        Some("Could not load Pokémon.")
    );

    // Scrolling does not retry silently.
    let (state, effects) = update(state, Msg::EndReached);
    assert!(effects.is_empty());

    let (state, effects) = update(state, Msg::RetryTapped);
    assert_eq!(
        effects,
        vec![Effect::FetchPage {
            request: 2,
            url: DEFAULT_FIRST_PAGE_URL.to_string(),
        }]
    );
    assert!(state.listing().error().is_none());
}

#[test]
fn later_page_failure_keeps_items_and_notifies() {
    init_logging();
    let state = loaded_first_page();
    let (state, effects) = update(state, Msg::EndReached);
    let request = page_request(&effects);

    let (state, _) = update(
        state,
        Msg::PageFailed {
            request,
            message: "timeout".to_string(),
        },
    );

    assert_eq!(names(&state), vec!["bulbasaur", "ivysaur", "venusaur"]);
    assert!(state.listing().error().is_none());
    assert_eq!(
        state.view().listing.notification.as_deref(),
        Some("Connection error while loading more items.")
    );
    assert_eq!(
        state.listing().cursor(),
        &Cursor::Next(SECOND_PAGE.to_string())
    );

    let (state, _) = update(state, Msg::NotificationDismissed);
    assert!(state.listing().notification().is_none());

    // The user can keep scrolling.
    let (_state, effects) = update(state, Msg::EndReached);
    assert_eq!(page_request(&effects), 3);
}

#[test]
fn malformed_record_url_fails_the_page() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::Started);
    let request = page_request(&effects);

    let (state, _) = update(
        state,
        Msg::PageLoaded {
            request,
            page: PageData {
                results: vec![ResourceRef::new("missingno", "https://pokeapi.co/")],
                next: None,
            },
        },
    );

    assert!(state.listing().items().is_empty());
    assert!(matches!(
        state.listing().error(),
        Some(FatalListError::Page { .. })
    ));
}

#[test]
fn selecting_category_replaces_items() {
    init_logging();
    let state = loaded_first_page();

    let (state, effects) = update(state, Msg::CategoryTapped("fire".to_string()));
    assert_eq!(
        effects,
        vec![Effect::FetchCategory {
            request: 2,
            category: "fire".to_string(),
        }]
    );
    assert!(state.listing().items().is_empty());
    assert_eq!(state.listing().cursor(), &Cursor::Exhausted);

    let (state, _) = update(
        state,
        Msg::CategoryLoaded {
            request: 2,
            members: vec![resource("charmander", 4), resource("vulpix", 37)],
        },
    );
    assert_eq!(names(&state), vec!["charmander", "vulpix"]);
    assert_eq!(state.view().listing.selected_category.as_deref(), Some("fire"));

    // Category listings are not paginated.
    let (_state, effects) = update(state, Msg::EndReached);
    assert!(effects.is_empty());
}

#[test]
fn reselecting_category_returns_to_first_page() {
    init_logging();
    let state = loaded_first_page();
    let (state, effects) = update(state, Msg::CategoryTapped("fire".to_string()));
    let request = category_request(&effects);
    let (state, _) = update(
        state,
        Msg::CategoryLoaded {
            request,
            members: vec![resource("charmander", 4)],
        },
    );

    let (state, effects) = update(state, Msg::CategoryTapped("fire".to_string()));

    assert_eq!(
        effects,
        vec![Effect::FetchPage {
            request: 3,
            url: DEFAULT_FIRST_PAGE_URL.to_string(),
        }]
    );
    assert!(state.listing().selected_category().is_none());
    assert!(state.listing().items().is_empty());
    assert!(state.listing().error().is_none());
    assert_eq!(
        state.listing().cursor(),
        &Cursor::Next(DEFAULT_FIRST_PAGE_URL.to_string())
    );

    let (state, _) = update(
        state,
        Msg::PageLoaded {
            request: 3,
            page: page(&[("bulbasaur", 1)], Some(SECOND_PAGE)),
        },
    );
    assert_eq!(names(&state), vec!["bulbasaur"]);
}

#[test]
fn category_failure_is_fatal_and_retry_reloads_category() {
    init_logging();
    let state = loaded_first_page();
    let (state, effects) = update(state, Msg::CategoryTapped("flying".to_string()));
    let request = category_request(&effects);

    let (state, _) = update(
        state,
        Msg::CategoryFailed {
            request,
            message: "http status 500".to_string(),
        },
    );

    assert!(state.listing().items().is_empty());
    assert!(matches!(
        state.listing().error(),
        Some(FatalListError::Category { category, .. }) if category == "flying"
    ));
    assert_eq!(
        state.view().listing.error.as_deref(),
        Some("Could not load Pokémon of type flying.")
    );

    let (state, effects) = update(state, Msg::RetryTapped);
    assert_eq!(
        effects,
        vec![Effect::FetchCategory {
            request: 3,
            category: "flying".to_string(),
        }]
    );
    assert!(state.listing().error().is_none());
}

#[test]
fn stale_page_response_after_category_switch_is_ignored() {
    init_logging();
    let state = loaded_first_page();
    let (state, effects) = update(state, Msg::EndReached);
    let page_req = page_request(&effects);
    let (mut state, effects) = update(state, Msg::CategoryTapped("water".to_string()));
    let category_req = category_request(&effects);
    assert!(state.consume_dirty());

    let (mut state, _) = update(
        state,
        Msg::PageLoaded {
            request: page_req,
            page: page(&[("charmander", 4)], None),
        },
    );
    assert!(!state.consume_dirty());
    assert!(state.listing().items().is_empty());
    assert!(state.listing().is_loading());

    let (state, _) = update(
        state,
        Msg::CategoryLoaded {
            request: category_req,
            members: vec![resource("squirtle", 7)],
        },
    );
    assert_eq!(names(&state), vec!["squirtle"]);
    assert!(!state.listing().is_loading());
}

#[test]
fn category_response_after_toggle_off_is_ignored() {
    init_logging();
    let state = loaded_first_page();
    let (state, effects) = update(state, Msg::CategoryTapped("fire".to_string()));
    let category_req = category_request(&effects);
    let (state, effects) = update(state, Msg::CategoryTapped("fire".to_string()));
    let page_req = page_request(&effects);

    let (state, _) = update(
        state,
        Msg::CategoryLoaded {
            request: category_req,
            members: vec![resource("charmander", 4)],
        },
    );
    assert!(state.listing().items().is_empty());
    assert!(state.listing().is_loading());

    let (state, _) = update(
        state,
        Msg::PageLoaded {
            request: page_req,
            page: page(&[("bulbasaur", 1)], None),
        },
    );
    assert_eq!(names(&state), vec!["bulbasaur"]);
}

#[test]
fn categories_exclude_sentinels_and_load_once() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::Started);
    let (state, _) = update(
        state,
        Msg::CategoriesLoaded(vec![
            "normal".to_string(),
            "fire".to_string(),
            "unknown".to_string(),
            "shadow".to_string(),
        ]),
    );

    let chips: Vec<String> = state
        .view()
        .listing
        .categories
        .iter()
        .map(|chip| chip.label.clone())
        .collect();
    assert_eq!(chips, vec!["NORMAL", "FIRE"]);

    let (_state, effects) = update(state, Msg::Started);
    assert!(!effects.contains(&Effect::FetchCategories));
}

#[test]
fn categories_failure_is_absorbed() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::Started);
    let (state, effects) = update(
        state,
        Msg::CategoriesFailed {
            message: "network error".to_string(),
        },
    );

    assert!(effects.is_empty());
    assert!(state.listing().categories().is_empty());
    assert!(state.listing().error().is_none());
    assert!(state.listing().is_loading());
}

#[test]
fn sentinel_categories_cannot_be_selected() {
    init_logging();
    let state = loaded_first_page();
    let (mut state, _) = update(
        state,
        Msg::CategoriesLoaded(vec!["fire".to_string(), "shadow".to_string()]),
    );
    state.consume_dirty();
    let before = state.clone();

    let (mut state, effects) = update(state, Msg::CategoryTapped("shadow".to_string()));

    assert!(effects.is_empty());
    assert!(!state.consume_dirty());
    assert_eq!(state.listing(), before.listing());
    assert!(state.listing().selected_category().is_none());

    let (state, effects) = update(state, Msg::CategoryTapped("unknown".to_string()));
    assert!(effects.is_empty());
    assert_eq!(names(&state), vec!["bulbasaur", "ivysaur", "venusaur"]);
}

#[test]
fn loading_a_category_directly_selects_it() {
    init_logging();
    let mut listing = ListingState::default();

    let effect = listing.load_category(Category::new("fire"));

    assert_eq!(
        effect,
        Effect::FetchCategory {
            request: 1,
            category: "fire".to_string(),
        }
    );
    assert_eq!(listing.selected_category(), Some(&Category::new("fire")));
    assert!(listing.end_reached().is_none());

    // Toggling the same category off returns to paging.
    let effects = listing.select_category(Category::new("fire"));
    assert_eq!(
        effects,
        vec![Effect::FetchPage {
            request: 2,
            url: DEFAULT_FIRST_PAGE_URL.to_string(),
        }]
    );
    assert!(listing.selected_category().is_none());
}
