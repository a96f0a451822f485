use std::collections::HashSet;

use pokedex_logging::{dex_debug, dex_info, dex_warn};

use crate::record::parse_records;
use crate::{Category, Effect, PageData, RequestId, ResourceRef, SummaryRecord};

/// First page of the unfiltered listing.
pub const DEFAULT_FIRST_PAGE_URL: &str = "https://pokeapi.co/api/v2/pokemon?limit=20";

/// Continuation token for the paged listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cursor {
    Next(String),
    Exhausted,
}

/// Nothing to show: the list is replaced by a full-screen retry affordance.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FatalListError {
    #[error("Could not load Pokémon.")]
    Page { cause: String },
    #[error("Could not load Pokémon of type {category}.")]
    Category { category: String, cause: String },
}

/// Items are already on screen: shown as a dismissible notification.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Connection error while loading more items.")]
pub struct TransientLoadError {
    pub cause: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum LoadKind {
    Page,
    Category(Category),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct InFlight {
    request: RequestId,
    kind: LoadKind,
}

/// Listing coordinator: paged/filtered collection of summary records.
///
/// Every mutation goes through the operations below; those that need the
/// network return the [`Effect`] to run and record the request they wait on.
/// Completions for any other request are stale and ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingState {
    items: Vec<SummaryRecord>,
    names: HashSet<String>,
    cursor: Cursor,
    first_page_url: String,
    in_flight: Option<InFlight>,
    last_request: RequestId,
    error: Option<FatalListError>,
    notification: Option<TransientLoadError>,
    search_text: String,
    selected_category: Option<Category>,
    categories: Vec<Category>,
    categories_requested: bool,
}

impl Default for ListingState {
    fn default() -> Self {
        Self::new(DEFAULT_FIRST_PAGE_URL)
    }
}

impl ListingState {
    pub fn new(first_page_url: impl Into<String>) -> Self {
        let first_page_url = first_page_url.into();
        Self {
            items: Vec::new(),
            names: HashSet::new(),
            cursor: Cursor::Next(first_page_url.clone()),
            first_page_url,
            in_flight: None,
            last_request: 0,
            error: None,
            notification: None,
            search_text: String::new(),
            selected_category: None,
            categories: Vec::new(),
            categories_requested: false,
        }
    }

    pub fn items(&self) -> &[SummaryRecord] {
        &self.items
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn error(&self) -> Option<&FatalListError> {
        self.error.as_ref()
    }

    pub fn notification(&self) -> Option<&TransientLoadError> {
        self.notification.as_ref()
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn selected_category(&self) -> Option<&Category> {
        self.selected_category.as_ref()
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Records matching the search text, in list order.
    pub fn visible_items(&self) -> Vec<&SummaryRecord> {
        self.items
            .iter()
            .filter(|record| record.matches_search(&self.search_text))
            .collect()
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
    }

    /// Fetches the page at the cursor. No-op while loading, once the cursor is
    /// exhausted, or while a category is selected.
    pub fn load_next_page(&mut self) -> Option<Effect> {
        if self.is_loading() || self.selected_category.is_some() {
            return None;
        }
        let url = match &self.cursor {
            Cursor::Next(url) => url.clone(),
            Cursor::Exhausted => return None,
        };

        self.error = None;
        let request = self.begin(LoadKind::Page);
        dex_debug!("Loading page request={} url={}", request, url);
        Some(Effect::FetchPage { request, url })
    }

    /// Replaces the listing with every member of `category` and makes it the
    /// selected filter. Supersedes any load already in flight.
    pub fn load_category(&mut self, category: Category) -> Effect {
        self.selected_category = Some(category.clone());
        self.clear_items();
        self.error = None;
        self.cursor = Cursor::Exhausted;
        let name = category.name().to_string();
        let request = self.begin(LoadKind::Category(category));
        dex_debug!("Loading category request={} category={}", request, name);
        Effect::FetchCategory {
            request,
            category: name,
        }
    }

    /// Toggles the category filter.
    ///
    /// Re-selecting the current category resets to the unfiltered first page
    /// and only then issues the page load, so the fetch sees the reset state.
    /// Sentinel categories cannot be selected.
    pub fn select_category(&mut self, category: Category) -> Vec<Effect> {
        if category.is_sentinel() {
            dex_warn!("Ignoring selection of sentinel category {}", category.name());
            return Vec::new();
        }
        if self.selected_category.as_ref() == Some(&category) {
            dex_info!("Clearing category filter {}", category.name());
            self.selected_category = None;
            self.clear_items();
            self.cursor = Cursor::Next(self.first_page_url.clone());
            self.error = None;
            self.notification = None;
            self.in_flight = None;
            return self.load_next_page().into_iter().collect();
        }

        dex_info!("Selecting category filter {}", category.name());
        vec![self.load_category(category)]
    }

    /// Re-issues the failed load: the category if one is selected, else the
    /// next page.
    pub fn retry(&mut self) -> Option<Effect> {
        self.error = None;
        self.notification = None;
        match self.selected_category.clone() {
            Some(category) => Some(self.load_category(category)),
            None => self.load_next_page(),
        }
    }

    /// Infinite-scroll trigger: pages only while unfiltered and error-free.
    pub fn end_reached(&mut self) -> Option<Effect> {
        if self.selected_category.is_some() || self.error.is_some() {
            return None;
        }
        self.load_next_page()
    }

    /// Requests the category vocabulary once.
    pub fn load_categories(&mut self) -> Option<Effect> {
        if self.categories_requested {
            return None;
        }
        self.categories_requested = true;
        Some(Effect::FetchCategories)
    }

    pub fn dismiss_notification(&mut self) -> bool {
        self.notification.take().is_some()
    }

    /// Applies a page completion. Returns false when the response is stale.
    pub fn apply_page(&mut self, request: RequestId, page: PageData) -> bool {
        if !self.finish(request, |kind| matches!(kind, LoadKind::Page)) {
            dex_debug!("Ignoring stale page response request={}", request);
            return false;
        }

        match parse_records(&page.results) {
            Ok(records) => {
                let received = records.len();
                self.append(records);
                self.cursor = match page.next {
                    Some(next) => Cursor::Next(next),
                    None => Cursor::Exhausted,
                };
                dex_info!(
                    "Page loaded request={} received={} total={}",
                    request,
                    received,
                    self.items.len()
                );
            }
            Err(err) => self.page_failed(err.to_string()),
        }
        true
    }

    pub fn apply_page_failure(&mut self, request: RequestId, message: String) -> bool {
        if !self.finish(request, |kind| matches!(kind, LoadKind::Page)) {
            dex_debug!("Ignoring stale page failure request={}", request);
            return false;
        }
        self.page_failed(message);
        true
    }

    /// Applies a category completion. Returns false when the response is stale.
    pub fn apply_category(&mut self, request: RequestId, members: Vec<ResourceRef>) -> bool {
        let Some(category) = self.finish_category(request) else {
            dex_debug!("Ignoring stale category response request={}", request);
            return false;
        };

        match parse_records(&members) {
            Ok(records) => {
                self.clear_items();
                self.append(records);
                dex_info!(
                    "Category {} loaded request={} total={}",
                    category.name(),
                    request,
                    self.items.len()
                );
            }
            Err(err) => self.category_failed(&category, err.to_string()),
        }
        true
    }

    pub fn apply_category_failure(&mut self, request: RequestId, message: String) -> bool {
        let Some(category) = self.finish_category(request) else {
            dex_debug!("Ignoring stale category failure request={}", request);
            return false;
        };
        self.category_failed(&category, message);
        true
    }

    pub fn apply_categories(&mut self, names: Vec<String>) {
        self.categories = names
            .into_iter()
            .map(Category::new)
            .filter(|category| !category.is_sentinel())
            .collect();
        dex_debug!("Loaded {} categories", self.categories.len());
    }

    /// Filters stay unavailable; this is not an application error.
    pub fn apply_categories_failure(&self, message: &str) {
        dex_warn!("Failed to load categories: {}", message);
    }

    fn begin(&mut self, kind: LoadKind) -> RequestId {
        self.last_request += 1;
        let request = self.last_request;
        self.in_flight = Some(InFlight { request, kind });
        request
    }

    fn finish(&mut self, request: RequestId, expected: impl Fn(&LoadKind) -> bool) -> bool {
        match &self.in_flight {
            Some(in_flight) if in_flight.request == request && expected(&in_flight.kind) => {
                self.in_flight = None;
                true
            }
            _ => false,
        }
    }

    fn finish_category(&mut self, request: RequestId) -> Option<Category> {
        let category = match &self.in_flight {
            Some(InFlight {
                request: pending,
                kind: LoadKind::Category(category),
            }) if *pending == request => category.clone(),
            _ => return None,
        };
        self.in_flight = None;
        Some(category)
    }

    fn page_failed(&mut self, cause: String) {
        if self.items.is_empty() {
            dex_warn!("Initial page load failed: {}", cause);
            self.error = Some(FatalListError::Page { cause });
        } else {
            dex_warn!("Loading more items failed: {}", cause);
            self.notification = Some(TransientLoadError { cause });
        }
    }

    fn category_failed(&mut self, category: &Category, cause: String) {
        dex_warn!("Category {} failed to load: {}", category.name(), cause);
        self.clear_items();
        self.error = Some(FatalListError::Category {
            category: category.name().to_string(),
            cause,
        });
    }

    fn append(&mut self, records: Vec<SummaryRecord>) {
        for record in records {
            if self.names.insert(record.name().to_string()) {
                self.items.push(record);
            } else {
                dex_debug!("Dropping duplicate record {}", record.name());
            }
        }
    }

    fn clear_items(&mut self) {
        self.items.clear();
        self.names.clear();
    }
}
