use crate::view_model::{AppViewModel, DetailViewModel, ListingViewModel};
use crate::{DetailState, ListingState};

pub type RequestId = u64;

/// Whole client state: the listing screen, the detail screen and a render flag.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    listing: ListingState,
    detail: DetailState,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State whose unfiltered listing starts at `first_page_url`.
    pub fn with_first_page(first_page_url: impl Into<String>) -> Self {
        Self {
            listing: ListingState::new(first_page_url),
            ..Self::default()
        }
    }

    pub fn listing(&self) -> &ListingState {
        &self.listing
    }

    pub fn detail(&self) -> &DetailState {
        &self.detail
    }

    pub(crate) fn listing_mut(&mut self) -> &mut ListingState {
        &mut self.listing
    }

    pub(crate) fn detail_mut(&mut self) -> &mut DetailState {
        &mut self.detail
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            listing: ListingViewModel::from_state(&self.listing),
            detail: DetailViewModel::from_phase(self.detail.phase()),
            dirty: self.dirty,
        }
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns whether a render is pending and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
