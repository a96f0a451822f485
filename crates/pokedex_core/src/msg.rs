use crate::{PageData, PokemonDetail, RequestId, ResourceRef};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Screen mounted: load the category vocabulary and the first page.
    Started,
    /// List scrolled to its end.
    EndReached,
    /// User edited the search box.
    SearchChanged(String),
    /// User tapped a category chip (toggles the filter).
    CategoryTapped(String),
    /// User tapped the retry button on the full-screen error.
    RetryTapped,
    /// User dismissed the transient notification.
    NotificationDismissed,
    /// User opened the detail view for a record.
    DetailRequested(String),
    /// User left the detail view.
    DetailClosed,
    /// Engine completion for a page request.
    PageLoaded { request: RequestId, page: PageData },
    PageFailed { request: RequestId, message: String },
    /// Engine completion for a category member request.
    CategoryLoaded {
        request: RequestId,
        members: Vec<ResourceRef>,
    },
    CategoryFailed { request: RequestId, message: String },
    /// Engine completion for the category vocabulary.
    CategoriesLoaded(Vec<String>),
    CategoriesFailed { message: String },
    /// Engine completion for a detail request.
    DetailLoaded {
        request: RequestId,
        detail: PokemonDetail,
    },
    DetailFailed { request: RequestId, message: String },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
