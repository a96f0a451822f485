use crate::RequestId;

/// Network work requested by the coordinators. The host runs these and feeds
/// the outcome back as a [`crate::Msg`] carrying the same `request`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchPage { request: RequestId, url: String },
    FetchCategory { request: RequestId, category: String },
    FetchCategories,
    FetchDetails { request: RequestId, name: String },
}
