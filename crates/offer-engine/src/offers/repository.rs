use super::domain::{AdjustmentId, Offer};

/// Storage abstraction so ingestion and resolution can be exercised
/// against an in-memory fake. The store owns all persisted state and
/// its own concurrency control; it must enforce at most one offer per
/// adjustment id, answering a duplicate insert with
/// [`StoreError::Conflict`].
pub trait OfferStore: Send + Sync {
    fn insert(&self, offer: Offer) -> Result<(), StoreError>;
    fn find_by_adjustment_id(&self, id: &AdjustmentId) -> Result<Option<Offer>, StoreError>;
    fn find_matching(&self, filter: &OfferFilter) -> Result<Vec<Offer>, StoreError>;
}

/// Set-membership query over stored offers: the bank tag must appear in
/// an offer's `banks`, and the instrument tag, when given, in its
/// `payment_instrument`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferFilter {
    pub bank: String,
    pub payment_instrument: Option<String>,
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("offer already exists")]
    Conflict,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
