use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::offers::domain::{AdjustmentId, Contributors, IncomingOffer, Offer};
use crate::offers::repository::{OfferFilter, OfferStore, StoreError};
use crate::offers::service::OfferService;

#[derive(Default)]
pub(super) struct MemoryStore {
    offers: Mutex<HashMap<AdjustmentId, Offer>>,
}

impl MemoryStore {
    pub(super) fn stored(&self) -> Vec<Offer> {
        self.offers
            .lock()
            .expect("store mutex poisoned")
            .values()
            .cloned()
            .collect()
    }

    pub(super) fn len(&self) -> usize {
        self.offers.lock().expect("store mutex poisoned").len()
    }
}

impl OfferStore for MemoryStore {
    fn insert(&self, offer: Offer) -> Result<(), StoreError> {
        let mut guard = self.offers.lock().expect("store mutex poisoned");
        if guard.contains_key(&offer.adjustment_id) {
            return Err(StoreError::Conflict);
        }
        guard.insert(offer.adjustment_id.clone(), offer);
        Ok(())
    }

    fn find_by_adjustment_id(&self, id: &AdjustmentId) -> Result<Option<Offer>, StoreError> {
        let guard = self.offers.lock().expect("store mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn find_matching(&self, filter: &OfferFilter) -> Result<Vec<Offer>, StoreError> {
        let guard = self.offers.lock().expect("store mutex poisoned");
        Ok(guard
            .values()
            .filter(|offer| offer.banks.contains(&filter.bank))
            .filter(|offer| match &filter.payment_instrument {
                Some(instrument) => offer.payment_instrument.contains(instrument),
                None => true,
            })
            .cloned()
            .collect())
    }
}

/// Store whose existence check never sees the offer but whose insert
/// refuses it, mimicking a concurrent ingestion winning the write
/// between the check and the insert.
pub(super) struct RacedStore;

impl OfferStore for RacedStore {
    fn insert(&self, _offer: Offer) -> Result<(), StoreError> {
        Err(StoreError::Conflict)
    }

    fn find_by_adjustment_id(&self, _id: &AdjustmentId) -> Result<Option<Offer>, StoreError> {
        Ok(None)
    }

    fn find_matching(&self, _filter: &OfferFilter) -> Result<Vec<Offer>, StoreError> {
        Ok(Vec::new())
    }
}

/// Store that fails every operation, for 5xx paths.
pub(super) struct UnavailableStore;

impl OfferStore for UnavailableStore {
    fn insert(&self, _offer: Offer) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    fn find_by_adjustment_id(&self, _id: &AdjustmentId) -> Result<Option<Offer>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    fn find_matching(&self, _filter: &OfferFilter) -> Result<Vec<Offer>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}

pub(super) fn build_service() -> (Arc<OfferService<MemoryStore>>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let service = Arc::new(OfferService::new(store.clone()));
    (service, store)
}

pub(super) fn incoming(id: &str, summary: &str, banks: &[&str], instruments: &[&str]) -> IncomingOffer {
    IncomingOffer {
        adjustment_type: "INSTANT_DISCOUNT".to_string(),
        adjustment_id: Some(id.to_string()),
        summary: summary.to_string(),
        contributors: Contributors {
            banks: banks.iter().map(|bank| bank.to_string()).collect(),
            payment_instrument: instruments
                .iter()
                .map(|instrument| instrument.to_string())
                .collect(),
            emi_months: vec!["0".to_string()],
        },
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    serde_json::from_slice(&bytes).expect("body is json")
}
