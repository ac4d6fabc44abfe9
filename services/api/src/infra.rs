use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use offer_engine::offers::{AdjustmentId, Offer, OfferFilter, OfferStore, StoreError};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Offer store backed by a process-local map. Stands in for the real
/// document store behind the same trait; uniqueness on adjustment id is
/// enforced here so two racing ingestions of the same new offer resolve
/// to one insert and one conflict.
#[derive(Default, Clone)]
pub(crate) struct InMemoryOfferStore {
    offers: Arc<Mutex<HashMap<AdjustmentId, Offer>>>,
}

impl OfferStore for InMemoryOfferStore {
    fn insert(&self, offer: Offer) -> Result<(), StoreError> {
        let mut guard = self.offers.lock().expect("offer store mutex poisoned");
        if guard.contains_key(&offer.adjustment_id) {
            return Err(StoreError::Conflict);
        }
        guard.insert(offer.adjustment_id.clone(), offer);
        Ok(())
    }

    fn find_by_adjustment_id(&self, id: &AdjustmentId) -> Result<Option<Offer>, StoreError> {
        let guard = self.offers.lock().expect("offer store mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn find_matching(&self, filter: &OfferFilter) -> Result<Vec<Offer>, StoreError> {
        let guard = self.offers.lock().expect("offer store mutex poisoned");
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
