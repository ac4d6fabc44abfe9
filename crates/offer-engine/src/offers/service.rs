use std::sync::Arc;

use tracing::debug;

use super::calculator::calculate;
use super::domain::{AdjustmentId, IncomingOffer, IngestionSummary, Offer};
use super::parser::parse_summary;
use super::repository::{OfferFilter, OfferStore, StoreError};

/// Service composing the summary parser, discount calculator, and
/// offer store.
pub struct OfferService<S> {
    store: Arc<S>,
}

/// Resolution request. Bank and instrument tags are matched exactly
/// against stored values, so the transport layer upper-cases caller
/// input before building one of these.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountQuery {
    pub amount_to_pay: f64,
    pub bank: String,
    pub payment_instrument: Option<String>,
}

impl<S> OfferService<S>
where
    S: OfferStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Persist new offers from one upstream payload.
    ///
    /// Items without an adjustment id are skipped silently, as are
    /// items whose id is already stored, which makes re-running the
    /// same payload a no-op. A store failure aborts the call; offers
    /// written before the failure stay written.
    pub fn ingest(
        &self,
        offers: Vec<IncomingOffer>,
    ) -> Result<IngestionSummary, OfferServiceError> {
        let offers_identified = offers.len();
        let mut offers_created = 0;

        for incoming in offers {
            let adjustment_id = match incoming.adjustment_id {
                Some(id) if !id.trim().is_empty() => AdjustmentId(id),
                _ => continue,
            };

            if self.store.find_by_adjustment_id(&adjustment_id)?.is_some() {
                continue;
            }

            let mut banks = incoming.contributors.banks;
            if mentions_upi(&incoming.summary) && !banks.iter().any(|bank| bank == "UPI") {
                banks.push("UPI".to_string());
            }
            banks.sort();

            let mut payment_instrument = incoming.contributors.payment_instrument;
            payment_instrument.sort();

            self.store.insert(Offer {
                adjustment_type: incoming.adjustment_type,
                adjustment_id,
                summary: incoming.summary,
                payment_instrument,
                banks,
                emi_months: incoming.contributors.emi_months,
            })?;
            offers_created += 1;
        }

        debug!(offers_identified, offers_created, "ingestion completed");

        Ok(IngestionSummary {
            offers_identified,
            offers_created,
        })
    }

    /// Resolve the maximum discount across offers matching the query,
    /// floored to a whole amount.
    ///
    /// Every candidate summary is parsed afresh on each call; no terms
    /// are cached. Zero matching offers resolves to 0, not an error.
    pub fn highest_discount(&self, query: DiscountQuery) -> Result<i64, OfferServiceError> {
        let filter = OfferFilter {
            bank: query.bank,
            payment_instrument: query.payment_instrument,
        };
        let candidates = self.store.find_matching(&filter)?;

        let mut max_discount = 0.0_f64;
        for offer in &candidates {
            let terms = parse_summary(&offer.summary);
            let discount = calculate(&terms, query.amount_to_pay);
            if discount > max_discount {
                max_discount = discount;
            }
        }

        debug!(
            bank = %filter.bank,
            candidates = candidates.len(),
            max_discount,
            "discount resolved"
        );

        Ok(max_discount.floor() as i64)
    }
}

fn mentions_upi(summary: &str) -> bool {
    summary.to_lowercase().contains("upi")
}

/// Error raised by the offer service.
#[derive(Debug, thiserror::Error)]
pub enum OfferServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),
}
