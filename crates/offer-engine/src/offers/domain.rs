use serde::{Deserialize, Serialize};

/// Identifier wrapper for the unique adjustment key deduplicating offers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AdjustmentId(pub String);

/// Persisted promotional offer.
///
/// Created once during ingestion and never updated or deleted. The
/// `banks` and `payment_instrument` tags are stored sorted so repeated
/// ingestions produce a deterministic representation; `emi_months`
/// passes through in feed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    pub adjustment_type: String,
    pub adjustment_id: AdjustmentId,
    pub summary: String,
    pub payment_instrument: Vec<String>,
    pub banks: Vec<String>,
    pub emi_months: Vec<String>,
}

/// Upstream feed payload. Offers arrive nested under
/// `offer_sections.PBO.offers`; only that list going missing entirely
/// is a client error, partial items inside it are tolerated.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IngestPayload {
    #[serde(default)]
    pub offer_sections: OfferSections,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OfferSections {
    #[serde(rename = "PBO", default)]
    pub pbo: Option<OfferSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OfferSection {
    #[serde(default)]
    pub offers: Option<Vec<IncomingOffer>>,
}

impl IngestPayload {
    /// The offer list, if the payload carries the expected section.
    pub fn into_offers(self) -> Option<Vec<IncomingOffer>> {
        self.offer_sections.pbo.and_then(|section| section.offers)
    }
}

/// One item from the upstream feed. Every field defaults so partial
/// items deserialize instead of failing the whole payload; an item
/// without an `adjustment_id` is skipped later because uniqueness
/// cannot be established for it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IncomingOffer {
    #[serde(default)]
    pub adjustment_type: String,
    #[serde(default)]
    pub adjustment_id: Option<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub contributors: Contributors,
}

/// Bank and instrument tags contributed by the upstream feed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Contributors {
    #[serde(default)]
    pub banks: Vec<String>,
    #[serde(default)]
    pub payment_instrument: Vec<String>,
    #[serde(default)]
    pub emi_months: Vec<String>,
}

/// Counts reported back after one ingestion call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IngestionSummary {
    #[serde(rename = "noOfOffersIdentified")]
    pub offers_identified: usize,
    #[serde(rename = "noOfNewOffersCreated")]
    pub offers_created: usize,
}
