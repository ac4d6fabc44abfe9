//! Offer ingestion and discount resolution.
//!
//! The flow has two halves. Ingestion takes the upstream promotional
//! feed, deduplicates items by adjustment id, and persists them through
//! the [`OfferStore`] abstraction. Resolution fetches the offers that
//! match a bank (and optionally a payment instrument), re-parses each
//! stored summary into [`DiscountTerms`], and lets the calculator pick
//! the single best capped discount.

pub mod calculator;
pub mod domain;
pub mod parser;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use calculator::calculate;
pub use domain::{
    AdjustmentId, Contributors, IncomingOffer, IngestPayload, IngestionSummary, Offer,
};
pub use parser::{parse_summary, DiscountTerms};
pub use repository::{OfferFilter, OfferStore, StoreError};
pub use router::offer_router;
pub use service::{DiscountQuery, OfferService, OfferServiceError};
