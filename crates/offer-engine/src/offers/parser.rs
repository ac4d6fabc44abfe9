use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Discount semantics extracted from one promotional summary.
///
/// Ephemeral by contract: terms are recomputed from the stored summary
/// on every resolution, never persisted, so pattern changes take effect
/// without a data migration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiscountTerms {
    pub percent: Option<u32>,
    pub max_cap: Option<u32>,
    pub flat_discount: Option<u32>,
    pub cashback: Option<u32>,
    pub generic_discount: Option<u32>,
    pub min_order: u32,
}

// Patterns run against text that has already been stripped of currency
// symbols and thousands separators and lower-cased.
static PERCENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)\s*%").unwrap());

static MAX_CAP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:up\s*to|upto)\s*(?:rs\.?)?\s*(\d{2,})").unwrap());

static FLAT_DISCOUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"flat\s*(\d+)\s*(?:off|discount)?").unwrap());

static CASHBACK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:rs\.?)?\s*(\d+)\s*cashback").unwrap());

// Broad fallback: an optional lead-in, two-plus digits, optional
// trailer. It will also re-capture numbers already claimed by the
// percent or flat rules; the calculator decides when to ignore it.
static GENERIC_DISCOUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:save|extra|instant|rs\.?)?\s*(\d{2,})\s*(?:off|discount|instantly)?").unwrap());

static MIN_ORDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"min(?:imum|\.)?\s*(?:order|txn|transaction|purchase|amount|val(?:ue)?\.?)?\s*(?:of|value|val\.|amount)?\s*[:=]?\s*(\d{2,})",
    )
    .unwrap()
});

fn capture_u32(pattern: &Regex, text: &str) -> Option<u32> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
}

/// Extract discount terms from free-text promotional copy.
///
/// Each rule is evaluated independently against the normalized text, so
/// a single numeric substring can satisfy several rules at once (a flat
/// phrase also matches the broad generic pattern). Suppression of the
/// redundant match belongs to [`super::calculator::calculate`], which
/// keeps the overlap visible and testable instead of folding it into
/// the patterns. A capture that fails to parse as an integer is treated
/// as absent; parsing never errors.
pub fn parse_summary(summary: &str) -> DiscountTerms {
    let normalized = summary.replace([',', '₹'], "").to_lowercase();

    DiscountTerms {
        percent: capture_u32(&PERCENT, &normalized),
        max_cap: capture_u32(&MAX_CAP, &normalized),
        flat_discount: capture_u32(&FLAT_DISCOUNT, &normalized),
        cashback: capture_u32(&CASHBACK, &normalized),
        generic_discount: capture_u32(&GENERIC_DISCOUNT, &normalized),
        min_order: capture_u32(&MIN_ORDER, &normalized).unwrap_or(0),
    }
}
