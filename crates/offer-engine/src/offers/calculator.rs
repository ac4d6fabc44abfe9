use super::parser::DiscountTerms;

/// Resolve the single best discount for a payable amount under the
/// fixed combination policy.
///
/// Steps run in a fixed order: the minimum-order gate, flat discount,
/// cashback, generic discount, then the percentage rule with its
/// optional cap, each taking the maximum over the running value. The
/// generic figure is ignored whenever a percent or flat figure was also
/// extracted, since the broad generic pattern re-captures those same
/// numbers.
///
/// The result is clamped to half the payable amount (floored) and to
/// the amount itself, but the returned value is otherwise not floored;
/// a percentage discount may carry a fractional part and callers that
/// need a whole amount floor it themselves, as the resolver does.
pub fn calculate(terms: &DiscountTerms, amount_to_pay: f64) -> f64 {
    if amount_to_pay < f64::from(terms.min_order) {
        return 0.0;
    }

    let fifty_percent_cap = (amount_to_pay * 0.5).floor();
    let mut discount = 0.0_f64;

    if let Some(flat) = terms.flat_discount {
        discount = f64::from(flat);
    }

    if let Some(cashback) = terms.cashback {
        discount = discount.max(f64::from(cashback));
    }

    // Suppression only considers percent and flat. A summary matching
    // both the cashback and generic patterns can still double-count;
    // kept as-is, see DESIGN.md.
    if let Some(generic) = terms.generic_discount {
        if terms.percent.is_none() && terms.flat_discount.is_none() {
            discount = discount.max(f64::from(generic));
        }
    }

    if let Some(percent) = terms.percent {
        let raw = f64::from(percent) / 100.0 * amount_to_pay;
        let capped = match terms.max_cap {
            Some(cap) => raw.min(f64::from(cap)),
            None => raw,
        };
        discount = discount.max(capped);
    }

    discount.min(fifty_percent_cap).min(amount_to_pay)
}
