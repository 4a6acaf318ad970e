//! The price recommendation engine.
//!
//! The marketplace fee and the optional tax are percentages of the final
//! sale price, not of cost, so the price cannot be built up as cost plus
//! markup. Solving `price − fee·price − tax·price − cost = profit` for
//! price gives the closed form used here:
//!
//! `price = (cost + profit) / (1 − fee − tax)`
//!
//! Monetary outputs round half-up to two decimals. The ceiling-to-whole-unit
//! policy some spreadsheets used is intentionally not implemented.

use thiserror::Error;

use super::entities::{CostRecord, PricingRequest, PricingResult, SupplierQuote};

#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    #[error(
        "fee and tax fractions sum to {:.2}, leaving nothing of the sale price to cover \
         cost and profit; reduce the fee or tax",
        .fee + .tax
    )]
    InvalidFeeConfiguration { fee: f64, tax: f64 },
    #[error("{field} must not be negative (got {value})")]
    NegativeInput { field: &'static str, value: f64 },
}

/// Compute the recommended sale price and its breakdown.
///
/// The desired profit is `base_cost × margin`, lifted to `min_profit` when
/// the percentage falls short — absolute floors matter for cheap prints.
/// After rounding, the realized profit stays within one cent of the
/// desired profit.
pub fn recommend(request: &PricingRequest) -> Result<PricingResult, PricingError> {
    check_non_negative("base cost", request.base_cost)?;
    check_non_negative("margin", request.margin)?;
    check_non_negative("minimum profit", request.min_profit)?;
    check_non_negative("fee", request.fee)?;
    check_non_negative("tax", request.tax)?;

    let deductions = request.fee + request.tax;
    if deductions >= 1.0 {
        return Err(PricingError::InvalidFeeConfiguration {
            fee: request.fee,
            tax: request.tax,
        });
    }

    let desired_profit = (request.base_cost * request.margin).max(request.min_profit);
    let price = round_cents((request.base_cost + desired_profit) / (1.0 - deductions));
    let fee_amount = round_cents(price * request.fee);
    let tax_amount = round_cents(price * request.tax);
    let profit = round_cents(price - fee_amount - tax_amount - request.base_cost);

    Ok(PricingResult {
        price,
        fee_amount,
        tax_amount,
        profit,
        desired_profit: round_cents(desired_profit),
    })
}

/// Profit the currently listed price earns, using the exact same deduction
/// algebra as [`recommend`] so the two figures are directly comparable.
pub fn current_listing_profit(listed_price: f64, base_cost: f64, fee: f64, tax: f64) -> f64 {
    round_cents(listed_price * (1.0 - fee - tax) - base_cost)
}

/// Convert a supplier quote into a base cost in the settlement currency.
/// Absent postage substitutes the supplier's flat fallback, never zero.
pub fn base_cost_for(quote: SupplierQuote, fallback_postage: f64, rate: f64) -> f64 {
    (quote.price + quote.postage.unwrap_or(fallback_postage)) * rate
}

/// Record chosen for a requested size, together with the size actually used
/// so a nearest-match substitution is always visible to the caller.
#[derive(Clone, Debug, PartialEq)]
pub struct SizeMatch<'a> {
    pub record: &'a CostRecord,
    pub requested: u32,
    pub exact: bool,
}

impl SizeMatch<'_> {
    pub fn used_size(&self) -> u32 {
        self.record.size_area
    }
}

/// Find the record whose size is closest to the requested one. Falls back
/// from an exact match to the smallest absolute distance; ties go to the
/// smaller size, matching the ascending record order.
pub fn nearest_record(records: &[CostRecord], requested: u32) -> Option<SizeMatch<'_>> {
    let record = records.iter().min_by_key(|record| {
        (record.size_area as i64 - requested as i64).unsigned_abs()
    })?;
    Some(SizeMatch {
        record,
        requested,
        exact: record.size_area == requested,
    })
}

/// Half-up rounding to two decimals, the display precision for all
/// monetary figures.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn check_non_negative(field: &'static str, value: f64) -> Result<(), PricingError> {
    if value < 0.0 || !value.is_finite() {
        return Err(PricingError::NegativeInput { field, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(base_cost: f64, margin: f64, min_profit: f64, fee: f64, tax: f64) -> PricingRequest {
        PricingRequest {
            base_cost,
            margin,
            min_profit,
            fee,
            tax,
        }
    }

    #[test]
    fn worked_example_from_the_costing_sheet() {
        let result = recommend(&request(47.50, 0.35, 7.00, 0.15, 0.0)).unwrap();
        assert!((result.desired_profit - 16.625).abs() <= 0.005 + 1e-9);
        assert_eq!(result.price, 75.44);
        assert_eq!(result.fee_amount, 11.32);
        assert_eq!(result.tax_amount, 0.0);
        assert_eq!(result.profit, 16.62);
    }

    #[test]
    fn realized_profit_matches_desired_within_a_cent() {
        let cases = [
            (10.0, 0.4, 2.0, 0.065, 0.0),
            (47.5, 0.35, 7.0, 0.15, 0.0),
            (3.2, 0.5, 7.0, 0.12, 0.21),
            (120.0, 0.25, 10.0, 0.065, 0.19),
            (0.0, 0.35, 7.0, 0.15, 0.0),
        ];
        for (base, margin, floor, fee, tax) in cases {
            let req = request(base, margin, floor, fee, tax);
            let result = recommend(&req).unwrap();
            let desired = (base * margin).max(floor);
            assert!(
                (result.profit - desired).abs() <= 0.01 + 1e-9,
                "profit {} strayed from desired {desired}",
                result.profit
            );
        }
    }

    #[test]
    fn floor_wins_over_thin_margins() {
        let result = recommend(&request(4.0, 0.35, 7.00, 0.15, 0.0)).unwrap();
        // 4.0 * 0.35 = 1.40 is below the floor.
        assert_eq!(result.desired_profit, 7.00);
        assert!(result.price > 11.0);
    }

    #[test]
    fn fee_plus_tax_at_or_above_one_is_rejected() {
        for (fee, tax) in [(1.0, 0.0), (0.6, 0.4), (0.5, 0.7)] {
            let err = recommend(&request(20.0, 0.3, 5.0, fee, tax)).unwrap_err();
            assert_eq!(err, PricingError::InvalidFeeConfiguration { fee, tax });
        }
    }

    #[test]
    fn just_below_one_still_computes() {
        let result = recommend(&request(10.0, 0.1, 0.0, 0.5, 0.49)).unwrap();
        assert!(result.price.is_finite());
        assert!(result.price > 10.0);
    }

    #[test]
    fn negative_inputs_are_rejected() {
        let err = recommend(&request(-1.0, 0.3, 5.0, 0.1, 0.0)).unwrap_err();
        assert!(matches!(err, PricingError::NegativeInput { field: "base cost", .. }));
    }

    #[test]
    fn tax_is_deducted_from_price_not_cost() {
        let with_tax = recommend(&request(40.0, 0.3, 0.0, 0.15, 0.19)).unwrap();
        let without = recommend(&request(40.0, 0.3, 0.0, 0.15, 0.0)).unwrap();
        assert!(with_tax.price > without.price);
        assert_eq!(round_cents(with_tax.price * 0.19), with_tax.tax_amount);
    }

    #[test]
    fn listing_profit_uses_the_same_deductions() {
        // A listing at exactly the recommended price earns the desired profit.
        let req = request(47.50, 0.35, 7.00, 0.15, 0.0);
        let result = recommend(&req).unwrap();
        let current = current_listing_profit(result.price, req.base_cost, req.fee, req.tax);
        assert!((current - result.profit).abs() <= 0.01 + 1e-9);
    }

    #[test]
    fn base_cost_substitutes_fallback_postage() {
        let quote = SupplierQuote {
            price: 20.0,
            postage: None,
        };
        let cost = base_cost_for(quote, 5.25, 1.17);
        assert!((cost - (20.0 + 5.25) * 1.17).abs() < 1e-9);
    }

    #[test]
    fn base_cost_prefers_quoted_postage() {
        let quote = SupplierQuote {
            price: 20.0,
            postage: Some(0.0),
        };
        // Zero postage is a real quote, not an absent one.
        assert!((base_cost_for(quote, 5.25, 1.0) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn nearest_size_picks_smallest_distance() {
        let records: Vec<CostRecord> = [630, 1200, 2700].map(CostRecord::new).to_vec();
        let found = nearest_record(&records, 1000).unwrap();
        assert_eq!(found.used_size(), 1200);
        assert!(!found.exact);
        assert_eq!(found.requested, 1000);
    }

    #[test]
    fn nearest_size_reports_exact_match() {
        let records: Vec<CostRecord> = [630, 1200].map(CostRecord::new).to_vec();
        let found = nearest_record(&records, 630).unwrap();
        assert!(found.exact);
        assert_eq!(found.used_size(), 630);
    }

    #[test]
    fn nearest_on_empty_set_is_none() {
        assert!(nearest_record(&[], 630).is_none());
    }

    #[test]
    fn rounding_is_half_up() {
        // 16.625 is exactly representable, so this exercises the tie case.
        assert_eq!(round_cents(16.625), 16.63);
        assert_eq!(round_cents(11.316), 11.32);
        assert_eq!(round_cents(11.314), 11.31);
    }
}
