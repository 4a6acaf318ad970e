use serde::{Deserialize, Serialize};

/// Settlement currency the marketplace pays out in. Also drives the UI theme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    Eur,
    Gbp,
    Usd,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Usd => "USD",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Eur => "€",
            Currency::Gbp => "£",
            Currency::Usd => "$",
        }
    }

    pub fn all() -> [Currency; 3] {
        [Currency::Eur, Currency::Gbp, Currency::Usd]
    }

    /// Last-resort conversion rate into `to`, used whenever no live or
    /// cached rate is available yet. Deliberately coarse; callers label
    /// figures built on these constants. Identity pairs are 1.0.
    pub fn fallback_rate(self, to: Currency) -> f64 {
        FALLBACK_RATES
            .iter()
            .find(|(from, target, _)| *from == self && *target == to)
            .map(|(_, _, rate)| *rate)
            .unwrap_or(1.0)
    }
}

const FALLBACK_RATES: &[(Currency, Currency, f64)] = &[
    (Currency::Gbp, Currency::Eur, 1.17),
    (Currency::Eur, Currency::Gbp, 0.85),
    (Currency::Gbp, Currency::Usd, 1.27),
    (Currency::Usd, Currency::Gbp, 0.79),
    (Currency::Eur, Currency::Usd, 1.08),
    (Currency::Usd, Currency::Eur, 0.93),
];

/// Which print supplier a quote comes from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Supplier {
    #[default]
    Primary,
    Secondary,
}

impl Supplier {
    pub fn name(&self) -> &'static str {
        match self {
            Supplier::Primary => "Primary lab",
            Supplier::Secondary => "Secondary lab",
        }
    }
}

/// Per-supplier quoting configuration: the currency the lab invoices in and
/// the flat postage applied when the sheet has no postage cell for a size.
/// An unconfigured postage cell must never read as free shipping.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SupplierProfile {
    pub supplier: Supplier,
    pub quote_currency: Currency,
    pub fallback_postage: f64,
}

impl SupplierProfile {
    pub fn defaults_for(supplier: Supplier) -> Self {
        match supplier {
            Supplier::Primary => Self {
                supplier,
                quote_currency: Currency::Gbp,
                fallback_postage: 5.25,
            },
            Supplier::Secondary => Self {
                supplier,
                quote_currency: Currency::Eur,
                fallback_postage: 6.90,
            },
        }
    }
}

/// One normalized row of the cost sheet: a distinct print size plus whatever
/// costs each supplier has quoted for it. `None` means "not priced yet",
/// which is deliberately distinct from a quoted cost of zero.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CostRecord {
    /// Print area in cm², the unique lookup key.
    pub size_area: u32,
    pub primary_price: Option<f64>,
    pub primary_postage: Option<f64>,
    pub secondary_price: Option<f64>,
    pub secondary_postage: Option<f64>,
    /// Price currently live on the marketplace, if the sheet has one.
    pub listed_price: Option<f64>,
}

impl CostRecord {
    pub fn new(size_area: u32) -> Self {
        Self {
            size_area,
            primary_price: None,
            primary_postage: None,
            secondary_price: None,
            secondary_postage: None,
            listed_price: None,
        }
    }

    /// Print + postage quote for one supplier, still in that supplier's
    /// own currency. `None` when the supplier has not priced this size.
    pub fn quote(&self, supplier: Supplier) -> Option<SupplierQuote> {
        let (price, postage) = match supplier {
            Supplier::Primary => (self.primary_price, self.primary_postage),
            Supplier::Secondary => (self.secondary_price, self.secondary_postage),
        };
        price.map(|price| SupplierQuote { price, postage })
    }
}

/// A supplier's raw quote for one size. Postage stays optional so the
/// fallback constant can be substituted at conversion time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SupplierQuote {
    pub price: f64,
    pub postage: Option<f64>,
}

/// Everything the recommendation engine needs for one calculation.
/// `base_cost` is already converted into the settlement currency.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PricingRequest {
    pub base_cost: f64,
    /// Target profit as a fraction of base cost, 0..=1.
    pub margin: f64,
    /// Absolute profit the price must clear even when the margin would not.
    pub min_profit: f64,
    /// Marketplace fee as a fraction of the final sale price.
    pub fee: f64,
    /// Optional tax as a fraction of the final sale price.
    pub tax: f64,
}

/// Output of one recommendation. All amounts are in the settlement currency,
/// rounded half-up to two decimals.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PricingResult {
    pub price: f64,
    pub fee_amount: f64,
    pub tax_amount: f64,
    pub profit: f64,
    pub desired_profit: f64,
}

/// User-tunable pricing defaults, kept across sessions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricingParams {
    pub supplier: Supplier,
    pub margin: f64,
    pub min_profit: f64,
    pub fee: f64,
    pub tax: f64,
}

impl Default for PricingParams {
    fn default() -> Self {
        Self {
            supplier: Supplier::Primary,
            margin: 0.35,
            min_profit: 7.0,
            fee: 0.15,
            tax: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_table_covers_every_distinct_pair() {
        for from in Currency::all() {
            for to in Currency::all() {
                if from == to {
                    continue;
                }
                let rate = from.fallback_rate(to);
                assert!(rate > 0.0, "missing fallback for {}->{}", from.code(), to.code());
                assert_ne!(rate, 1.0);
            }
        }
    }

    #[test]
    fn fallback_pairs_roughly_invert() {
        let forward = Currency::Gbp.fallback_rate(Currency::Eur);
        let back = Currency::Eur.fallback_rate(Currency::Gbp);
        assert!((forward * back - 1.0).abs() < 0.05);
    }

    #[test]
    fn identity_fallback_is_one() {
        for currency in Currency::all() {
            assert_eq!(currency.fallback_rate(currency), 1.0);
        }
    }
}
