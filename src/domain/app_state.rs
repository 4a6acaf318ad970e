use std::{
    collections::HashMap,
    time::{Duration, SystemTime},
};

use serde::{Deserialize, Serialize};

use super::entities::{CostRecord, Currency, PricingParams, Supplier, SupplierProfile};
use super::normalize::RowMap;

/// Where the cost sheet lives and how to read it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SheetConfig {
    pub path: String,
    pub sheet_name: String,
    pub rows: RowMap,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            path: "costs.xlsx".to_string(),
            sheet_name: "Print Costs".to_string(),
            rows: RowMap::default(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    /// Currency all prices and profits are reported in.
    pub currency: Currency,
    /// Normalized cost table for this session, fresh from the last sheet read.
    pub records: Vec<CostRecord>,
    pub pricing: PricingParams,
    pub sheet: SheetConfig,
    pub suppliers: SupplierProfiles,
    /// Conversion rates keyed by (quote currency, settlement currency).
    pub rates: HashMap<(Currency, Currency), f64>,
    pub cache: CacheTimestamps,
    /// Last sheet-load failure, shown instead of the cost table.
    pub sheet_error: Option<String>,
}

impl AppState {
    pub fn is_stale(&self, resource: &CacheResource, ttl: Duration) -> bool {
        self.cache.is_stale(resource, ttl)
    }

    pub fn supplier_profile(&self, supplier: Supplier) -> SupplierProfile {
        self.suppliers.get(supplier)
    }

    /// Rate from a supplier's quote currency into the settlement currency.
    /// Until a fetch lands this is the hardcoded fallback constant for the
    /// pair, never parity: an unknown rate must not read as a real 1.0.
    pub fn rate_for(&self, from: Currency) -> f64 {
        if from == self.currency {
            return 1.0;
        }
        self.rates
            .get(&(from, self.currency))
            .copied()
            .unwrap_or_else(|| from.fallback_rate(self.currency))
    }

    pub fn apply_persisted(&mut self, persisted: PersistedState) {
        self.currency = persisted.currency;
        self.pricing = persisted.pricing;
        self.sheet = persisted.sheet;
        self.suppliers = persisted.suppliers;
    }

    pub fn to_persisted(&self) -> PersistedState {
        PersistedState {
            currency: self.currency,
            pricing: self.pricing,
            sheet: self.sheet.clone(),
            suppliers: self.suppliers,
        }
    }
}

/// Quote currency and fallback postage per supplier.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SupplierProfiles {
    pub primary: SupplierProfile,
    pub secondary: SupplierProfile,
}

impl Default for SupplierProfiles {
    fn default() -> Self {
        Self {
            primary: SupplierProfile::defaults_for(Supplier::Primary),
            secondary: SupplierProfile::defaults_for(Supplier::Secondary),
        }
    }
}

impl SupplierProfiles {
    pub fn get(&self, supplier: Supplier) -> SupplierProfile {
        match supplier {
            Supplier::Primary => self.primary,
            Supplier::Secondary => self.secondary,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct CacheTimestamps {
    entries: HashMap<CacheResource, SystemTime>,
}

impl CacheTimestamps {
    pub fn record_fetch(&mut self, resource: CacheResource, fetched_at: SystemTime) {
        self.entries.insert(resource, fetched_at);
    }

    pub fn fetched_at(&self, resource: &CacheResource) -> Option<SystemTime> {
        self.entries.get(resource).copied()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CacheResource, &SystemTime)> {
        self.entries.iter()
    }

    pub fn is_stale(&self, resource: &CacheResource, ttl: Duration) -> bool {
        self.fetched_at(resource)
            .map(|time| time.elapsed().map(|elapsed| elapsed > ttl).unwrap_or(true))
            .unwrap_or(true)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CacheResource {
    CostSheet,
    Rate(Currency, Currency),
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub currency: Currency,
    #[serde(default)]
    pub pricing: PricingParams,
    #[serde(default)]
    pub sheet: SheetConfig,
    #[serde(default)]
    pub suppliers: SupplierProfiles,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_rate_is_one_without_any_fetch() {
        let state = AppState::default();
        assert_eq!(state.rate_for(state.currency), 1.0);
    }

    #[test]
    fn unfetched_foreign_rate_uses_the_fallback_constant() {
        // A GBP quote settled in EUR before any fetch has landed must not
        // convert at parity.
        let state = AppState::default();
        assert_eq!(state.currency, Currency::Eur);
        assert_eq!(
            state.rate_for(Currency::Gbp),
            Currency::Gbp.fallback_rate(Currency::Eur)
        );
        assert_ne!(state.rate_for(Currency::Gbp), 1.0);
    }

    #[test]
    fn fetched_rate_wins_over_the_fallback() {
        let mut state = AppState::default();
        state.rates.insert((Currency::Gbp, Currency::Eur), 1.21);
        assert_eq!(state.rate_for(Currency::Gbp), 1.21);
    }

    #[test]
    fn persisted_round_trip_keeps_configuration() {
        let mut state = AppState::default();
        state.currency = Currency::Gbp;
        state.pricing.fee = 0.065;
        state.sheet.sheet_name = "Kosten".to_string();

        let mut restored = AppState::default();
        restored.apply_persisted(state.to_persisted());
        assert_eq!(restored.currency, Currency::Gbp);
        assert_eq!(restored.pricing.fee, 0.065);
        assert_eq!(restored.sheet.sheet_name, "Kosten");
    }

    #[test]
    fn cache_entries_without_timestamp_are_stale() {
        let state = AppState::default();
        assert!(state.is_stale(&CacheResource::CostSheet, Duration::from_secs(60)));
    }
}
