//! Domain logic for print pricing lives here.

pub mod app_state;
pub mod entities;
pub mod normalize;
pub mod pricing;

#[allow(unused_imports)]
pub use app_state::{
    AppState, CacheResource, CacheTimestamps, PersistedState, SheetConfig, SupplierProfiles,
};
#[allow(unused_imports)]
pub use entities::{
    CostRecord, Currency, PricingParams, PricingRequest, PricingResult, Supplier, SupplierProfile,
    SupplierQuote,
};
#[allow(unused_imports)]
pub use normalize::{normalize, Cell, MalformedTableError, RowMap};
#[allow(unused_imports)]
pub use pricing::{
    base_cost_for, current_listing_profit, nearest_record, recommend, round_cents,
    PricingError, SizeMatch,
};
