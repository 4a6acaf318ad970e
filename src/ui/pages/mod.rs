pub mod costs;
pub mod pricing;
pub mod settings;

pub use costs::CostsPage;
pub use pricing::PricingPage;
pub use settings::SettingsPage;
