//! Collaborator adapters: the cost workbook and the exchange-rate API.

pub mod rates;
pub mod sheet;
