pub mod cost_table;
pub mod kpi_card;
pub mod toast;
