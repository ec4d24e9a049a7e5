/// Tabular CSV export of forecast results.
pub mod export;
