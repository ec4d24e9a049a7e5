//! Energy-consumption forecasting for networked AI-enabled device populations.

#[cfg(feature = "api")]
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod io;
pub mod logging;
/// Forecast engine, curves, parameter and result types.
pub mod model;
pub mod runner;
pub mod units;
