/// Closed-form growth, decay, sensitivity and band functions.
pub mod curves;
pub mod engine;
/// Parameter record and its validation.
pub mod params;
pub mod summary;
pub mod types;
