// DCF Valuation Engine - pure numeric library, no I/O
pub mod analysis;
pub mod error;
pub mod models;

pub use error::{ConfigError, DataError, Error, Result, ValuationError};
pub use models::{CashFlowSeries, ValuationAssumptions, ValuationResult};
