use thiserror::Error;

/// Malformed or insufficient input data.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DataError {
    #[error("series has {actual} period(s), need at least {required}")]
    SeriesTooShort { required: usize, actual: usize },

    #[error("cash flow for period {period} is zero; growth from a zero base is undefined")]
    ZeroBaseValue { period: usize },

    #[error(
        "cash flow changes sign between periods {from} and {to} ({prev} -> {next}); \
         percentage growth across a sign change is undefined"
    )]
    SignChange {
        from: usize,
        to: usize,
        prev: f64,
        next: f64,
    },

    #[error("projection horizon must be at least 1 period")]
    EmptyHorizon,

    #[error("series length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("peer multiple set is empty")]
    EmptyPeerSet,

    #[error("revenue for period {period} is zero; FCF margin is undefined")]
    ZeroRevenue { period: usize },

    #[error("independent variable has zero variance; trend slope is undefined")]
    DegenerateTrend,
}

/// Mathematically undefined valuation request.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValuationError {
    #[error(
        "discount rate {discount_rate} must exceed terminal growth rate {terminal_growth_rate}; \
         the perpetuity-growth denominator is non-positive"
    )]
    TerminalGrowthExceedsDiscount {
        discount_rate: f64,
        terminal_growth_rate: f64,
    },
}

/// Invalid assumption values supplied by the caller.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("share_count must be positive, got {share_count}")]
    NonPositiveShareCount { share_count: f64 },

    #[error("{field} must be greater than -1.0 (-100%), got {value}")]
    RateBelowNegativeOne { field: &'static str, value: f64 },

    #[error("weight at index {index} is negative: {weight}")]
    NegativeWeight { index: usize, weight: f64 },

    #[error("got {weights} weight(s) for {values} value(s)")]
    WeightCountMismatch { values: usize, weights: usize },

    #[error("weights sum to {sum}, expected 1.0 within a tolerance of {tolerance}")]
    WeightsDoNotSumToOne { sum: f64, tolerance: f64 },
}

/// Top-level error type for engine operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Valuation(#[from] ValuationError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;
