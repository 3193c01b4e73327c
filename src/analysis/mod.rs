pub mod comparables;
pub mod dcf;
pub mod fcf;
pub mod growth;
pub mod regression;
