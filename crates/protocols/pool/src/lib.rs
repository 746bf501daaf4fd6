//! Blend Lending Pool Reserves
//!
//! This crate loads reserve snapshots from a Blend pool contract and
//! projects their exchange rates, supply, liabilities and interest rate
//! forward in time.

pub mod calculator;
pub mod constants;
pub mod decode;
pub mod fetch;
pub mod state;

// Re-exports
pub use calculator::{estimate, interest_rate};
pub use constants::{borrow_emission_index, keys, rates, scalar, supply_emission_index};
pub use fetch::{fetch_token_balance, load_reserve};
pub use state::{
    Reserve, ReserveConfig, ReserveData, ReserveEmissionConfig, ReserveEmissionData,
    ReserveEmissions, ReserveEstimate, TokenMetadata,
};
