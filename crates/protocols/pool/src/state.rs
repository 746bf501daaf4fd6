//! Reserve State Types
//!
//! Point-in-time copies of a reserve's on-chain configuration and state.
//! Integer fields keep the contract's fixed-point encoding; conversion to
//! decimals happens in the calculator.

use blend_core::Address;
use serde::{Deserialize, Serialize};

use crate::constants::scalar;

/// Reserve configuration, set at creation and changed by governance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveConfig {
    /// Position of the reserve in the pool's reserve list
    pub index: u32,
    pub decimals: u32,
    /// Collateral factor (7 decimals)
    pub c_factor: u32,
    /// Liability factor (7 decimals)
    pub l_factor: u32,
    /// Target utilization (7 decimals)
    pub util: u32,
    pub max_util: u32,
    /// Curve slopes (7 decimals)
    pub r_one: u32,
    pub r_two: u32,
    pub r_three: u32,
    pub reactivity: u32,
}

impl ReserveConfig {
    /// `10^decimals` as a float
    pub fn scalar(&self) -> f64 {
        10f64.powi(self.decimals as i32)
    }

    pub fn target_util(&self) -> f64 {
        self.util as f64 / scalar::SCALAR_7
    }
}

/// Reserve state, updated by every pool action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveData {
    /// Debt token exchange rate (9 decimals)
    pub d_rate: i128,
    /// Supply token exchange rate (9 decimals)
    pub b_rate: i128,
    /// Interest rate modifier (9 decimals)
    pub ir_mod: i128,
    pub b_supply: i128,
    pub d_supply: i128,
    pub backstop_credit: i128,
    /// Unix seconds of the last accrual
    pub last_time: u64,
}

/// Emission schedule for one side of a reserve
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveEmissionConfig {
    /// Emissions per second
    pub eps: u64,
    pub expiration: u64,
}

/// Emission accumulator for one side of a reserve
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveEmissionData {
    pub index: i128,
    pub last_time: u64,
}

/// Emission config and data for one side (supply or borrow) of a reserve
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveEmissions {
    pub config: Option<ReserveEmissionConfig>,
    pub data: Option<ReserveEmissionData>,
}

impl ReserveEmissions {
    pub fn is_empty(&self) -> bool {
        self.config.is_none() && self.data.is_none()
    }
}

/// Token metadata stored in a token contract's instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u32,
}

/// A reserve as loaded from the ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reserve {
    pub asset_id: Address,
    pub token_metadata: Option<TokenMetadata>,
    /// Underlying tokens held by the pool contract
    pub pool_tokens: i128,
    pub config: ReserveConfig,
    pub data: ReserveData,
    pub supply_emissions: ReserveEmissions,
    pub borrow_emissions: ReserveEmissions,
}

/// Projected reserve metrics. Rates and values are decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReserveEstimate {
    pub b_rate: f64,
    pub d_rate: f64,
    pub total_supply: f64,
    pub total_liabilities: f64,
    pub current_apy: f64,
    pub current_util: f64,
}
