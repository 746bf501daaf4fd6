//! Reserve Accrual Calculator
//!
//! Pure math projecting a reserve's rates forward from its last on-chain
//! accrual. No I/O.
//!
//! The arithmetic mirrors the pool contract's accrual operation for
//! operation. Do not reorder: downstream consumers compare these floats
//! against the contract's own figures.

use crate::constants::{rates, scalar};
use crate::state::{Reserve, ReserveConfig, ReserveData, ReserveEstimate};

/// Interest rate at a utilization, as a decimal APY.
///
/// In the top segment the modifier scales only the base and first two
/// segments, not the `r_three` term.
pub fn interest_rate(config: &ReserveConfig, cur_util: f64, ir_mod: f64) -> f64 {
    let target_util = config.target_util();
    let r_one = config.r_one as f64 / scalar::SCALAR_7;
    let r_two = config.r_two as f64 / scalar::SCALAR_7;
    let r_three = config.r_three as f64 / scalar::SCALAR_7;

    if cur_util <= target_util {
        let mut apy = (cur_util / target_util) * r_one + rates::BASE_RATE;
        apy *= ir_mod;
        apy
    } else if target_util < cur_util && cur_util <= rates::UTIL_KINK {
        let mut apy = ((cur_util - target_util) / (rates::UTIL_KINK - target_util)) * r_two
            + r_one
            + rates::BASE_RATE;
        apy *= ir_mod;
        apy
    } else {
        ((cur_util - rates::UTIL_KINK) / rates::KINK_SPAN) * r_three
            + ir_mod * (r_two + r_one + rates::BASE_RATE)
    }
}

/// Project reserve rates to `timestamp` (unix seconds). `None` projects to
/// the last accrual, applying no interest.
pub fn estimate(
    config: &ReserveConfig,
    data: &ReserveData,
    pool_tokens: i128,
    backstop_take_rate: f64,
    timestamp: Option<u64>,
) -> ReserveEstimate {
    let scaler = config.scalar();
    let mut d_rate = data.d_rate as f64 / scalar::SCALAR_9;
    let mut total_liabilities = (data.d_supply as f64 / scaler) * d_rate;
    let mut b_rate = if data.b_supply == 0 {
        1.0
    } else {
        (total_liabilities + pool_tokens as f64 / scaler) / (data.b_supply as f64 / scaler)
    };
    let mut total_supply = (data.b_supply as f64 / scaler) * b_rate;

    if total_supply == 0.0 {
        return ReserveEstimate {
            b_rate,
            d_rate,
            total_supply,
            total_liabilities,
            current_apy: rates::BASE_RATE,
            current_util: 0.0,
        };
    }

    let cur_ir_mod = data.ir_mod as f64 / scalar::SCALAR_9;
    let cur_util = total_liabilities / total_supply;
    let cur_apy = interest_rate(config, cur_util, cur_ir_mod);

    let elapsed = match timestamp {
        Some(ts) => ts as f64 - data.last_time as f64,
        None => 0.0,
    };
    let accrual = (elapsed / rates::SECONDS_PER_YEAR) * cur_apy + 1.0;

    let b_accrual = (accrual - 1.0) * cur_util;
    if backstop_take_rate > 0.0 {
        total_supply *= b_accrual * backstop_take_rate + 1.0;
        b_rate *= b_accrual * (1.0 - backstop_take_rate) + 1.0;
    } else {
        total_supply *= b_accrual + 1.0;
        b_rate *= b_accrual + 1.0;
    }
    total_liabilities *= accrual;
    d_rate *= accrual;

    ReserveEstimate {
        b_rate,
        d_rate,
        total_supply,
        total_liabilities,
        current_apy: cur_apy,
        current_util: cur_util,
    }
}

impl Reserve {
    /// Estimate this reserve's rates at `timestamp`
    pub fn estimate_data(&self, backstop_take_rate: f64, timestamp: Option<u64>) -> ReserveEstimate {
        estimate(
            &self.config,
            &self.data,
            self.pool_tokens,
            backstop_take_rate,
            timestamp,
        )
    }
}
