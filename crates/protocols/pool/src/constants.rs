//! Blend Pool Constants

/// Fixed-point bases used by the pool contract
pub mod scalar {
    /// Exchange rates and the interest rate modifier
    pub const SCALAR_9: f64 = 1e9;
    /// Utilization targets and rate curve slopes
    pub const SCALAR_7: f64 = 1e7;
}

/// Interest rate curve
pub mod rates {
    /// Floor APY applied at zero utilization
    pub const BASE_RATE: f64 = 0.01;
    /// Utilization above which the third curve segment applies
    pub const UTIL_KINK: f64 = 0.95;
    /// Width of the third segment. Kept as a literal: `1.0 - UTIL_KINK` is
    /// not the same f64.
    pub const KINK_SPAN: f64 = 0.05;
    pub const SECONDS_PER_YEAR: f64 = 31_536_000.0;
}

/// Contract storage key symbols
pub mod keys {
    pub const RESERVE_CONFIG: &str = "ResConfig";
    pub const RESERVE_DATA: &str = "ResData";
    pub const EMISSION_CONFIG: &str = "EmisConfig";
    pub const EMISSION_DATA: &str = "EmisData";
    pub const CONTRACT_INSTANCE: &str = "ContractInstance";
    /// Token contract balance entry
    pub const BALANCE: &str = "Balance";
    /// Token metadata inside a token's instance storage
    pub const METADATA: &str = "METADATA";
}

/// Emission index of a reserve's supply (b-token) side
pub fn supply_emission_index(reserve_index: u32) -> u32 {
    reserve_index * 2 + 1
}

/// Emission index of a reserve's borrow (d-token) side
pub fn borrow_emission_index(reserve_index: u32) -> u32 {
    reserve_index * 2
}
