//! Configuration types for the Blend SDK

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Address, Error, Network};

/// RPC connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// RPC URL (e.g., "https://soroban-testnet.stellar.org")
    pub rpc_url: String,

    /// Network passphrase used for transaction hashing
    pub passphrase: String,

    /// Permit plain-http RPC endpoints (local standalone nodes)
    #[serde(default)]
    pub allow_http: bool,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl NetworkConfig {
    pub fn new(rpc_url: impl Into<String>, passphrase: impl Into<String>) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            passphrase: passphrase.into(),
            allow_http: false,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }

    /// Config for a well-known network, using its public RPC when one exists
    pub fn for_network(network: Network) -> Self {
        Self::new(
            network.default_rpc_url().unwrap_or_default(),
            network.passphrase(),
        )
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self::for_network(Network::Testnet)
    }
}

/// Envelope construction options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuilderOptions {
    /// Inclusion fee per operation, in stroops
    #[serde(default = "default_base_fee")]
    pub base_fee: u32,

    /// Upper time bound, in seconds from build time. `None` leaves the
    /// envelope unbounded.
    #[serde(default = "default_timebounds_secs")]
    pub timebounds_secs: Option<u64>,
}

fn default_base_fee() -> u32 {
    crate::constants::BASE_FEE_STROOPS as u32
}

fn default_timebounds_secs() -> Option<u64> {
    Some(300)
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            base_fee: default_base_fee(),
            timebounds_secs: default_timebounds_secs(),
        }
    }
}

/// Options for a single contract invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxOptions {
    /// Only simulate; never sign or submit
    #[serde(default)]
    pub simulate_only: bool,

    /// Wait between status polls, in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Total polling budget, in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default)]
    pub builder: BuilderOptions,
}

fn default_poll_interval_ms() -> u64 {
    1_000
}

fn default_timeout_ms() -> u64 {
    15_000
}

impl TxOptions {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Same options with simulation-only mode switched on
    pub fn simulated(mut self) -> Self {
        self.simulate_only = true;
        self
    }
}

impl Default for TxOptions {
    fn default() -> Self {
        Self {
            simulate_only: false,
            poll_interval_ms: default_poll_interval_ms(),
            timeout_ms: default_timeout_ms(),
            builder: BuilderOptions::default(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// RPC connection settings
    #[serde(default)]
    pub network: NetworkConfig,

    /// Invocation defaults
    #[serde(default)]
    pub tx_options: TxOptions,

    /// Lending pool contract
    pub pool_id: Address,

    /// Reserve asset contracts to monitor
    #[serde(default)]
    pub reserves: Vec<Address>,

    /// Fraction of supply-side interest routed to the backstop, in [0, 1]
    #[serde(default)]
    pub backstop_take_rate: f64,
}

impl AppConfig {
    /// Load from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> crate::Result<Self> {
        let config: Self =
            serde_json::from_str(raw).map_err(|e| Error::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> crate::Result<()> {
        if !(0.0..=1.0).contains(&self.backstop_take_rate) {
            return Err(Error::Config(format!(
                "backstop_take_rate must be within [0, 1], got {}",
                self.backstop_take_rate
            )));
        }
        if self.network.rpc_url.is_empty() {
            return Err(Error::Config("network.rpc_url is required".to_string()));
        }
        if self.network.rpc_url.starts_with("http://") && !self.network.allow_http {
            return Err(Error::Config(format!(
                "{} uses plain http; set network.allow_http to permit it",
                self.network.rpc_url
            )));
        }
        Ok(())
    }
}
