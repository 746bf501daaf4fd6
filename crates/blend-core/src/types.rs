//! Core type definitions for the Blend SDK

use serde::{Deserialize, Serialize};
use std::fmt;

/// Transaction hash (32 bytes, hex-encoded)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxHash(pub String);

impl TxHash {
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// Render raw hash bytes as lowercase hex
    pub fn from_bytes(bytes: &[u8; 32]) -> Self {
        Self(hex::encode(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stellar strkey address (G... account or C... contract)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(pub String);

impl Address {
    pub fn new(addr: impl Into<String>) -> Self {
        Self(addr.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if this is an account (ed25519 public key) address
    pub fn is_account(&self) -> bool {
        self.0.starts_with('G')
    }

    /// Check if this is a contract address
    pub fn is_contract(&self) -> bool {
        self.0.starts_with('C')
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Well-known Stellar networks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
    Futurenet,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
            Self::Futurenet => "futurenet",
        }
    }

    /// Network passphrase, hashed into every transaction signature payload
    pub fn passphrase(&self) -> &'static str {
        match self {
            Self::Mainnet => constants::MAINNET_PASSPHRASE,
            Self::Testnet => constants::TESTNET_PASSPHRASE,
            Self::Futurenet => constants::FUTURENET_PASSPHRASE,
        }
    }

    /// Public RPC endpoint operated by SDF, where one exists
    pub fn default_rpc_url(&self) -> Option<&'static str> {
        match self {
            Self::Mainnet => None,
            Self::Testnet => Some("https://soroban-testnet.stellar.org"),
            Self::Futurenet => Some("https://rpc-futurenet.stellar.org"),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Stroop amount (1 XLM = 10_000_000 stroops)
pub type Stroops = i64;

/// Constants
pub mod constants {
    use super::Stroops;

    pub const MAINNET_PASSPHRASE: &str = "Public Global Stellar Network ; September 2015";
    pub const TESTNET_PASSPHRASE: &str = "Test SDF Network ; September 2015";
    pub const FUTURENET_PASSPHRASE: &str = "Test SDF Future Network ; October 2022";

    /// Minimum per-operation inclusion fee
    pub const BASE_FEE_STROOPS: Stroops = 100;
}
