//! Error types for the Blend SDK

use thiserror::Error;

/// Core errors that can occur in the SDK
#[derive(Debug, Error)]
pub enum Error {
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),

    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] TxError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// RPC connection and query errors
#[derive(Debug, Error)]
pub enum RpcError {
    #[error("RPC unreachable at {url}")]
    Unreachable { url: String },

    #[error("RPC returned error: {message}")]
    ApiError { message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("RPC request timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("Ledger entry not found: {key}")]
    EntryNotFound { key: String },
}

/// Protocol-specific errors (reserve decoding and loading)
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Protocol state unavailable: {reason}")]
    StateUnavailable { reason: String },

    #[error("Malformed ledger entry: {message}")]
    MalformedInput { message: String },

    #[error("Invalid address: {address}")]
    InvalidAddress { address: String },

    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),
}

/// Transaction building and submission faults.
///
/// Ledger-reported failures never appear here; they are returned as a
/// failed `ContractResult`.
#[derive(Debug, Error)]
pub enum TxError {
    #[error("Invalid address: {address}")]
    InvalidAddress { address: String },

    #[error("Malformed input: {message}")]
    MalformedInput { message: String },

    #[error("Failed to build transaction: {message}")]
    BuildFailed { message: String },

    #[error("Signing failed: {message}")]
    SigningFailed { message: String },

    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),
}

/// Result type alias for SDK operations
pub type Result<T> = std::result::Result<T, Error>;

impl ProtocolError {
    /// Get a stable machine-readable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::StateUnavailable { .. } => "state_unavailable",
            Self::MalformedInput { .. } => "malformed_input",
            Self::InvalidAddress { .. } => "invalid_address",
            Self::Rpc(_) => "rpc_error",
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedInput {
            message: message.into(),
        }
    }
}

impl TxError {
    /// Get a stable machine-readable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAddress { .. } => "invalid_address",
            Self::MalformedInput { .. } => "malformed_input",
            Self::BuildFailed { .. } => "build_failed",
            Self::SigningFailed { .. } => "signing_failed",
            Self::Rpc(_) => "rpc_error",
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedInput {
            message: message.into(),
        }
    }
}
