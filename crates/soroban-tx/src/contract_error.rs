//! Classification of ledger-reported failures
//!
//! Failures arrive in two forms. Simulation reports a free-form diagnostic
//! string that may embed a contract error code; committed execution reports
//! a structured `TransactionResult`. Both end up as a [`ContractError`].

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use stellar_xdr::curr::{
    InnerTransactionResultResult, OperationResult, OperationResultTr, TransactionResult,
    TransactionResultResult,
};
use thiserror::Error;

static CONTRACT_ERROR_CODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:Error\(Contract, #|contract error, code )(\d+)")
        .expect("contract error pattern compiles")
});

/// Failure taxonomy
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    // Common
    InternalError,
    AlreadyInitialized,
    Unauthorized,
    NegativeAmount,
    BalanceError,
    Overflow,

    // Backstop
    BadRequest,
    NotExpired,
    InvalidRewardZoneEntry,
    InsufficientFunds,
    NotPool,

    // Pool requests
    PoolBadRequest,
    InvalidPoolInitArgs,
    InvalidReserveMetadata,
    InitNotUnlocked,
    StatusNotAllowed,

    // Pool state
    InvalidHf,
    InvalidPoolStatus,
    InvalidUtilRate,
    MaxPositionsExceeded,
    InternalReserveNotFound,

    // Oracle
    StalePrice,

    // Auctions
    InvalidLiquidation,
    AuctionInProgress,
    InvalidLiqTooLarge,
    InvalidLiqTooSmall,
    InterestTooSmall,

    // Pool factory
    InvalidPoolFactoryInitArgs,

    // Client side
    EntryArchived,
    Timeout,
    MalformedInput,
    Unknown,

    /// Composite of a transaction result code and its operation result
    /// codes, e.g. `TxFailed-Trapped`
    Transaction(String),
}

impl ErrorKind {
    /// Map a numeric contract error code
    pub fn from_contract_code(code: u32) -> Option<Self> {
        let kind = match code {
            1 => Self::InternalError,
            3 => Self::AlreadyInitialized,
            4 => Self::Unauthorized,
            8 => Self::NegativeAmount,
            10 => Self::BalanceError,
            12 => Self::Overflow,
            1000 => Self::BadRequest,
            1001 => Self::NotExpired,
            1002 => Self::InvalidRewardZoneEntry,
            1003 => Self::InsufficientFunds,
            1004 => Self::NotPool,
            1200 => Self::PoolBadRequest,
            1201 => Self::InvalidPoolInitArgs,
            1202 => Self::InvalidReserveMetadata,
            1203 => Self::InitNotUnlocked,
            1204 => Self::StatusNotAllowed,
            1205 => Self::InvalidHf,
            1206 => Self::InvalidPoolStatus,
            1207 => Self::InvalidUtilRate,
            1208 => Self::MaxPositionsExceeded,
            1209 => Self::InternalReserveNotFound,
            1210 => Self::StalePrice,
            1211 => Self::InvalidLiquidation,
            1212 => Self::AuctionInProgress,
            1213 => Self::InvalidLiqTooLarge,
            1214 => Self::InvalidLiqTooSmall,
            1215 => Self::InterestTooSmall,
            1300 => Self::InvalidPoolFactoryInitArgs,
            _ => return None,
        };
        Some(kind)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::InternalError => "InternalError",
            Self::AlreadyInitialized => "AlreadyInitialized",
            Self::Unauthorized => "Unauthorized",
            Self::NegativeAmount => "NegativeAmount",
            Self::BalanceError => "BalanceError",
            Self::Overflow => "Overflow",
            Self::BadRequest => "BadRequest",
            Self::NotExpired => "NotExpired",
            Self::InvalidRewardZoneEntry => "InvalidRewardZoneEntry",
            Self::InsufficientFunds => "InsufficientFunds",
            Self::NotPool => "NotPool",
            Self::PoolBadRequest => "PoolBadRequest",
            Self::InvalidPoolInitArgs => "InvalidPoolInitArgs",
            Self::InvalidReserveMetadata => "InvalidReserveMetadata",
            Self::InitNotUnlocked => "InitNotUnlocked",
            Self::StatusNotAllowed => "StatusNotAllowed",
            Self::InvalidHf => "InvalidHf",
            Self::InvalidPoolStatus => "InvalidPoolStatus",
            Self::InvalidUtilRate => "InvalidUtilRate",
            Self::MaxPositionsExceeded => "MaxPositionsExceeded",
            Self::InternalReserveNotFound => "InternalReserveNotFound",
            Self::StalePrice => "StalePrice",
            Self::InvalidLiquidation => "InvalidLiquidation",
            Self::AuctionInProgress => "AuctionInProgress",
            Self::InvalidLiqTooLarge => "InvalidLiqTooLarge",
            Self::InvalidLiqTooSmall => "InvalidLiqTooSmall",
            Self::InterestTooSmall => "InterestTooSmall",
            Self::InvalidPoolFactoryInitArgs => "InvalidPoolFactoryInitArgs",
            Self::EntryArchived => "EntryArchived",
            Self::Timeout => "Timeout",
            Self::MalformedInput => "MalformedInput",
            Self::Unknown => "Unknown",
            Self::Transaction(composite) => composite,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified failure. `kind` is `None` when the diagnostic carried no
/// recognizable code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}{}", kind_prefix(.kind), .message)]
pub struct ContractError {
    pub kind: Option<ErrorKind>,
    pub message: String,
}

fn kind_prefix(kind: &Option<ErrorKind>) -> String {
    kind.as_ref().map(|k| format!("{}: ", k)).unwrap_or_default()
}

impl ContractError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind: Some(kind),
            message: message.into(),
        }
    }

    pub fn timeout(status: &str) -> Self {
        Self::new(
            ErrorKind::Timeout,
            format!("Transaction timed out with status {}", status),
        )
    }

    /// Classify a simulation diagnostic by its embedded contract error code
    pub fn from_diagnostic(diagnostic: &str) -> Self {
        let kind = CONTRACT_ERROR_CODE
            .captures(diagnostic)
            .and_then(|caps| caps.get(1))
            .and_then(|code| code.as_str().parse::<u32>().ok())
            .and_then(ErrorKind::from_contract_code);
        Self {
            kind,
            message: diagnostic.to_string(),
        }
    }

    /// Classify a structured ledger result. The kind joins the transaction
    /// result code with each operation's result code.
    pub fn from_transaction_result(result: &TransactionResult) -> Self {
        let mut codes = vec![result.result.name().to_string()];
        codes.extend(operation_results(&result.result).iter().map(operation_code));

        let message =
            serde_json::to_string_pretty(result).unwrap_or_else(|_| format!("{:?}", result));
        Self::new(ErrorKind::Transaction(codes.join("-")), message)
    }
}

fn operation_results(result: &TransactionResultResult) -> &[OperationResult] {
    match result {
        TransactionResultResult::TxSuccess(ops) | TransactionResultResult::TxFailed(ops) => {
            ops.as_slice()
        }
        TransactionResultResult::TxFeeBumpInnerSuccess(pair)
        | TransactionResultResult::TxFeeBumpInnerFailed(pair) => match &pair.result.result {
            InnerTransactionResultResult::TxSuccess(ops)
            | InnerTransactionResultResult::TxFailed(ops) => ops.as_slice(),
            _ => &[],
        },
        _ => &[],
    }
}

fn operation_code(op: &OperationResult) -> String {
    match op {
        OperationResult::OpInner(OperationResultTr::InvokeHostFunction(invoke)) => {
            invoke.name().to_string()
        }
        OperationResult::OpInner(tr) => tr.name().to_string(),
        other => other.name().to_string(),
    }
}
