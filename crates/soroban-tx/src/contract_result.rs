//! Uniform outcome of a contract invocation

use std::fmt;

use blend_core::{TxError, TxHash};
use serde::Serialize;
use soroban_rpc_client::{
    GetTransactionResponse, GetTransactionStatus, SendTransactionResponse,
    SimulateTransactionResponse, SorobanResponse,
};
use stellar_xdr::curr::{
    Limits, ReadXdr, ScVal, SorobanTransactionData, TransactionMeta, TransactionResult,
};

use crate::contract_error::{ContractError, ErrorKind};
use crate::resources::Resources;

/// Outcome of a submitted or simulated invocation. Ledger-reported failures
/// land in `Failure`; only client faults are returned as `Err`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ContractResult<T> {
    Success {
        hash: TxHash,
        resources: Resources,
        value: Option<T>,
    },
    Failure {
        hash: TxHash,
        resources: Resources,
        #[serde(serialize_with = "serialize_error")]
        error: ContractError,
    },
}

fn serialize_error<S: serde::Serializer>(error: &ContractError, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&error.to_string())
}

impl<T> ContractResult<T> {
    pub fn success(hash: TxHash, resources: Resources, value: Option<T>) -> Self {
        Self::Success {
            hash,
            resources,
            value,
        }
    }

    pub fn failure(hash: TxHash, resources: Resources, error: ContractError) -> Self {
        Self::Failure {
            hash,
            resources,
            error,
        }
    }

    /// Normalize any pipeline response into an outcome.
    ///
    /// `parse` receives the decoded return value, or `None` when the
    /// response carries none. Undecodable XDR is a client fault.
    pub fn from_response<F>(
        hash: TxHash,
        resources: Resources,
        response: &SorobanResponse,
        parse: F,
    ) -> Result<Self, TxError>
    where
        F: Fn(Option<&ScVal>) -> Option<T>,
    {
        match response {
            SorobanResponse::Simulation(sim) => from_simulation(hash, resources, sim, parse),
            SorobanResponse::Polled(polled) => from_polled(hash, resources, polled, parse),
            SorobanResponse::Submitted(sent) => from_submitted(hash, resources, sent, response),
        }
    }

    pub fn hash(&self) -> &TxHash {
        match self {
            Self::Success { hash, .. } | Self::Failure { hash, .. } => hash,
        }
    }

    pub fn resources(&self) -> &Resources {
        match self {
            Self::Success { resources, .. } | Self::Failure { resources, .. } => resources,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Success { value, .. } => value.as_ref(),
            Self::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&ContractError> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error, .. } => Some(error),
        }
    }

    pub fn into_result(self) -> Result<Option<T>, ContractError> {
        match self {
            Self::Success { value, .. } => Ok(value),
            Self::Failure { error, .. } => Err(error),
        }
    }

    /// Returns the value of a successful invocation.
    ///
    /// # Panics
    ///
    /// Panics with the classified error if the invocation failed.
    pub fn unwrap(self) -> Option<T> {
        match self {
            Self::Success { value, .. } => value,
            Self::Failure { hash, error, .. } => {
                panic!("called `ContractResult::unwrap()` on failed tx {}: {}", hash, error)
            }
        }
    }
}

impl<T: fmt::Display> fmt::Display for ContractResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success { value: None, .. } => write!(f, "Success!"),
            Self::Success {
                value: Some(value), ..
            } => write!(f, "Success: {}", value),
            Self::Failure { error, .. } => write!(f, "Failure: {}", error),
        }
    }
}

fn from_simulation<T, F>(
    hash: TxHash,
    resources: Resources,
    sim: &SimulateTransactionResponse,
    parse: F,
) -> Result<ContractResult<T>, TxError>
where
    F: Fn(Option<&ScVal>) -> Option<T>,
{
    // A restore simulation also carries transaction data, so check it first
    if let Some(preamble) = sim.restore() {
        let data =
            SorobanTransactionData::from_xdr_base64(&preamble.transaction_data, Limits::none())
                .map_err(|e| TxError::malformed(format!("restore preamble: {}", e)))?;
        let footprint = serde_json::to_string_pretty(&data.resources.footprint)
            .map_err(|e| TxError::malformed(format!("restore footprint: {}", e)))?;
        return Ok(ContractResult::failure(
            hash,
            resources,
            ContractError::new(ErrorKind::EntryArchived, footprint),
        ));
    }

    if sim.is_success() {
        let value = decode_optional::<ScVal>(sim.return_value_xdr(), "simulated return value")?;
        return Ok(ContractResult::success(hash, resources, parse(value.as_ref())));
    }

    if let Some(diagnostic) = &sim.error {
        return Ok(ContractResult::failure(
            hash,
            resources,
            ContractError::from_diagnostic(diagnostic),
        ));
    }

    Ok(ContractResult::failure(
        hash,
        resources,
        ContractError::new(
            ErrorKind::Unknown,
            format!("invalid simulation: no result in {}", dump(sim)),
        ),
    ))
}

fn from_polled<T, F>(
    hash: TxHash,
    resources: Resources,
    polled: &GetTransactionResponse,
    parse: F,
) -> Result<ContractResult<T>, TxError>
where
    F: Fn(Option<&ScVal>) -> Option<T>,
{
    match polled.status {
        GetTransactionStatus::Success => {
            let meta = decode_optional::<TransactionMeta>(
                polled.result_meta_xdr.as_deref(),
                "transaction meta",
            )?;
            let value = meta.as_ref().and_then(return_value);
            Ok(ContractResult::success(hash, resources, parse(value)))
        }
        _ => {
            let result = decode_optional::<TransactionResult>(
                polled.result_xdr.as_deref(),
                "transaction result",
            )?;
            let error = match result {
                Some(result) => ContractError::from_transaction_result(&result),
                None => ContractError::new(ErrorKind::Unknown, dump(polled)),
            };
            Ok(ContractResult::failure(hash, resources, error))
        }
    }
}

fn from_submitted<T>(
    hash: TxHash,
    resources: Resources,
    sent: &SendTransactionResponse,
    response: &SorobanResponse,
) -> Result<ContractResult<T>, TxError> {
    let result = decode_optional::<TransactionResult>(
        sent.error_result_xdr.as_deref(),
        "submission error result",
    )?;
    let error = match result {
        Some(result) => ContractError::from_transaction_result(&result),
        None => ContractError::new(ErrorKind::Unknown, dump(response)),
    };
    Ok(ContractResult::failure(hash, resources, error))
}

fn return_value(meta: &TransactionMeta) -> Option<&ScVal> {
    match meta {
        TransactionMeta::V3(v3) => v3.soroban_meta.as_ref().map(|m| &m.return_value),
        _ => None,
    }
}

fn decode_optional<X: ReadXdr>(xdr: Option<&str>, what: &str) -> Result<Option<X>, TxError> {
    xdr.filter(|s| !s.is_empty())
        .map(|s| {
            X::from_xdr_base64(s, Limits::none())
                .map_err(|e| TxError::malformed(format!("{}: {}", what, e)))
        })
        .transpose()
}

fn dump<S: Serialize + fmt::Debug>(value: &S) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| format!("{:?}", value))
}
