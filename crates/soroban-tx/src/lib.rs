//! soroban-tx: Contract invocation against a Soroban network
//!
//! This crate provides:
//! - Resource extraction from assembled envelopes
//! - Classification of simulation and ledger failures
//! - A uniform `ContractResult` over simulation, submission and polled responses
//! - The invocation pipeline: build, simulate, assemble, sign, submit, poll

pub mod contract_error;
pub mod contract_result;
pub mod invoke;
pub mod resources;
pub mod transaction;

#[cfg(test)]
mod fixtures;
#[cfg(test)]
mod test_support;

pub use contract_error::{ContractError, ErrorKind};
pub use contract_result::ContractResult;
pub use invoke::{invoke_operation, SorobanNetwork, TransactionSigner};
pub use resources::Resources;
pub use transaction::{
    assemble_transaction, build_transaction, build_transaction_at, envelope_from_xdr,
    envelope_to_xdr, network_id, transaction_hash,
};
