//! Contract invocation pipeline
//!
//! build -> simulate -> (stop if simulate-only) -> assemble -> sign ->
//! submit -> poll -> normalize. Every ledger-level failure comes back as a
//! `ContractResult::Failure`; `Err` is reserved for client faults and
//! transport errors.

use async_trait::async_trait;
use blend_core::{TxError, TxOptions};
use soroban_rpc_client::{LedgerAccess, SorobanResponse};
use stellar_xdr::curr::{Operation, ScVal};
use tokio::time::{sleep, Instant};

use crate::contract_error::ContractError;
use crate::contract_result::ContractResult;
use crate::resources::Resources;
use crate::transaction::{
    assemble_transaction, build_transaction, envelope_from_xdr, envelope_to_xdr,
    transaction_hash,
};

/// Signs a base64 transaction envelope, returning the signed envelope
#[async_trait]
pub trait TransactionSigner: Send + Sync {
    async fn sign(&self, tx_xdr: &str) -> Result<String, TxError>;
}

/// Ledger plus the passphrase that scopes its transaction hashes
pub struct SorobanNetwork<'a, L: LedgerAccess + ?Sized> {
    pub ledger: &'a L,
    pub passphrase: &'a str,
}

impl<'a, L: LedgerAccess + ?Sized> SorobanNetwork<'a, L> {
    pub fn new(ledger: &'a L, passphrase: &'a str) -> Self {
        Self { ledger, passphrase }
    }
}

/// Invoke a single `InvokeHostFunction` operation from `source`
pub async fn invoke_operation<L, S, T, F>(
    source: &str,
    signer: &S,
    network: &SorobanNetwork<'_, L>,
    options: &TxOptions,
    parse: F,
    operation: Operation,
) -> Result<ContractResult<T>, TxError>
where
    L: LedgerAccess + ?Sized,
    S: TransactionSigner + ?Sized,
    F: Fn(Option<&ScVal>) -> Option<T>,
{
    let ledger = network.ledger;

    let account = ledger.get_account(source).await?;
    let tx = build_transaction(&account, operation, &options.builder)?;
    tracing::debug!(source, sequence = account.sequence + 1, "built transaction");

    let simulation = ledger.simulate_transaction(&tx).await?;
    if !simulation.is_success() || simulation.is_restore() {
        // No footprint was assigned, so there are no resources to report
        let hash = transaction_hash(&tx, network.passphrase)?;
        tracing::debug!(
            %hash,
            error = simulation.error.as_deref().unwrap_or(""),
            restore = simulation.is_restore(),
            "simulation did not succeed"
        );
        return ContractResult::from_response(
            hash,
            Resources::default(),
            &SorobanResponse::Simulation(simulation),
            parse,
        );
    }

    let prepared = assemble_transaction(tx, &simulation)?;
    let resources = Resources::from_envelope(&prepared)?;

    if options.simulate_only {
        let hash = transaction_hash(&prepared, network.passphrase)?;
        tracing::debug!(%hash, fee = resources.fee, "simulate-only invocation");
        return ContractResult::from_response(
            hash,
            resources,
            &SorobanResponse::Simulation(simulation),
            parse,
        );
    }

    let signed_xdr = signer.sign(&envelope_to_xdr(&prepared)?).await?;
    let signed = envelope_from_xdr(&signed_xdr).map_err(|e| TxError::SigningFailed {
        message: format!("signer returned an invalid envelope: {}", e),
    })?;
    let hash = transaction_hash(&signed, network.passphrase)?;

    let sent = ledger.send_transaction(&signed).await?;
    tracing::info!(%hash, status = sent.status.as_str(), "transaction submitted");
    let mut response = SorobanResponse::Submitted(sent);

    let started = Instant::now();
    while response.is_pending() {
        if started.elapsed() >= options.timeout() {
            let status = response.status().unwrap_or("UNKNOWN");
            tracing::warn!(
                %hash,
                status,
                timeout_ms = options.timeout_ms,
                "transaction timed out"
            );
            return Ok(ContractResult::failure(
                hash,
                resources,
                ContractError::timeout(status),
            ));
        }
        sleep(options.poll_interval()).await;
        response = ledger.get_transaction(hash.as_str()).await?.into();
        tracing::debug!(%hash, status = response.status().unwrap_or(""), "polled transaction");
    }

    tracing::info!(%hash, status = response.status().unwrap_or(""), "transaction finished");
    ContractResult::from_response(hash, resources, &response, parse)
}
