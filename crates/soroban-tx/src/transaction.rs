//! Envelope construction, assembly and hashing

use std::time::{SystemTime, UNIX_EPOCH};

use blend_core::{BuilderOptions, TxError, TxHash};
use sha2::{Digest, Sha256};
use soroban_rpc_client::{address, AccountSequence, SimulateTransactionResponse};
use stellar_xdr::curr::{
    Hash, Limits, Memo, MuxedAccount, Operation, OperationBody, Preconditions, ReadXdr,
    SequenceNumber, SorobanAuthorizationEntry, SorobanTransactionData, TimeBounds, TimePoint,
    Transaction, TransactionEnvelope, TransactionExt, TransactionSignaturePayload,
    TransactionSignaturePayloadTaggedTransaction, TransactionV1Envelope, Uint256, VecM, WriteXdr,
};

/// Build an unsigned envelope carrying exactly one operation
pub fn build_transaction(
    account: &AccountSequence,
    operation: Operation,
    options: &BuilderOptions,
) -> Result<TransactionEnvelope, TxError> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    build_transaction_at(account, operation, options, now)
}

/// [`build_transaction`] with an explicit clock, in unix seconds
pub fn build_transaction_at(
    account: &AccountSequence,
    operation: Operation,
    options: &BuilderOptions,
    now: u64,
) -> Result<TransactionEnvelope, TxError> {
    let key = address::account_key_bytes(&account.account_id).map_err(|_| {
        TxError::InvalidAddress {
            address: account.account_id.clone(),
        }
    })?;

    let seq_num = account
        .sequence
        .checked_add(1)
        .ok_or_else(|| TxError::BuildFailed {
            message: format!("sequence {} overflows", account.sequence),
        })?;

    let cond = match options.timebounds_secs {
        Some(secs) => Preconditions::Time(TimeBounds {
            min_time: TimePoint(0),
            max_time: TimePoint(now.saturating_add(secs)),
        }),
        None => Preconditions::None,
    };

    let operations: VecM<Operation, 100> = vec![operation]
        .try_into()
        .map_err(|e| TxError::BuildFailed {
            message: format!("operations: {}", e),
        })?;

    let tx = Transaction {
        source_account: MuxedAccount::Ed25519(Uint256(key)),
        fee: options.base_fee,
        seq_num: SequenceNumber(seq_num),
        cond,
        memo: Memo::None,
        operations,
        ext: TransactionExt::V0,
    };

    Ok(TransactionEnvelope::Tx(TransactionV1Envelope {
        tx,
        signatures: VecM::default(),
    }))
}

/// Attach a successful simulation's resources to an unsigned envelope.
///
/// The simulated resource fee is added to the inclusion fee, and invoke
/// operations without auth entries take the ones the simulation recorded.
pub fn assemble_transaction(
    envelope: TransactionEnvelope,
    simulation: &SimulateTransactionResponse,
) -> Result<TransactionEnvelope, TxError> {
    let mut v1 = match envelope {
        TransactionEnvelope::Tx(v1) => v1,
        _ => {
            return Err(TxError::malformed(
                "only unsigned v1 envelopes can be assembled",
            ))
        }
    };

    let data_xdr = simulation
        .transaction_data()
        .ok_or_else(|| TxError::malformed("simulation carries no transaction data"))?;
    let data = SorobanTransactionData::from_xdr_base64(data_xdr, Limits::none())
        .map_err(|e| TxError::malformed(format!("simulated transaction data: {}", e)))?;

    let resource_fee = simulation
        .min_resource_fee()
        .unwrap_or("0")
        .parse::<u32>()
        .map_err(|e| TxError::malformed(format!("minResourceFee: {}", e)))?;
    v1.tx.fee = v1
        .tx
        .fee
        .checked_add(resource_fee)
        .ok_or_else(|| TxError::BuildFailed {
            message: format!("fee {} + {} overflows", v1.tx.fee, resource_fee),
        })?;

    let simulated_auth = simulation
        .results
        .first()
        .map(|r| decode_auth(&r.auth))
        .transpose()?
        .unwrap_or_default();

    let mut operations = v1.tx.operations.to_vec();
    for op in operations.iter_mut() {
        if let OperationBody::InvokeHostFunction(invoke) = &mut op.body {
            if invoke.auth.is_empty() && !simulated_auth.is_empty() {
                invoke.auth = simulated_auth
                    .clone()
                    .try_into()
                    .map_err(|_| TxError::malformed("too many auth entries"))?;
            }
        }
    }
    v1.tx.operations = operations
        .try_into()
        .map_err(|_| TxError::malformed("too many operations"))?;
    v1.tx.ext = TransactionExt::V1(data);

    Ok(TransactionEnvelope::Tx(v1))
}

fn decode_auth(entries: &[String]) -> Result<Vec<SorobanAuthorizationEntry>, TxError> {
    entries
        .iter()
        .map(|entry| {
            SorobanAuthorizationEntry::from_xdr_base64(entry, Limits::none())
                .map_err(|e| TxError::malformed(format!("simulated auth entry: {}", e)))
        })
        .collect()
}

/// Network id: SHA-256 of the passphrase
pub fn network_id(passphrase: &str) -> Hash {
    Hash(Sha256::digest(passphrase.as_bytes()).into())
}

/// Hash of the signature payload for an envelope on the given network
pub fn transaction_hash(
    envelope: &TransactionEnvelope,
    passphrase: &str,
) -> Result<TxHash, TxError> {
    let tagged_transaction = match envelope {
        TransactionEnvelope::Tx(v1) => {
            TransactionSignaturePayloadTaggedTransaction::Tx(v1.tx.clone())
        }
        TransactionEnvelope::TxFeeBump(bump) => {
            TransactionSignaturePayloadTaggedTransaction::TxFeeBump(bump.tx.clone())
        }
        TransactionEnvelope::TxV0(_) => {
            return Err(TxError::malformed("v0 envelopes are not supported"))
        }
    };

    let payload = TransactionSignaturePayload {
        network_id: network_id(passphrase),
        tagged_transaction,
    };
    let bytes = payload
        .to_xdr(Limits::none())
        .map_err(|e| TxError::malformed(format!("signature payload: {}", e)))?;
    let digest: [u8; 32] = Sha256::digest(&bytes).into();
    Ok(TxHash::from_bytes(&digest))
}

pub fn envelope_to_xdr(envelope: &TransactionEnvelope) -> Result<String, TxError> {
    envelope
        .to_xdr_base64(Limits::none())
        .map_err(|e| TxError::malformed(format!("transaction envelope: {}", e)))
}

pub fn envelope_from_xdr(xdr: &str) -> Result<TransactionEnvelope, TxError> {
    TransactionEnvelope::from_xdr_base64(xdr, Limits::none())
        .map_err(|e| TxError::malformed(format!("transaction envelope: {}", e)))
}
