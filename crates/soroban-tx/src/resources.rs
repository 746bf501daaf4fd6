//! Resource usage declared by an assembled Soroban transaction

use blend_core::TxError;
use serde::{Deserialize, Serialize};
use stellar_xdr::curr::{
    FeeBumpTransactionInnerTx, Limits, ReadXdr, Transaction, TransactionEnvelope, TransactionExt,
};

/// Fee and resource footprint of a transaction.
///
/// All-zero when simulation failed before a footprint was assigned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resources {
    /// Total fee the envelope offers (inclusion + resource)
    pub fee: u64,
    /// Declared resource fee
    pub refundable_fee: u64,
    pub cpu_instructions: u32,
    pub read_bytes: u32,
    pub write_bytes: u32,
    pub read_only_entries: u32,
    pub read_write_entries: u32,
}

impl Resources {
    pub fn from_envelope(envelope: &TransactionEnvelope) -> Result<Self, TxError> {
        let tx = inner_transaction(envelope)?;

        let data = match &tx.ext {
            TransactionExt::V1(data) => data,
            TransactionExt::V0 => {
                return Err(TxError::malformed(
                    "transaction has no soroban resource extension",
                ))
            }
        };

        let refundable_fee = u64::try_from(data.resource_fee).map_err(|_| {
            TxError::malformed(format!("negative resource fee {}", data.resource_fee))
        })?;
        let resources = &data.resources;
        let footprint = &resources.footprint;

        Ok(Self {
            fee: u64::from(tx.fee),
            refundable_fee,
            cpu_instructions: resources.instructions,
            read_bytes: resources.read_bytes,
            write_bytes: resources.write_bytes,
            read_only_entries: footprint.read_only.len() as u32,
            read_write_entries: footprint.read_write.len() as u32,
        })
    }

    /// Same as [`Resources::from_envelope`], from the base64 wire encoding
    pub fn from_xdr_base64(envelope: &str) -> Result<Self, TxError> {
        let envelope = TransactionEnvelope::from_xdr_base64(envelope, Limits::none())
            .map_err(|e| TxError::malformed(format!("transaction envelope: {}", e)))?;
        Self::from_envelope(&envelope)
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

/// The v1 transaction carried by an envelope, unwrapping fee bumps
pub(crate) fn inner_transaction(envelope: &TransactionEnvelope) -> Result<&Transaction, TxError> {
    match envelope {
        TransactionEnvelope::Tx(v1) => Ok(&v1.tx),
        TransactionEnvelope::TxFeeBump(bump) => match &bump.tx.inner_tx {
            FeeBumpTransactionInnerTx::Tx(v1) => Ok(&v1.tx),
        },
        TransactionEnvelope::TxV0(_) => Err(TxError::malformed(
            "v0 envelopes cannot carry soroban resources",
        )),
    }
}
