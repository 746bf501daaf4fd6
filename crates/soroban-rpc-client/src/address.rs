//! Strkey address conversion and ledger key construction

use stellar_strkey::Strkey;
use stellar_xdr::curr::{
    AccountId, ContractDataDurability, Hash, LedgerKey, LedgerKeyAccount, LedgerKeyContractData,
    PublicKey, ScAddress, ScVal, Uint256,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AddressError {
    #[error("Invalid strkey {address}: {reason}")]
    Invalid { address: String, reason: String },

    #[error("Expected an account address, got {address}")]
    NotAnAccount { address: String },
}

/// Decode a G... strkey into an XDR account id
pub fn account_id(address: &str) -> Result<AccountId, AddressError> {
    match parse(address)? {
        Strkey::PublicKeyEd25519(pk) => Ok(AccountId(PublicKey::PublicKeyTypeEd25519(Uint256(
            pk.0,
        )))),
        _ => Err(AddressError::NotAnAccount {
            address: address.to_string(),
        }),
    }
}

/// Raw ed25519 public key bytes of a G... strkey
pub fn account_key_bytes(address: &str) -> Result<[u8; 32], AddressError> {
    let AccountId(PublicKey::PublicKeyTypeEd25519(Uint256(bytes))) = account_id(address)?;
    Ok(bytes)
}

/// Decode a G... or C... strkey into an `ScAddress`
pub fn sc_address(address: &str) -> Result<ScAddress, AddressError> {
    match parse(address)? {
        Strkey::PublicKeyEd25519(pk) => Ok(ScAddress::Account(AccountId(
            PublicKey::PublicKeyTypeEd25519(Uint256(pk.0)),
        ))),
        Strkey::Contract(contract) => Ok(ScAddress::Contract(Hash(contract.0))),
        other => Err(AddressError::Invalid {
            address: address.to_string(),
            reason: format!("unsupported strkey kind {:?}", other),
        }),
    }
}

/// Encode an `ScAddress` back to its strkey form
pub fn sc_address_to_string(address: &ScAddress) -> String {
    match address {
        ScAddress::Account(AccountId(PublicKey::PublicKeyTypeEd25519(Uint256(bytes)))) => {
            stellar_strkey::ed25519::PublicKey(*bytes).to_string()
        }
        ScAddress::Contract(Hash(bytes)) => stellar_strkey::Contract(*bytes).to_string(),
    }
}

/// Ledger key for an account entry
pub fn account_ledger_key(address: &str) -> Result<LedgerKey, AddressError> {
    Ok(LedgerKey::Account(LedgerKeyAccount {
        account_id: account_id(address)?,
    }))
}

/// Ledger key for a persistent contract data entry
pub fn contract_data_key(contract: &str, key: ScVal) -> Result<LedgerKey, AddressError> {
    Ok(LedgerKey::ContractData(LedgerKeyContractData {
        contract: sc_address(contract)?,
        key,
        durability: ContractDataDurability::Persistent,
    }))
}

/// Ledger key for a contract's instance entry
pub fn contract_instance_key(contract: &str) -> Result<LedgerKey, AddressError> {
    contract_data_key(contract, ScVal::LedgerKeyContractInstance)
}

fn parse(address: &str) -> Result<Strkey, AddressError> {
    Strkey::from_string(address).map_err(|e| AddressError::Invalid {
        address: address.to_string(),
        reason: format!("{:?}", e),
    })
}
