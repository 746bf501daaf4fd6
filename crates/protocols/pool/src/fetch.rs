//! Reserve loading
//!
//! Reads a reserve's storage entries from the pool contract, its token's
//! instance metadata and the pool's token balance, then decodes them into a
//! [`Reserve`] snapshot. Two ledger round-trips are needed because the
//! emission keys depend on the reserve index stored in the config.

use blend_core::{Address, ProtocolError};
use soroban_rpc_client::{address, AddressError, LedgerAccess};
use stellar_xdr::curr::{LedgerKey, ScSymbol, ScVal, ScVec};

use crate::constants::{self, keys};
use crate::decode;
use crate::state::{Reserve, ReserveEmissions};

/// Load the reserve for `asset_id` from the pool `pool_id`
pub async fn load_reserve<L>(
    ledger: &L,
    pool_id: &str,
    asset_id: &str,
) -> Result<Reserve, ProtocolError>
where
    L: LedgerAccess + ?Sized,
{
    let reserve_keys = vec![
        address::contract_instance_key(asset_id).map_err(invalid_address)?,
        pool_key(pool_id, keys::RESERVE_CONFIG, address_val(asset_id)?)?,
        pool_key(pool_id, keys::RESERVE_DATA, address_val(asset_id)?)?,
    ];
    let response = ledger.get_ledger_entries(&reserve_keys).await?;

    let mut config = None;
    let mut data = None;
    let mut token_metadata = None;
    for entry in &response.entries {
        let contract_data = decode::contract_data_entry(&entry.xdr)?;
        let key = decode::entry_key_name(&contract_data.key)?;
        match key.as_str() {
            keys::RESERVE_CONFIG => config = Some(decode::reserve_config(&contract_data.val)?),
            keys::RESERVE_DATA => data = Some(decode::reserve_data(&contract_data.val)?),
            keys::CONTRACT_INSTANCE => {
                token_metadata = decode::token_metadata(&contract_data.val)?
            }
            _ => {
                return Err(ProtocolError::malformed(format!(
                    "Invalid reserve key: should not contain {}",
                    key
                )))
            }
        }
    }

    let config = config.ok_or_else(|| unavailable(pool_id, asset_id, "config"))?;
    let data = data.ok_or_else(|| unavailable(pool_id, asset_id, "data"))?;
    if token_metadata.is_none() {
        tracing::warn!(asset_id, "token instance carries no metadata");
    }

    let pool_tokens = fetch_token_balance(ledger, asset_id, pool_id).await?;

    let supply_index = constants::supply_emission_index(config.index);
    let borrow_index = constants::borrow_emission_index(config.index);
    let emission_keys = vec![
        pool_key(pool_id, keys::EMISSION_CONFIG, ScVal::U32(supply_index))?,
        pool_key(pool_id, keys::EMISSION_DATA, ScVal::U32(supply_index))?,
        pool_key(pool_id, keys::EMISSION_CONFIG, ScVal::U32(borrow_index))?,
        pool_key(pool_id, keys::EMISSION_DATA, ScVal::U32(borrow_index))?,
    ];
    let response = ledger.get_ledger_entries(&emission_keys).await?;

    let mut supply_emissions = ReserveEmissions::default();
    let mut borrow_emissions = ReserveEmissions::default();
    for entry in &response.entries {
        let contract_data = decode::contract_data_entry(&entry.xdr)?;
        let key = decode::entry_key_name(&contract_data.key)?;
        let index = decode::entry_key_index(&contract_data.key)?;
        let emissions = if index == supply_index {
            &mut supply_emissions
        } else if index == borrow_index {
            &mut borrow_emissions
        } else {
            return Err(ProtocolError::malformed(format!(
                "emission index {} does not belong to reserve {}",
                index, config.index
            )));
        };
        match key.as_str() {
            keys::EMISSION_CONFIG => {
                emissions.config = Some(decode::emission_config(&contract_data.val)?)
            }
            keys::EMISSION_DATA => emissions.data = Some(decode::emission_data(&contract_data.val)?),
            _ => {
                return Err(ProtocolError::malformed(format!(
                    "Invalid reserve emission key: should not contain {}",
                    key
                )))
            }
        }
    }

    tracing::debug!(
        pool_id,
        asset_id,
        index = config.index,
        pool_tokens = %pool_tokens,
        supply_emissions = !supply_emissions.is_empty(),
        borrow_emissions = !borrow_emissions.is_empty(),
        "loaded reserve"
    );

    Ok(Reserve {
        asset_id: Address::new(asset_id),
        token_metadata,
        pool_tokens,
        config,
        data,
        supply_emissions,
        borrow_emissions,
    })
}

/// Balance of `holder` in the token contract `token_id`. A holder without a
/// balance entry holds zero.
pub async fn fetch_token_balance<L>(
    ledger: &L,
    token_id: &str,
    holder: &str,
) -> Result<i128, ProtocolError>
where
    L: LedgerAccess + ?Sized,
{
    let key = pool_key(token_id, keys::BALANCE, address_val(holder)?)?;
    let response = ledger.get_ledger_entries(std::slice::from_ref(&key)).await?;

    match response.entries.first() {
        Some(entry) => {
            let contract_data = decode::contract_data_entry(&entry.xdr)?;
            decode::token_balance(&contract_data.val)
        }
        None => {
            tracing::debug!(token_id, holder, "no balance entry");
            Ok(0)
        }
    }
}

/// Vector storage key `[name, arg]` on `contract`
fn pool_key(contract: &str, name: &str, arg: ScVal) -> Result<LedgerKey, ProtocolError> {
    let symbol = ScSymbol(
        name.try_into()
            .map_err(|_| ProtocolError::malformed(format!("storage key {} too long", name)))?,
    );
    let items = ScVec(
        vec![ScVal::Symbol(symbol), arg]
            .try_into()
            .map_err(|_| ProtocolError::malformed("storage key vector too long"))?,
    );
    address::contract_data_key(contract, ScVal::Vec(Some(items))).map_err(invalid_address)
}

fn address_val(address: &str) -> Result<ScVal, ProtocolError> {
    address::sc_address(address)
        .map(ScVal::Address)
        .map_err(invalid_address)
}

fn invalid_address(err: AddressError) -> ProtocolError {
    let address = match err {
        AddressError::Invalid { address, .. } | AddressError::NotAnAccount { address } => address,
    };
    ProtocolError::InvalidAddress { address }
}

fn unavailable(pool_id: &str, asset_id: &str, what: &str) -> ProtocolError {
    ProtocolError::StateUnavailable {
        reason: format!("reserve {} missing from pool {}: no {}", asset_id, pool_id, what),
    }
}
