//! Contract storage decoding
//!
//! Converts raw contract-data ledger entries into typed reserve records.
//! Unknown keys and missing fields are `MalformedInput` errors, never panics.

use blend_core::ProtocolError;
use stellar_xdr::curr::{
    ContractDataEntry, LedgerEntryData, Limits, ReadXdr, ScMapEntry, ScVal,
};

use crate::constants::keys;
use crate::state::{
    ReserveConfig, ReserveData, ReserveEmissionConfig, ReserveEmissionData, TokenMetadata,
};

/// Decode a base64 `LedgerEntryData` that must be contract data
pub fn contract_data_entry(xdr: &str) -> Result<ContractDataEntry, ProtocolError> {
    let data = LedgerEntryData::from_xdr_base64(xdr, Limits::none())
        .map_err(|e| ProtocolError::malformed(format!("ledger entry: {}", e)))?;
    match data {
        LedgerEntryData::ContractData(entry) => Ok(entry),
        other => Err(ProtocolError::malformed(format!(
            "expected contract data, got {}",
            other.name()
        ))),
    }
}

/// Name of a storage key: the symbol itself, or the leading symbol of a
/// vector key such as `[ResConfig, <asset>]`
pub fn entry_key_name(key: &ScVal) -> Result<String, ProtocolError> {
    match key {
        ScVal::Symbol(_) => symbol(key),
        ScVal::Vec(Some(items)) => match items.0.first() {
            Some(first) => symbol(first),
            None => Err(ProtocolError::malformed("empty vector storage key")),
        },
        ScVal::LedgerKeyContractInstance => Ok(keys::CONTRACT_INSTANCE.to_string()),
        other => Err(ProtocolError::malformed(format!(
            "unsupported storage key {}",
            other.name()
        ))),
    }
}

/// Trailing `u32` of a vector key such as `[EmisData, 5]`
pub fn entry_key_index(key: &ScVal) -> Result<u32, ProtocolError> {
    match key {
        ScVal::Vec(Some(items)) if items.0.len() == 2 => u32_val(&items.0[1], "storage key index"),
        _ => Err(ProtocolError::malformed("storage key has no index")),
    }
}

pub fn reserve_config(val: &ScVal) -> Result<ReserveConfig, ProtocolError> {
    const NAME: &str = "ReserveConfig";
    let mut index = None;
    let mut decimals = None;
    let mut c_factor = None;
    let mut l_factor = None;
    let mut util = None;
    let mut max_util = None;
    let mut r_one = None;
    let mut r_two = None;
    let mut r_three = None;
    let mut reactivity = None;

    for entry in map_entries(val, NAME)? {
        let key = symbol(&entry.key)?;
        let field = Some(u32_val(&entry.val, &key)?);
        match key.as_str() {
            "index" => index = field,
            "decimals" => decimals = field,
            "c_factor" => c_factor = field,
            "l_factor" => l_factor = field,
            "util" => util = field,
            "max_util" => max_util = field,
            "r_one" => r_one = field,
            "r_two" => r_two = field,
            "r_three" => r_three = field,
            "reactivity" => reactivity = field,
            _ => return Err(invalid_key(NAME, &key)),
        }
    }

    Ok(ReserveConfig {
        index: required(index, NAME, "index")?,
        decimals: required(decimals, NAME, "decimals")?,
        c_factor: required(c_factor, NAME, "c_factor")?,
        l_factor: required(l_factor, NAME, "l_factor")?,
        util: required(util, NAME, "util")?,
        max_util: required(max_util, NAME, "max_util")?,
        r_one: required(r_one, NAME, "r_one")?,
        r_two: required(r_two, NAME, "r_two")?,
        r_three: required(r_three, NAME, "r_three")?,
        reactivity: required(reactivity, NAME, "reactivity")?,
    })
}

pub fn reserve_data(val: &ScVal) -> Result<ReserveData, ProtocolError> {
    const NAME: &str = "ReserveData";
    let mut d_rate = None;
    let mut b_rate = None;
    let mut ir_mod = None;
    let mut b_supply = None;
    let mut d_supply = None;
    let mut backstop_credit = None;
    let mut last_time = None;

    for entry in map_entries(val, NAME)? {
        let key = symbol(&entry.key)?;
        match key.as_str() {
            "d_rate" => d_rate = Some(i128_val(&entry.val, &key)?),
            "b_rate" => b_rate = Some(i128_val(&entry.val, &key)?),
            "ir_mod" => ir_mod = Some(i128_val(&entry.val, &key)?),
            "b_supply" => b_supply = Some(i128_val(&entry.val, &key)?),
            "d_supply" => d_supply = Some(i128_val(&entry.val, &key)?),
            "backstop_credit" => backstop_credit = Some(i128_val(&entry.val, &key)?),
            "last_time" => last_time = Some(u64_val(&entry.val, &key)?),
            _ => return Err(invalid_key(NAME, &key)),
        }
    }

    Ok(ReserveData {
        d_rate: required(d_rate, NAME, "d_rate")?,
        b_rate: required(b_rate, NAME, "b_rate")?,
        ir_mod: required(ir_mod, NAME, "ir_mod")?,
        b_supply: required(b_supply, NAME, "b_supply")?,
        d_supply: required(d_supply, NAME, "d_supply")?,
        backstop_credit: required(backstop_credit, NAME, "backstop_credit")?,
        last_time: required(last_time, NAME, "last_time")?,
    })
}

pub fn emission_config(val: &ScVal) -> Result<ReserveEmissionConfig, ProtocolError> {
    const NAME: &str = "ReserveEmissionConfig";
    let mut eps = None;
    let mut expiration = None;

    for entry in map_entries(val, NAME)? {
        let key = symbol(&entry.key)?;
        match key.as_str() {
            "eps" => eps = Some(u64_val(&entry.val, &key)?),
            "expiration" => expiration = Some(u64_val(&entry.val, &key)?),
            _ => return Err(invalid_key(NAME, &key)),
        }
    }

    Ok(ReserveEmissionConfig {
        eps: required(eps, NAME, "eps")?,
        expiration: required(expiration, NAME, "expiration")?,
    })
}

pub fn emission_data(val: &ScVal) -> Result<ReserveEmissionData, ProtocolError> {
    const NAME: &str = "ReserveEmissionData";
    let mut index = None;
    let mut last_time = None;

    for entry in map_entries(val, NAME)? {
        let key = symbol(&entry.key)?;
        match key.as_str() {
            "index" => index = Some(i128_val(&entry.val, &key)?),
            "last_time" => last_time = Some(u64_val(&entry.val, &key)?),
            _ => return Err(invalid_key(NAME, &key)),
        }
    }

    Ok(ReserveEmissionData {
        index: required(index, NAME, "index")?,
        last_time: required(last_time, NAME, "last_time")?,
    })
}

/// Token metadata from a token contract's instance entry. `Ok(None)` when the
/// instance carries no `METADATA` entry.
pub fn token_metadata(val: &ScVal) -> Result<Option<TokenMetadata>, ProtocolError> {
    const NAME: &str = "TokenMetadata";
    let storage = match val {
        ScVal::ContractInstance(instance) => instance.storage.as_ref(),
        other => {
            return Err(ProtocolError::malformed(format!(
                "expected a contract instance, got {}",
                other.name()
            )))
        }
    };

    let metadata = storage.and_then(|map| {
        map.0
            .iter()
            .find(|entry| matches!(symbol(&entry.key).as_deref(), Ok(keys::METADATA)))
    });
    let Some(metadata) = metadata else {
        return Ok(None);
    };

    let mut name = None;
    let mut symbol_name = None;
    let mut decimals = None;
    for entry in map_entries(&metadata.val, NAME)? {
        let key = symbol(&entry.key)?;
        match key.as_str() {
            "name" => name = Some(string_val(&entry.val, &key)?),
            "symbol" => symbol_name = Some(string_val(&entry.val, &key)?),
            "decimal" => decimals = Some(u32_val(&entry.val, &key)?),
            _ => return Err(invalid_key(NAME, &key)),
        }
    }

    Ok(Some(TokenMetadata {
        name: required(name, NAME, "name")?,
        symbol: required(symbol_name, NAME, "symbol")?,
        decimals: required(decimals, NAME, "decimal")?,
    }))
}

/// A token balance entry: a bare `i128`, or a map carrying `amount`
pub fn token_balance(val: &ScVal) -> Result<i128, ProtocolError> {
    match val {
        ScVal::I128(_) => i128_val(val, "balance"),
        ScVal::Map(_) => {
            for entry in map_entries(val, "Balance")? {
                if symbol(&entry.key)? == "amount" {
                    return i128_val(&entry.val, "amount");
                }
            }
            Err(ProtocolError::malformed("balance map missing amount"))
        }
        other => Err(ProtocolError::malformed(format!(
            "unexpected balance value {}",
            other.name()
        ))),
    }
}

fn map_entries<'a>(val: &'a ScVal, name: &str) -> Result<&'a [ScMapEntry], ProtocolError> {
    match val {
        ScVal::Map(Some(map)) => Ok(map.0.as_slice()),
        _ => Err(ProtocolError::malformed(format!(
            "{} contract data value is not a map",
            name
        ))),
    }
}

fn symbol(val: &ScVal) -> Result<String, ProtocolError> {
    match val {
        ScVal::Symbol(sym) => std::str::from_utf8(sym.0.as_slice())
            .map(str::to_string)
            .map_err(|_| ProtocolError::malformed("non-utf8 symbol")),
        other => Err(ProtocolError::malformed(format!(
            "expected a symbol, got {}",
            other.name()
        ))),
    }
}

fn u32_val(val: &ScVal, field: &str) -> Result<u32, ProtocolError> {
    match val {
        ScVal::U32(v) => Ok(*v),
        other => Err(wrong_type(field, "u32", other)),
    }
}

fn u64_val(val: &ScVal, field: &str) -> Result<u64, ProtocolError> {
    match val {
        ScVal::U64(v) => Ok(*v),
        other => Err(wrong_type(field, "u64", other)),
    }
}

fn i128_val(val: &ScVal, field: &str) -> Result<i128, ProtocolError> {
    match val {
        ScVal::I128(parts) => Ok(((parts.hi as i128) << 64) | parts.lo as i128),
        other => Err(wrong_type(field, "i128", other)),
    }
}

fn string_val(val: &ScVal, field: &str) -> Result<String, ProtocolError> {
    let bytes = match val {
        ScVal::String(s) => s.0.as_slice(),
        ScVal::Symbol(s) => s.0.as_slice(),
        other => return Err(wrong_type(field, "string", other)),
    };
    Ok(String::from_utf8_lossy(bytes).into_owned())
}

fn wrong_type(field: &str, expected: &str, got: &ScVal) -> ProtocolError {
    ProtocolError::malformed(format!(
        "field {} should be {}, got {}",
        field,
        expected,
        got.name()
    ))
}

fn invalid_key(name: &str, key: &str) -> ProtocolError {
    ProtocolError::malformed(format!("Invalid {} key should not contain {}", name, key))
}

fn required<T>(value: Option<T>, name: &str, field: &str) -> Result<T, ProtocolError> {
    value.ok_or_else(|| ProtocolError::malformed(format!("{} map missing {}", name, field)))
}

#[cfg(test)]
pub(crate) mod encode {
    //! Builders for storage values, mirroring what the pool contract writes

    use stellar_xdr::curr::{Int128Parts, ScMap, ScString, ScSymbol, ScVec};

    use super::*;

    pub fn sym(name: &str) -> ScVal {
        ScVal::Symbol(ScSymbol(name.try_into().unwrap()))
    }

    pub fn int128(v: i128) -> ScVal {
        ScVal::I128(Int128Parts {
            hi: (v >> 64) as i64,
            lo: v as u64,
        })
    }

    pub fn string(s: &str) -> ScVal {
        ScVal::String(ScString(s.try_into().unwrap()))
    }

    pub fn vec(items: Vec<ScVal>) -> ScVal {
        ScVal::Vec(Some(ScVec(items.try_into().unwrap())))
    }

    pub fn map(fields: Vec<(&str, ScVal)>) -> ScVal {
        let entries: Vec<ScMapEntry> = fields
            .into_iter()
            .map(|(k, v)| ScMapEntry { key: sym(k), val: v })
            .collect();
        ScVal::Map(Some(ScMap(entries.try_into().unwrap())))
    }

    pub fn reserve_config(c: &ReserveConfig) -> ScVal {
        map(vec![
            ("c_factor", ScVal::U32(c.c_factor)),
            ("decimals", ScVal::U32(c.decimals)),
            ("index", ScVal::U32(c.index)),
            ("l_factor", ScVal::U32(c.l_factor)),
            ("max_util", ScVal::U32(c.max_util)),
            ("r_one", ScVal::U32(c.r_one)),
            ("r_three", ScVal::U32(c.r_three)),
            ("r_two", ScVal::U32(c.r_two)),
            ("reactivity", ScVal::U32(c.reactivity)),
            ("util", ScVal::U32(c.util)),
        ])
    }

    pub fn reserve_data(d: &ReserveData) -> ScVal {
        map(vec![
            ("b_rate", int128(d.b_rate)),
            ("b_supply", int128(d.b_supply)),
            ("backstop_credit", int128(d.backstop_credit)),
            ("d_rate", int128(d.d_rate)),
            ("d_supply", int128(d.d_supply)),
            ("ir_mod", int128(d.ir_mod)),
            ("last_time", ScVal::U64(d.last_time)),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::encode::{self, int128, map, sym, vec};
    use super::*;
    use crate::state::samples;

    #[test]
    fn test_reserve_config_decodes() {
        let config = samples::config();
        assert_eq!(reserve_config(&encode::reserve_config(&config)).unwrap(), config);
    }

    #[test]
    fn test_reserve_data_decodes() {
        let mut data = samples::data();
        data.backstop_credit = -5;
        data.d_supply = i128::from(u64::MAX) * 3;
        assert_eq!(reserve_data(&encode::reserve_data(&data)).unwrap(), data);
    }

    #[test]
    fn test_unknown_key_is_malformed() {
        let val = map(vec![("eps", ScVal::U64(1)), ("bogus", ScVal::U64(2))]);
        let err = emission_config(&val).unwrap_err();
        assert_eq!(err.error_code(), "malformed_input");
        assert!(err.to_string().contains("bogus"));
    }

    #[test]
    fn test_missing_field_is_malformed() {
        let val = map(vec![("index", int128(7))]);
        let err = emission_data(&val).unwrap_err();
        assert!(err.to_string().contains("missing last_time"));
    }

    #[test]
    fn test_non_map_is_malformed() {
        let err = reserve_data(&ScVal::U32(1)).unwrap_err();
        assert!(err.to_string().contains("not a map"));
    }

    #[test]
    fn test_wrong_field_type() {
        let val = map(vec![("eps", int128(1)), ("expiration", ScVal::U64(2))]);
        let err = emission_config(&val).unwrap_err();
        assert!(err.to_string().contains("should be u64"));
    }

    #[test]
    fn test_entry_key_names() {
        assert_eq!(entry_key_name(&sym("ResConfig")).unwrap(), "ResConfig");
        let key = vec(vec![sym("EmisData"), ScVal::U32(5)]);
        assert_eq!(entry_key_name(&key).unwrap(), "EmisData");
        assert_eq!(entry_key_index(&key).unwrap(), 5);
        assert_eq!(
            entry_key_name(&ScVal::LedgerKeyContractInstance).unwrap(),
            "ContractInstance"
        );
        assert!(entry_key_name(&ScVal::U32(1)).is_err());
    }

    #[test]
    fn test_token_balance_shapes() {
        assert_eq!(token_balance(&int128(42)).unwrap(), 42);
        let sac = map(vec![
            ("amount", int128(1_000)),
            ("authorized", ScVal::Bool(true)),
            ("clawback", ScVal::Bool(false)),
        ]);
        assert_eq!(token_balance(&sac).unwrap(), 1_000);
        assert!(token_balance(&ScVal::Bool(true)).is_err());
    }
}
