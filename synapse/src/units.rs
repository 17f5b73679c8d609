use std::str::FromStr;

use alloy::primitives::U256;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::SynapseError;

pub fn format_units(amount: U256, decimals: u8) -> String {
    if amount.is_zero() { return "0".into(); }
    let scale = U256::from(10u64).pow(U256::from(decimals));
    let whole = amount / scale;
    let frac = amount % scale;
    if frac.is_zero() {
        format!("{whole}")
    } else {
        let mut frac_str = format!("{:0width$}", frac, width = decimals as usize);
        while frac_str.ends_with('0') { frac_str.pop(); }
        format!("{whole}.{frac_str}")
    }
}

/// "2" with 18 decimals -> 2e18 base units.
pub fn parse_units(amount: &str, decimals: u8) -> Result<U256, SynapseError> {
    alloy::primitives::utils::parse_units(amount.trim(), decimals)
        .map(Into::into)
        .map_err(|e| SynapseError::Amount(format!("`{amount}`: {e}")))
}

/// Parse the amount shapes the Synapse API emits: decimal or 0x-hex strings,
/// plain numbers, and ethers' `{ "type": "BigNumber", "hex": "0x.." }` objects.
pub fn u256_from_json(v: &Value) -> Option<U256> {
    match v {
        Value::String(s) => U256::from_str(s.trim()).ok(),
        Value::Number(n) => n.as_u64().map(U256::from),
        Value::Object(map) => map.get("hex").and_then(u256_from_json),
        _ => None,
    }
}

pub fn de_u256<'de, D>(deserializer: D) -> Result<U256, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    u256_from_json(&v).ok_or_else(|| serde::de::Error::custom(format!("not a big number: {v}")))
}
