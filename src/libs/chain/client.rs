//! [`ChainClient`] speaks plain JSON-RPC over `reqwest` to one EVM node.
//! Alloy is only used for types and key handling here; contract calls go
//! through the Alloy provider instead.
use crate::libs::lookup::save_log_to_file;
use serde_json::Value;
use url::Url;

use alloy::primitives::{Address, B256, U256};
use alloy::signers::local::PrivateKeySigner;
use anyhow::{Context, Result};
use reqwest::Client as HttpClient;

/// A JSON-RPC client bound to one node, plus the account derived from the
/// configured private key.
#[derive(Clone, Debug)]
pub struct ChainClient {
    rpc_url: Url,
    http: HttpClient,
    pub address: Address,
}

/// Decode a JSON-RPC quantity ("0x0", "0x1a", "0XDEAD…") into a `U256`.
/// Odd-length hex is left-padded since nodes omit leading zeros.
pub fn parse_quantity(v: &Value) -> Result<U256> {
    let hex_str = v.as_str().context("quantity is not a string")?;
    let mut stripped = hex_str
        .trim()
        .trim_start_matches("0x")
        .trim_start_matches("0X");
    if stripped.is_empty() {
        return Ok(U256::ZERO);
    }

    let padded;
    if stripped.len() % 2 == 1 {
        padded = format!("0{}", stripped);
        stripped = &padded;
    }

    let bytes = hex::decode(stripped).with_context(|| format!("bad quantity hex `{hex_str}`"))?;
    if bytes.len() > 32 {
        anyhow::bail!("quantity `{hex_str}` overflows 256 bits");
    }
    Ok(U256::from_be_slice(&bytes))
}

impl ChainClient {
    pub fn new(rpc_url: &str, private_key: &str) -> Result<Self> {
        let url = Url::parse(rpc_url).with_context(|| format!("Failed to parse RPC url: {rpc_url}"))?;
        let signer: PrivateKeySigner = private_key
            .parse()
            .with_context(|| "DFK_PK did not contain a valid hex encoded secret")?;
        Ok(Self {
            rpc_url: url,
            http: HttpClient::new(),
            address: signer.address(),
        })
    }

    /// `eth_getTransactionCount` at the given block tag, usually "latest".
    pub async fn transaction_count(&self, address: Address, block: &str) -> Result<u64> {
        let res = self
            .rpc("eth_getTransactionCount", serde_json::json!([address, block]))
            .await?;
        let n = parse_quantity(&res).context("bad nonce")?;
        u64::try_from(n).context("nonce does not fit u64")
    }

    pub async fn gas_price(&self) -> Result<u128> {
        let res = self.rpc("eth_gasPrice", serde_json::json!([])).await?;
        let p = parse_quantity(&res).context("bad gas price")?;
        u128::try_from(p).context("gas price does not fit u128")
    }

    pub async fn get_balance_at(&self, address: Address, block: &str) -> Result<U256> {
        let res = self
            .rpc("eth_getBalance", serde_json::json!([address, block]))
            .await?;
        parse_quantity(&res).context("bad balance")
    }

    /// Broadcast an already signed transaction and return its hash.
    pub async fn send_raw_transaction(&self, raw: &[u8]) -> Result<B256> {
        let res = self
            .rpc(
                "eth_sendRawTransaction",
                serde_json::json!([format!("0x{}", hex::encode(raw))]),
            )
            .await?;
        let hash = res.as_str().context("tx hash not string")?;
        hash.parse::<B256>().with_context(|| format!("bad tx hash `{hash}`"))
    }

    async fn rpc(&self, method: &str, params: Value) -> Result<Value> {
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });
        save_log_to_file(&format!("[rpc] -> {method} {params}"));
        let res = self
            .http
            .post(self.rpc_url.as_str())
            .json(&body)
            .send()
            .await?;
        let status = res.status();
        let bytes = res.bytes().await?;
        let v: Value = match serde_json::from_slice(&bytes) {
            Ok(json) => json,
            Err(e) => {
                let mut sample = String::from_utf8_lossy(&bytes).to_string();
                if sample.len() > 512 {
                    sample.truncate(512);
                }
                let hint = if sample.trim_start().starts_with('<') {
                    "Response looks like HTML; the RPC url may point at a gateway page. Ensure it is an HTTPS JSON-RPC endpoint."
                } else if sample.trim().is_empty() {
                    "Empty body from RPC. Endpoint may be down or require authentication."
                } else {
                    "Non-JSON response from RPC."
                };
                return Err(anyhow::anyhow!(
                    "RPC decode error ({status}): {e}. {hint}\nEndpoint: {}\nSample: {}",
                    self.rpc_url,
                    sample
                ));
            }
        };
        if let Some(err) = v.get("error") {
            anyhow::bail!("rpc error from {method}: {}", err);
        }
        Ok(v.get("result").cloned().unwrap_or(Value::Null))
    }
}
