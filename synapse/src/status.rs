use std::time::Duration;

use alloy::primitives::{hex, B256};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::addresses::SYNAPSE_EXPLORER_URL;
use crate::error::SynapseError;

const BRIDGE_TRANSACTIONS_QUERY: &str = r#"
{
  bridgeTransactions(
    txnHash: "__TXN_HASH__"
    useMv: true
  ) {
    fromInfo {
      chainID
      destinationChainID
      address
      txnHash
      USDValue
      tokenSymbol
      blockNumber
      formattedTime
    }
    kappa
    swapSuccess
    toInfo {
      chainID
      destinationChainID
      address
      txnHash
      value
      formattedValue
      USDValue
      tokenAddress
      tokenSymbol
      blockNumber
      time
      formattedTime
      formattedEventType
      eventType
    }
  }
}
"#;

pub fn bridge_transactions_query(tx_hash: B256) -> String {
    BRIDGE_TRANSACTIONS_QUERY.replace("__TXN_HASH__", &hex::encode_prefixed(tx_hash))
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FromInfo {
    #[serde(rename = "chainID")]
    pub chain_id: Option<u64>,
    #[serde(rename = "destinationChainID")]
    pub destination_chain_id: Option<u64>,
    pub address: Option<String>,
    pub txn_hash: Option<String>,
    #[serde(rename = "USDValue")]
    pub usd_value: Option<f64>,
    pub token_symbol: Option<String>,
    pub block_number: Option<u64>,
    pub formatted_time: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToInfo {
    #[serde(rename = "chainID")]
    pub chain_id: Option<u64>,
    #[serde(rename = "destinationChainID")]
    pub destination_chain_id: Option<u64>,
    pub address: Option<String>,
    pub txn_hash: Option<String>,
    pub value: Option<Value>,
    pub formatted_value: Option<f64>,
    #[serde(rename = "USDValue")]
    pub usd_value: Option<f64>,
    pub token_address: Option<String>,
    pub token_symbol: Option<String>,
    pub block_number: Option<u64>,
    pub time: Option<u64>,
    pub formatted_time: Option<String>,
    pub formatted_event_type: Option<String>,
    pub event_type: Option<u64>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeTransaction {
    pub from_info: Option<FromInfo>,
    pub kappa: Option<String>,
    pub swap_success: Option<bool>,
    pub to_info: Option<ToInfo>,
}

impl BridgeTransaction {
    /// The destination leg has been observed.
    pub fn is_complete(&self) -> bool {
        self.to_info.is_some()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BridgeTransactionsData {
    #[serde(default)]
    bridge_transactions: Vec<BridgeTransaction>,
}

/// Typed view over the raw GraphQL payload.
pub fn parse_bridge_transactions(payload: &Value) -> Result<Vec<BridgeTransaction>, SynapseError> {
    if let Some(errors) = payload.get("errors").and_then(Value::as_array) {
        if !errors.is_empty() {
            let msg = errors
                .iter()
                .map(|e| e.get("message").and_then(Value::as_str).unwrap_or("unknown").to_string())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(SynapseError::GraphQl(msg));
        }
    }
    match payload.get("data") {
        Some(data) if !data.is_null() => {
            let data: BridgeTransactionsData = serde_json::from_value(data.clone())?;
            Ok(data.bridge_transactions)
        }
        _ => Ok(Vec::new()),
    }
}

/// Client for the Synapse explorer GraphQL endpoint.
#[derive(Clone, Debug)]
pub struct ExplorerClient {
    http: reqwest::Client,
    url: String,
}

impl Default for ExplorerClient {
    fn default() -> Self {
        Self::new(SYNAPSE_EXPLORER_URL)
    }
}

impl ExplorerClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self { http: reqwest::Client::new(), url: url.into() }
    }

    /// POST the bridgeTransactions query and return the response body untouched.
    pub async fn bridge_status_raw(&self, tx_hash: B256) -> Result<Value, SynapseError> {
        let res = self
            .http
            .post(&self.url)
            .json(&json!({ "query": bridge_transactions_query(tx_hash) }))
            .send()
            .await?;
        let status = res.status();
        let body = res.text().await?;
        if !status.is_success() {
            return Err(SynapseError::Status { status: status.as_u16(), body });
        }
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn bridge_status(&self, tx_hash: B256) -> Result<Vec<BridgeTransaction>, SynapseError> {
        let raw = self.bridge_status_raw(tx_hash).await?;
        parse_bridge_transactions(&raw)
    }

    /// Re-query every `interval` until a transaction with a destination leg
    /// shows up, at most `attempts` times. Returns the last seen record.
    pub async fn wait_for_completion(
        &self,
        tx_hash: B256,
        interval: Duration,
        attempts: u32,
    ) -> Result<Option<BridgeTransaction>, SynapseError> {
        let mut last = None;
        for attempt in 0..attempts.max(1) {
            if attempt > 0 {
                tokio::time::sleep(interval).await;
            }
            let txs = self.bridge_status(tx_hash).await?;
            if let Some(done) = txs.iter().find(|t| t.is_complete()) {
                return Ok(Some(done.clone()));
            }
            last = txs.into_iter().next().or(last);
        }
        Ok(last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::serve_once;

    const HASH: &str = "0xcbfb18e58c23a2a0ced07f97b83c1179feceb29acf769d2092a59f229a899d13";

    fn payload(with_to: bool) -> Value {
        let to_info = if with_to {
            json!({
                "chainID": 53935,
                "destinationChainID": null,
                "address": "0x23eD50dB3e7469695DD30FFD22a7B42716A338FC",
                "txnHash": "0xe3b30b60ec880a9576dbf43efee9a64a40c814e947401e22681baba9a3800e35",
                "value": "1990000000000000000",
                "formattedValue": 1.99,
                "USDValue": 0.31,
                "tokenAddress": "0x0000000000000000000000000000000000000000",
                "tokenSymbol": "JEWEL",
                "blockNumber": 31000000,
                "time": 1700001000,
                "formattedTime": "2023-11-14 22:30:00",
                "formattedEventType": "Withdraw",
                "eventType": 1
            })
        } else {
            Value::Null
        };
        json!({
            "data": {
                "bridgeTransactions": [{
                    "fromInfo": {
                        "chainID": 8217,
                        "destinationChainID": 53935,
                        "address": "0x23eD50dB3e7469695DD30FFD22a7B42716A338FC",
                        "txnHash": HASH,
                        "USDValue": 0.32,
                        "tokenSymbol": "JEWEL",
                        "blockNumber": 140000000,
                        "formattedTime": "2023-11-14 22:28:00"
                    },
                    "kappa": "0xabc",
                    "swapSuccess": true,
                    "toInfo": to_info
                }]
            }
        })
    }

    #[test]
    fn query_embeds_hash() {
        let q = bridge_transactions_query(HASH.parse().unwrap());
        assert!(q.contains(&format!("txnHash: \"{HASH}\"")));
        assert!(q.contains("useMv: true"));
        assert!(!q.contains("__TXN_HASH__"));
    }

    #[test]
    fn parses_complete_and_pending_legs() {
        let done = parse_bridge_transactions(&payload(true)).unwrap();
        assert_eq!(done.len(), 1);
        assert!(done[0].is_complete());
        let from = done[0].from_info.as_ref().unwrap();
        assert_eq!(from.chain_id, Some(8217));
        assert_eq!(from.destination_chain_id, Some(53935));
        let to = done[0].to_info.as_ref().unwrap();
        assert_eq!(to.formatted_event_type.as_deref(), Some("Withdraw"));
        assert_eq!(done[0].swap_success, Some(true));

        let pending = parse_bridge_transactions(&payload(false)).unwrap();
        assert!(!pending[0].is_complete());
    }

    #[test]
    fn graphql_errors_are_reported() {
        let err = parse_bridge_transactions(&json!({
            "data": null,
            "errors": [{ "message": "bad txnHash" }, { "message": "second" }]
        }))
        .unwrap_err();
        assert!(matches!(err, SynapseError::GraphQl(ref m) if m == "bad txnHash; second"));
    }

    #[test]
    fn missing_data_is_empty() {
        assert!(parse_bridge_transactions(&json!({ "data": null })).unwrap().is_empty());
    }

    #[tokio::test]
    async fn posts_query_and_returns_raw_body() {
        let body = payload(true).to_string();
        let (base, server) = serve_once(200, &body).await;

        let client = ExplorerClient::new(format!("{base}/graphql"));
        let raw = client.bridge_status_raw(HASH.parse().unwrap()).await.unwrap();
        assert_eq!(raw, payload(true));

        let seen = server.await.unwrap();
        assert!(seen.starts_with("POST /graphql"));
        assert!(seen.contains("bridgeTransactions"));
        assert!(seen.contains(HASH));
    }

    #[tokio::test]
    async fn wait_returns_first_complete_record() {
        let (base, _server) = serve_once(200, &payload(true).to_string()).await;
        let client = ExplorerClient::new(base);
        let tx = client
            .wait_for_completion(HASH.parse().unwrap(), Duration::from_millis(1), 3)
            .await
            .unwrap()
            .unwrap();
        assert!(tx.is_complete());
        assert_eq!(tx.kappa.as_deref(), Some("0xabc"));
    }
}
