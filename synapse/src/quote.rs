use alloy::primitives::{Address, Bytes, U256};
use serde::Deserialize;
use serde_json::Value;

use crate::abi::ISynapseRouter;
use crate::addresses::{CCTP_MODULE_NAME, SYNAPSE_API_URL};
use crate::error::SynapseError;
use crate::units::{de_u256, format_units};

/// Router-side swap leg of a bridge route, as returned by the quote API.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SwapQuery {
    pub router_adapter: Address,
    pub token_out: Address,
    #[serde(deserialize_with = "de_u256")]
    pub min_amount_out: U256,
    #[serde(deserialize_with = "de_u256")]
    pub deadline: U256,
    pub raw_params: Bytes,
}

impl From<&SwapQuery> for ISynapseRouter::SwapQuery {
    fn from(q: &SwapQuery) -> Self {
        ISynapseRouter::SwapQuery {
            routerAdapter: q.router_adapter,
            tokenOut: q.token_out,
            minAmountOut: q.min_amount_out,
            deadline: q.deadline,
            rawParams: q.raw_params.clone(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeQuote {
    pub router_address: Address,
    #[serde(deserialize_with = "de_u256")]
    pub max_amount_out: U256,
    #[serde(default, deserialize_with = "de_u256")]
    pub fee_amount: U256,
    pub origin_query: SwapQuery,
    pub dest_query: SwapQuery,
    #[serde(default)]
    pub estimated_time: Option<u64>,
    #[serde(default)]
    pub bridge_module_name: String,
}

#[derive(Clone, Debug)]
pub struct QuoteRequest {
    pub origin_chain_id: u64,
    pub dest_chain_id: u64,
    pub token_in: Address,
    pub token_out: Address,
    /// Base units of `token_in`.
    pub amount_in: U256,
    pub token_in_decimals: u8,
    /// Overrides the origin leg deadline when set.
    pub deadline: Option<U256>,
    pub exclude_cctp: bool,
}

impl QuoteRequest {
    fn describe(&self) -> String {
        format!(
            "{} {:?} on {} -> {:?} on {}",
            format_units(self.amount_in, self.token_in_decimals),
            self.token_in,
            self.origin_chain_id,
            self.token_out,
            self.dest_chain_id
        )
    }
}

/// Pick the route paying out the most, skipping CCTP when asked to.
pub fn select_best_quote(quotes: Vec<BridgeQuote>, exclude_cctp: bool) -> Option<BridgeQuote> {
    quotes
        .into_iter()
        .filter(|q| !(exclude_cctp && q.bridge_module_name == CCTP_MODULE_NAME))
        .max_by_key(|q| q.max_amount_out)
}

/// Client for the Synapse REST API.
#[derive(Clone, Debug)]
pub struct SynapseApi {
    http: reqwest::Client,
    base_url: String,
}

impl Default for SynapseApi {
    fn default() -> Self {
        Self::new(SYNAPSE_API_URL)
    }
}

impl SynapseApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Every route the API knows for the request, unfiltered.
    pub async fn bridge_quotes(&self, req: &QuoteRequest) -> Result<Vec<BridgeQuote>, SynapseError> {
        if req.origin_chain_id == req.dest_chain_id {
            return Err(SynapseError::SameChain(req.origin_chain_id));
        }
        let amount = format_units(req.amount_in, req.token_in_decimals);
        let res = self
            .http
            .get(format!("{}/bridge", self.base_url))
            .query(&[
                ("fromChain", req.origin_chain_id.to_string()),
                ("toChain", req.dest_chain_id.to_string()),
                ("fromToken", req.token_in.to_string()),
                ("toToken", req.token_out.to_string()),
                ("amount", amount),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;
        if !status.is_success() {
            return Err(SynapseError::Status { status: status.as_u16(), body });
        }

        let v: Value = serde_json::from_str(&body)?;
        if let Some(err) = v.get("error") {
            let msg = err.as_str().map(str::to_string).unwrap_or_else(|| err.to_string());
            return Err(SynapseError::Api(msg));
        }
        Ok(serde_json::from_value(v)?)
    }

    /// Best route for the request. A requested deadline replaces the origin leg's.
    pub async fn bridge_quote(&self, req: &QuoteRequest) -> Result<BridgeQuote, SynapseError> {
        let quotes = self.bridge_quotes(req).await?;
        let mut best =
            select_best_quote(quotes, req.exclude_cctp).ok_or_else(|| SynapseError::NoQuote(req.describe()))?;
        if let Some(deadline) = req.deadline {
            best.origin_query.deadline = deadline;
        }
        Ok(best)
    }
}
