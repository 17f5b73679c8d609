//! USD prices from the DexScreener token endpoint.

use anyhow::{bail, Result};
use serde::Deserialize;

use crate::libs::lookup::save_log_to_file;

pub const DEXSCREENER_API_URL: &str = "https://api.dexscreener.com";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairToken {
    pub address: Option<String>,
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DexPair {
    pub chain_id: Option<String>,
    pub dex_id: Option<String>,
    pub pair_address: Option<String>,
    pub base_token: Option<PairToken>,
    pub quote_token: Option<PairToken>,
    pub price_usd: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokensResponse {
    #[serde(default)]
    pairs: Option<Vec<DexPair>>,
}

/// `priceUsd` of the first listed pair, if it is a finite number.
pub fn first_pair_price(pairs: &[DexPair]) -> Option<f64> {
    pairs
        .first()?
        .price_usd
        .as_deref()?
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite())
}

#[derive(Clone, Debug)]
pub struct DexScreener {
    http: reqwest::Client,
    base_url: String,
}

impl Default for DexScreener {
    fn default() -> Self {
        Self::new(DEXSCREENER_API_URL)
    }
}

impl DexScreener {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// `token` may also be a comma separated list of addresses.
    pub async fn token_pairs(&self, token: &str) -> Result<Vec<DexPair>> {
        let url = format!("{}/latest/dex/tokens/{}", self.base_url, token.trim());
        let res = self.http.get(&url).send().await?;
        let status = res.status();
        if !status.is_success() {
            bail!("dexscreener returned {status} for {url}");
        }
        let body: TokensResponse = res.json().await?;
        Ok(body.pairs.unwrap_or_default())
    }

    /// Price in USD, or `None` on any failure along the way.
    pub async fn get_token_price(&self, token: &str) -> Option<f64> {
        match self.token_pairs(token).await {
            Ok(pairs) => first_pair_price(&pairs),
            Err(e) => {
                save_log_to_file(&format!("[price] {token}: {e:#}"));
                None
            }
        }
    }
}

pub async fn get_token_price_with_dexscreener(token_address: &str) -> Option<f64> {
    DexScreener::default().get_token_price(token_address).await
}
