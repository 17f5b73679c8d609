//! Convenience helpers on top of [`ChainClient`] and the Alloy provider.
use std::str::FromStr;

use alloy::primitives::{Address, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::Signer;
use anyhow::{Context, Result};
use url::Url;

use super::client::ChainClient;

/// Alloy provider that signs with `private_key` for `chain_id`, plus the signer's address.
pub fn wallet_provider(
    rpc_url: &str,
    private_key: &str,
    chain_id: u64,
) -> Result<(impl Provider + Clone, Address)> {
    let url = Url::parse(rpc_url).with_context(|| format!("Failed to parse RPC url: {rpc_url}"))?;
    let signer = PrivateKeySigner::from_str(private_key)
        .context("DFK_PK did not contain a valid hex encoded secret")?
        .with_chain_id(Some(chain_id));
    let address = signer.address();
    let provider = ProviderBuilder::new()
        .with_chain_id(chain_id)
        .wallet(signer)
        .connect_http(url);
    Ok((provider, address))
}

/// Read-only provider for commands that never sign.
pub fn read_provider(rpc_url: &str) -> Result<impl Provider + Clone> {
    let url = Url::parse(rpc_url).with_context(|| format!("Failed to parse RPC url: {rpc_url}"))?;
    Ok(ProviderBuilder::new().connect_http(url))
}

pub async fn get_balance(client: &ChainClient, address: Address) -> Result<U256> {
    client.get_balance_at(address, "latest").await
}

/// Render a wei amount with 18 decimals and a unit suffix, trailing zeros trimmed.
pub fn format_native(wei: U256, symbol: &str) -> String {
    let unit = U256::from(1_000_000_000_000_000_000u128);
    let whole = wei / unit;
    let frac = wei % unit;

    if frac.is_zero() {
        format!("{whole} {symbol}")
    } else {
        let mut frac_str = format!("{:018}", frac);
        while frac_str.ends_with('0') {
            frac_str.pop();
        }
        format!("{whole}.{frac_str} {symbol}")
    }
}

/// Pay 10% over the node's suggested gas price.
pub fn bump_gas_price(gas_price: u128) -> u128 {
    gas_price * 110 / 100
}
