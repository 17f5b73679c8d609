use anyhow::{Context, Result};

use alloy::primitives::{Address, U256};
use alloy::providers::Provider;

use crate::log;
use crate::writing::cc;

alloy::sol! {
    #[sol(rpc)]
    interface IERC20 {
        function allowance(address owner, address spender) view returns (uint256);
        function approve(address spender, uint256 value) returns (bool);
        function balanceOf(address owner) view returns (uint256);
        function decimals() view returns (uint8);
        function symbol() view returns (string);
        function name() view returns (string);
    }
}

/// Symbol, name and decimals of a token, read in one go.
#[derive(Clone, Debug)]
pub struct TokenMeta {
    pub address: Address,
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
}

pub async fn token_decimals<P: Provider + Clone>(provider: P, token: Address) -> Result<u8> {
    let erc20 = IERC20::new(token, provider);
    erc20
        .decimals()
        .call()
        .await
        .with_context(|| format!("decimals() failed for {token}"))
}

pub async fn token_symbol<P: Provider + Clone>(provider: P, token: Address) -> Result<String> {
    let erc20 = IERC20::new(token, provider);
    erc20
        .symbol()
        .call()
        .await
        .with_context(|| format!("symbol() failed for {token}"))
}

pub async fn token_balance_of<P: Provider + Clone>(provider: P, token: Address, owner: Address) -> Result<U256> {
    let erc20 = IERC20::new(token, provider);
    Ok(erc20.balanceOf(owner).call().await?)
}

pub async fn token_meta<P: Provider + Clone>(provider: P, token: Address) -> Result<TokenMeta> {
    let erc20 = IERC20::new(token, provider);
    let symbol = erc20.symbol().call().await?;
    let name = erc20.name().call().await?;
    let decimals = erc20.decimals().call().await?;
    Ok(TokenMeta { address: token, symbol, name, decimals })
}

/// Make sure `spender` may move at least `needed` of `token` on behalf of `owner`.
/// Approves exactly `needed` when the current allowance falls short and waits for the receipt.
pub async fn check_and_set_allowance<P: Provider + Clone>(
    provider: P,
    token: Address,
    owner: Address,
    spender: Address,
    needed: U256,
) -> Result<()> {
    let erc20 = IERC20::new(token, provider);
    let allowance = erc20.allowance(owner, spender).call().await?;
    if allowance >= needed {
        log!(cc::YELLOW, "Approval not needed (allowance {} >= {})", allowance, needed);
        return Ok(());
    }
    let pending = erc20.approve(spender, needed).from(owner).send().await?;
    let tx = *pending.tx_hash();
    log!(cc::YELLOW, "Approving {:?} for spender {:?} in tx {:?}", token, spender, tx);
    pending
        .get_receipt()
        .await
        .with_context(|| format!("approve tx {tx} did not confirm"))?;
    Ok(())
}
