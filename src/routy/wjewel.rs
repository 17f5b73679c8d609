use anyhow::Result;

use alloy::primitives::{Address, U256};
use alloy::providers::Provider;

use uniswap::dfk::addresses::WJEWEL;
use uniswap::dfk::uniswap_v2::TxHash;

alloy::sol! {
    #[sol(rpc)]
    interface IWJEWEL {
        function deposit() payable;
        function withdraw(uint256 wad);
        function balanceOf(address owner) view returns (uint256);
    }
}

/// Wrap native JEWEL into WJEWEL by calling WJEWEL.deposit with `amount` as msg.value
pub async fn wrap_jewel<P: Provider + Clone>(
    provider: P,
    from: Address,
    amount: U256,
) -> Result<TxHash> {
    let wjewel = IWJEWEL::new(WJEWEL, provider.clone());
    let pending = wjewel.deposit().from(from).value(amount).send().await?;
    let receipt = pending.get_receipt().await?;
    Ok(receipt.transaction_hash)
}

/// Unwrap WJEWEL back to native JEWEL by calling WJEWEL.withdraw(amount)
pub async fn unwrap_wjewel<P: Provider + Clone>(
    provider: P,
    from: Address,
    amount: U256,
) -> Result<TxHash> {
    let wjewel = IWJEWEL::new(WJEWEL, provider.clone());
    let balance = wjewel.balanceOf(from).call().await?;
    if balance < amount {
        anyhow::bail!("WJEWEL balance {balance} is below requested {amount}");
    }
    let pending = wjewel.withdraw(amount).from(from).send().await?;
    let receipt = pending.get_receipt().await?;
    Ok(receipt.transaction_hash)
}
