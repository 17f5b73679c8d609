use anyhow::Result;

use alloy::primitives::{Address, U256};
use alloy::providers::Provider;

use crate::dfk::uniswap_v2::addresses::DFK_UNISWAP_V2_ROUTER;
use crate::dfk::uniswap_v2::router::IUniswapV2Router02;
use crate::plug::erc20::token_decimals;

/// A normalized price quote using 1 whole unit of `token_in` in human scale.
#[derive(Clone, Debug)]
pub struct PriceQuote {
    pub token_in: Address,
    pub token_out: Address,
    /// Raw amount in base units used (10^decimals_in)
    pub amount_in_base_units: U256,
    /// Raw amount out returned by router.getAmountsOut
    pub amount_out_base_units: U256,
    pub decimals_in: u8,
    pub decimals_out: u8,
}

impl PriceQuote {
    /// Output per whole input token, as a float. Lossy; for display only.
    pub fn price(&self) -> f64 {
        let out: f64 = self.amount_out_base_units.to_string().parse().unwrap_or(0.0);
        out / 10f64.powi(self.decimals_out as i32)
    }
}

pub fn one_unit(decimals: u8) -> U256 {
    U256::from(10u64).pow(U256::from(decimals))
}

/// Static price on the DFK router via getAmountsOut for 1 whole token_in.
pub async fn get_price_v2<P: Provider + Clone>(provider: P, token_in: Address, token_out: Address) -> Result<PriceQuote> {
    let dec_in = token_decimals(provider.clone(), token_in).await?;
    let dec_out = token_decimals(provider.clone(), token_out).await?;
    let amount_in = one_unit(dec_in);
    let router = IUniswapV2Router02::new(DFK_UNISWAP_V2_ROUTER, provider.clone());
    let path = vec![token_in, token_out];
    let amounts: Vec<U256> = router.getAmountsOut(amount_in, path).call().await?;
    let amount_out = amounts.last().cloned().unwrap_or(U256::ZERO);
    Ok(PriceQuote {
        token_in,
        token_out,
        amount_in_base_units: amount_in,
        amount_out_base_units: amount_out,
        decimals_in: dec_in,
        decimals_out: dec_out,
    })
}
