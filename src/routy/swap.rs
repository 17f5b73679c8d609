use anyhow::Result;

use alloy::primitives::Address;
use alloy::providers::Provider;

use uniswap::dfk::addresses::WJEWEL;
use uniswap::dfk::uniswap_v2::{DfkUniswapV2, SwapKind, SwapReceipt, SwapRequest};

/// Pick the router entry point from the path: WJEWEL in means native JEWEL
/// is spent, WJEWEL out means native JEWEL is received.
pub fn infer_swap_kind(from_token: Address, to_token: Address) -> SwapKind {
    if from_token == WJEWEL {
        SwapKind::NativeForTokens
    } else if to_token == WJEWEL {
        SwapKind::TokensForNative
    } else {
        SwapKind::TokensForTokens
    }
}

/// Build the request and hand it to the router.
/// Defaults: slippage=3%, deadline=30min, gas=210000
pub async fn swap_with_kind<P: Provider + Clone>(
    dex: &DfkUniswapV2<P>,
    from: Address,
    from_token: Address,
    to_token: Address,
    amount: &str,
    receiver: Address,
    kind: SwapKind,
) -> Result<Option<SwapReceipt>> {
    let req = SwapRequest {
        from_token,
        to_token,
        receiver,
        amount_in: amount.to_string(),
        kind,
    };
    dex.swap_tokens(from, &req).await
}
