use anyhow::{Result, bail};

use alloy::primitives::utils::{format_units, parse_units};
use alloy::primitives::{Address, B256, U256};
use alloy::providers::Provider;
use alloy::rpc::types::TransactionRequest;

use crate::dfk::uniswap_v2::addresses::DFK_UNISWAP_V2_ROUTER;
use crate::dfk::uniswap_v2::path::{DEFAULT_SLIPPAGE_PCT, apply_slippage_pct, deadline_in_minutes, path2};
use crate::log;
use crate::plug::erc20::{check_and_set_allowance, token_decimals, token_symbol};
use crate::writing::cc;

pub type TxHash = B256;

/// Gas limit attached to every swap.
pub const SWAP_GAS_LIMIT: u64 = 210_000;

/// Minutes until a swap expires.
pub const SWAP_DEADLINE_MINUTES: u64 = 30;

alloy::sol! {
    #[sol(rpc)]
    interface IUniswapV2Router02 {
        function getAmountsOut(uint256 amountIn, address[] calldata path) external view returns (uint256[] memory amounts);

        function swapExactTokensForTokens(
            uint256 amountIn,
            uint256 amountOutMin,
            address[] calldata path,
            address to,
            uint256 deadline
        ) external returns (uint256[] memory amounts);

        function swapExactTokensForETH(
            uint256 amountIn,
            uint256 amountOutMin,
            address[] calldata path,
            address to,
            uint256 deadline
        ) external returns (uint256[] memory amounts);

        function swapExactETHForTokens(
            uint256 amountOutMin,
            address[] calldata path,
            address to,
            uint256 deadline
        ) external payable returns (uint256[] memory amounts);
    }
}

/// Which router entry point a swap goes through.
///
/// WJEWEL is the router's WETH: `TokensForNative` pays out native JEWEL when
/// the path ends in WJEWEL, `NativeForTokens` spends native JEWEL when the
/// path starts with it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwapKind {
    TokensForTokens,
    TokensForNative,
    NativeForTokens,
}

impl SwapKind {
    /// Native input is sent as value, so there is nothing to approve.
    pub fn needs_allowance(&self) -> bool {
        !matches!(self, SwapKind::NativeForTokens)
    }
}

impl std::str::FromStr for SwapKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "tokens" | "tokens-for-tokens" => Ok(SwapKind::TokensForTokens),
            "to-native" | "tokens-for-native" | "tokens-for-eth" => Ok(SwapKind::TokensForNative),
            "from-native" | "native-for-tokens" | "eth-for-tokens" => Ok(SwapKind::NativeForTokens),
            other => bail!("unknown swap kind `{other}`"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SwapRequest {
    pub from_token: Address,
    pub to_token: Address,
    pub receiver: Address,
    /// Human amount of `from_token`, e.g. "4" or "0.25".
    pub amount_in: String,
    pub kind: SwapKind,
}

#[derive(Clone, Debug)]
pub struct SwapReceipt {
    pub amount_in: U256,
    pub quoted_out: U256,
    pub min_out: U256,
    pub tx_hash: TxHash,
}

#[derive(Clone)]
pub struct DfkUniswapV2<P: Provider + Clone> {
    pub provider: P,
    pub router_addr: Address,
    pub slippage_pct: u64,
    pub deadline_minutes: u64,
}

impl<P: Provider + Clone> DfkUniswapV2<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            router_addr: DFK_UNISWAP_V2_ROUTER,
            slippage_pct: DEFAULT_SLIPPAGE_PCT,
            deadline_minutes: SWAP_DEADLINE_MINUTES,
        }
    }

    fn router(&self) -> IUniswapV2Router02::IUniswapV2Router02Instance<P> {
        IUniswapV2Router02::new(self.router_addr, self.provider.clone())
    }

    /// Amount of `to_token` the router would return for `amount_in` of `from_token`.
    ///
    /// The raw amount is rendered with the output token's decimals, logged, and
    /// parsed back to base units. A router answer with fewer than two amounts
    /// yields zero. Router errors are logged and returned.
    pub async fn get_amount_out(&self, from_token: Address, to_token: Address, amount_in: U256) -> Result<U256> {
        let from_symbol = token_symbol(self.provider.clone(), from_token).await?;
        let to_symbol = token_symbol(self.provider.clone(), to_token).await?;
        let to_decimals = token_decimals(self.provider.clone(), to_token).await?;
        log!(cc::YELLOW, "To token decimals: {}", to_decimals);

        let amounts = match self.router().getAmountsOut(amount_in, path2(from_token, to_token)).call().await {
            Ok(amounts) => amounts,
            Err(e) => {
                log!(cc::RED, "Error while getting swap information: {}", e);
                return Err(e.into());
            }
        };

        if amounts.len() < 2 {
            return Ok(U256::ZERO);
        }
        let human = format_units(amounts[1], to_decimals)?;
        log!(
            cc::LIGHT_GREEN,
            "You will get {} swapping {} {} to {}.",
            human,
            amount_in,
            from_symbol,
            to_symbol
        );
        Ok(parse_units(&human, to_decimals)?.into())
    }

    /// Quote, bound by slippage, approve if needed and submit the swap.
    ///
    /// Token reads and the quote propagate their errors. Once the transaction
    /// phase starts, failures are logged and reported as `Ok(None)`.
    pub async fn swap_tokens(&self, from: Address, req: &SwapRequest) -> Result<Option<SwapReceipt>> {
        let from_symbol = token_symbol(self.provider.clone(), req.from_token).await?;
        let from_decimals = token_decimals(self.provider.clone(), req.from_token).await?;
        let to_symbol = token_symbol(self.provider.clone(), req.to_token).await?;
        let to_decimals = token_decimals(self.provider.clone(), req.to_token).await?;
        log!(cc::YELLOW, "From token decimals: {}", from_decimals);
        log!(cc::YELLOW, "To token decimals: {}", to_decimals);

        let amount_in: U256 = parse_units(&req.amount_in, from_decimals)?.into();

        let quoted_out = self.get_amount_out(req.from_token, req.to_token, amount_in).await?;
        let min_out = apply_slippage_pct(quoted_out, self.slippage_pct);
        let deadline = deadline_in_minutes(self.deadline_minutes);

        log!(
            cc::YELLOW,
            "Swapping {} {} for {} {}",
            amount_in,
            from_symbol,
            min_out,
            to_symbol
        );

        match self.submit(from, req, amount_in, min_out, deadline).await {
            Ok(tx_hash) => {
                log!(cc::GREEN, "Successful transaction. TxHash: {:?}", tx_hash);
                Ok(Some(SwapReceipt { amount_in, quoted_out, min_out, tx_hash }))
            }
            Err(e) => {
                log!(cc::RED, "Error performing swap tx: {:#}", e);
                Ok(None)
            }
        }
    }

    /// Router call for `req` with the fixed gas limit. Native input rides along as value.
    pub fn swap_call(
        &self,
        from: Address,
        req: &SwapRequest,
        amount_in: U256,
        min_out: U256,
        deadline: U256,
    ) -> TransactionRequest {
        let router = self.router();
        let path = path2(req.from_token, req.to_token);
        match req.kind {
            SwapKind::TokensForTokens => router
                .swapExactTokensForTokens(amount_in, min_out, path, req.receiver, deadline)
                .from(from)
                .gas(SWAP_GAS_LIMIT)
                .into_transaction_request(),
            SwapKind::TokensForNative => router
                .swapExactTokensForETH(amount_in, min_out, path, req.receiver, deadline)
                .from(from)
                .gas(SWAP_GAS_LIMIT)
                .into_transaction_request(),
            SwapKind::NativeForTokens => router
                .swapExactETHForTokens(min_out, path, req.receiver, deadline)
                .from(from)
                .value(amount_in)
                .gas(SWAP_GAS_LIMIT)
                .into_transaction_request(),
        }
    }

    async fn submit(
        &self,
        from: Address,
        req: &SwapRequest,
        amount_in: U256,
        min_out: U256,
        deadline: U256,
    ) -> Result<TxHash> {
        if req.kind.needs_allowance() {
            check_and_set_allowance(self.provider.clone(), req.from_token, from, self.router_addr, amount_in).await?;
            log!(cc::YELLOW, "Allowance set");
        }

        let tx = self.swap_call(from, req, amount_in, min_out, deadline);
        let pending = self.provider.send_transaction(tx).await?;
        log!(cc::YELLOW, "Sent {:?} tx {:?}", req.kind, pending.tx_hash());
        let receipt = pending.get_receipt().await?;
        Ok(receipt.transaction_hash)
    }
}
