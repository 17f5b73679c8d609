use anyhow::{Context, Result};

use alloy::primitives::{Address, U256};
use alloy::primitives::utils::parse_units;

use uniswap::dfk::addresses::{DFK_CHAIN_ID, USDC, WJEWEL};
use uniswap::dfk::uniswap_v2::{apply_slippage_pct, DfkUniswapV2, SwapKind};
use uniswap::plug::erc20::{token_balance_of, token_decimals, token_meta};

use crate::constants::{DEFAULT_RECEIVER, DEFAULT_SWAP_AMOUNT};
use crate::libs::chain::client::ChainClient;
use crate::libs::chain::spells::{format_native, get_balance, read_provider, wallet_provider};
use crate::libs::config::Config;
use crate::libs::lookup::{addr_to_symbol, resolve_token};
use crate::libs::writing::{cc, Colors};
use crate::log;
use crate::routy::{infer_swap_kind, swap_with_kind, unwrap_wjewel, wrap_jewel};

/// `swap [from] [to] [amount] [receiver] [kind]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwapArgs {
    pub from_token: Address,
    pub to_token: Address,
    pub amount: String,
    pub receiver: Address,
    pub kind: SwapKind,
}

impl SwapArgs {
    pub fn parse(args: &[String]) -> Result<Self> {
        let from_token = match args.first() {
            Some(a) => resolve_token(a)?,
            None => WJEWEL,
        };
        let to_token = match args.get(1) {
            Some(a) => resolve_token(a)?,
            None => USDC,
        };
        let amount = args
            .get(2)
            .cloned()
            .unwrap_or_else(|| DEFAULT_SWAP_AMOUNT.to_string());
        let receiver = match args.get(3) {
            Some(a) => a
                .parse::<Address>()
                .with_context(|| format!("bad receiver address `{a}`"))?,
            None => DEFAULT_RECEIVER,
        };
        let kind = match args.get(4) {
            Some(k) => k.parse::<SwapKind>()?,
            None => infer_swap_kind(from_token, to_token),
        };
        Ok(Self { from_token, to_token, amount, receiver, kind })
    }
}

pub async fn run_swap(cfg: &Config, args: &[String]) -> Result<()> {
    let swap = SwapArgs::parse(args)?;
    let (provider, from) = wallet_provider(cfg.dfk_rpc()?, cfg.private_key()?, DFK_CHAIN_ID)?;
    let dex = DfkUniswapV2::new(provider);

    log!(
        cc::CYAN,
        "Swap {:?}: {} {} -> {}",
        swap.kind,
        swap.amount,
        addr_to_symbol(dex.provider.clone(), swap.from_token).await,
        addr_to_symbol(dex.provider.clone(), swap.to_token).await
    );
    let receipt =
        swap_with_kind(&dex, from, swap.from_token, swap.to_token, &swap.amount, swap.receiver, swap.kind).await?;

    let mut out = Colors::new(std::io::stdout().lock());
    match receipt {
        Some(r) => out.cprint(&format!("{:?}", r.tx_hash), cc::GREEN),
        None => out.cprint("swap not executed", cc::RED),
    }
    Ok(())
}

/// `quote [from] [to] [amount]`: router output and its slippage floor, no transaction.
pub async fn run_quote(cfg: &Config, args: &[String]) -> Result<()> {
    let swap = SwapArgs::parse(args)?;
    let provider = read_provider(cfg.dfk_rpc()?)?;
    let dex = DfkUniswapV2::new(provider.clone());

    let decimals_in = token_decimals(provider, swap.from_token).await?;
    let amount_in: U256 = parse_units(&swap.amount, decimals_in)?.into();
    let out = dex.get_amount_out(swap.from_token, swap.to_token, amount_in).await?;
    let min_out = apply_slippage_pct(out, dex.slippage_pct);

    let mut stdout = Colors::new(std::io::stdout().lock());
    stdout.print(&format!("{out} {min_out}"));
    Ok(())
}

/// `balance [token] [owner]`: native balance, or an ERC-20 balance when a token is given.
pub async fn run_balance(cfg: &Config, args: &[String]) -> Result<()> {
    let pk = cfg.private_key()?;
    let client = ChainClient::new(cfg.dfk_rpc()?, pk)?;
    let owner = match args.get(1) {
        Some(a) => a.parse::<Address>().with_context(|| format!("bad owner address `{a}`"))?,
        None => client.address,
    };

    let line = match args.first() {
        None => format_native(get_balance(&client, owner).await?, "JEWEL"),
        Some(token) => {
            let token = resolve_token(token)?;
            let provider = read_provider(cfg.dfk_rpc()?)?;
            let meta = token_meta(provider.clone(), token).await?;
            let raw = token_balance_of(provider, token, owner).await?;
            let human = alloy::primitives::utils::format_units(raw, meta.decimals)?;
            format!("{human} {}", meta.symbol)
        }
    };

    let mut out = Colors::new(std::io::stdout().lock());
    out.print(&line);
    Ok(())
}

/// `wrap [amount]` and `unwrap [amount]` of native JEWEL.
pub async fn run_wrap(cfg: &Config, args: &[String], unwrap: bool) -> Result<()> {
    let amount = args.first().map(String::as_str).unwrap_or(DEFAULT_SWAP_AMOUNT);
    let wei: U256 = parse_units(amount, 18)?.into();
    let (provider, from) = wallet_provider(cfg.dfk_rpc()?, cfg.private_key()?, DFK_CHAIN_ID)?;

    let hash = if unwrap {
        unwrap_wjewel(provider, from, wei).await?
    } else {
        wrap_jewel(provider, from, wei).await?
    };
    log!(cc::GREEN, "{} {} JEWEL: {:?}", if unwrap { "Unwrapped" } else { "Wrapped" }, amount, hash);
    Ok(())
}
