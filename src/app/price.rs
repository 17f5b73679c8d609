use anyhow::Result;

use uniswap::dfk::addresses::WJEWEL;
use uniswap::plug::price::get_price_v2;

use crate::libs::chain::spells::read_provider;
use crate::libs::config::Config;
use crate::libs::lookup::resolve_token;
use crate::libs::price::DexScreener;
use crate::libs::writing::{cc, Colors};
use crate::warn;

/// Turn symbols into addresses, leave anything else (lists, raw addresses) as typed.
pub fn dexscreener_query(arg: Option<&str>) -> String {
    match arg {
        None => WJEWEL.to_checksum(None),
        Some(a) => match resolve_token(a) {
            Ok(addr) => addr.to_checksum(None),
            Err(_) => a.trim().to_string(),
        },
    }
}

/// `price [token]` asks DexScreener; `price <token> <quote>` reads the DFK router instead.
pub async fn run_price(cfg: &Config, args: &[String]) -> Result<()> {
    let mut out = Colors::new(std::io::stdout().lock());

    if let (Some(token_in), Some(token_out)) = (args.first(), args.get(1)) {
        let provider = read_provider(cfg.dfk_rpc()?)?;
        let quote = get_price_v2(provider, resolve_token(token_in)?, resolve_token(token_out)?).await?;
        out.print(&quote.price().to_string());
        return Ok(());
    }

    let token = dexscreener_query(args.first().map(String::as_str));
    match DexScreener::new(cfg.dexscreener_url.as_str()).get_token_price(&token).await {
        Some(p) => out.print(&p.to_string()),
        None => {
            warn!("no price for {}", token);
            out.cprint("null", cc::RED);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_become_addresses() {
        assert!(dexscreener_query(None).eq_ignore_ascii_case("0xccb93dabd71c8dad03fc4ce5559dc3d89f67a260"));
        assert!(dexscreener_query(Some("usdc")).eq_ignore_ascii_case("0x3ad9dfe640e1a9cc1d9b0948620820d975c3803a"));
        assert_eq!(
            dexscreener_query(Some("usdc,0xBcdD90034eB73e7Aec2598ea9082d381a285f63b")),
            "usdc,0xBcdD90034eB73e7Aec2598ea9082d381a285f63b"
        );
    }
}
