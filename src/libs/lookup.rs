use std::io::{self, Write};

use anyhow::{Context, Result};

use alloy::primitives::{hex, Address};
use alloy::providers::Provider;

use std::env;
use std::fs::{create_dir_all, OpenOptions};

use synapse::addresses::{NATIVE_TOKEN, WJEWEL_KLAYTN};
use uniswap::dfk::addresses::{AVAX, KLAY, USDC, WJEWEL};
use uniswap::plug::erc20::IERC20;

/// Read ERC20 `symbol()`; on failure returns a short hex of the address.
pub async fn addr_to_symbol<P: Provider + Clone>(provider: P, token: Address) -> String {
    let erc = IERC20::new(token, provider);
    match erc.symbol().call().await {
        Ok(sym) => sym,
        Err(_) => short_addr(token),
    }
}

pub fn short_addr(addr: Address) -> String {
    let s = addr.as_slice();
    format!("0x{}…{}", hex::encode(&s[0..3]), hex::encode(&s[17..20]))
}

/// Known tokens by symbol. DFK Chain unless suffixed.
pub fn known_tokens() -> Vec<(&'static str, Address)> {
    vec![
        ("WJEWEL", WJEWEL),
        ("JEWEL", WJEWEL),
        ("USDC", USDC),
        ("AVAX", AVAX),
        ("KLAY", KLAY),
        ("WJEWEL.KLAYTN", WJEWEL_KLAYTN),
        ("NATIVE", NATIVE_TOKEN),
    ]
}

/// Accept a known symbol (case-insensitive) or a 0x address.
pub fn resolve_token(arg: &str) -> Result<Address> {
    let arg = arg.trim();
    if let Some((_, addr)) = known_tokens()
        .into_iter()
        .find(|(sym, _)| sym.eq_ignore_ascii_case(arg))
    {
        return Ok(addr);
    }
    arg.parse::<Address>()
        .with_context(|| format!("`{arg}` is neither a known token nor an address"))
}

pub fn save_log_to_file(log: &str) {
    // skip if not enabled
    if !is_debug_logs_enabled() {
        return;
    }

    if let Err(e) = create_dir_all("logs") {
        eprintln!("save_log_to_file mkdir error: {e}");
        return;
    }
    let now = chrono::Utc::now().format("%d-%m-%Y").to_string();
    let file_name = format!("logs/dfkit_{}.txt", now);
    let time_now = chrono::Utc::now().format("%H:%M:%S%.3f").to_string();
    let log_with_time = format!("[{}] {log}", time_now);

    if let Err(e) = append_line(&file_name, &log_with_time) {
        eprintln!("save_log_to_file error: {e}");
    }
}

fn is_debug_logs_enabled() -> bool {
    match env::var("DEBUG_LOGS") {
        Ok(val) => val.eq_ignore_ascii_case("true"),
        Err(_) => false,
    }
}

fn append_line(path: &str, line: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{line}")?;
    Ok(())
}
