use std::time::Duration;

use anyhow::{Context, Result};

use alloy::primitives::B256;
use synapse::ExplorerClient;

use crate::constants::{SAMPLE_BRIDGE_TX, STATUS_POLL_ATTEMPTS, STATUS_POLL_SECS};
use crate::libs::config::Config;
use crate::libs::writing::{cc, Colors};
use crate::log;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusArgs {
    pub tx_hash: B256,
    pub wait: bool,
}

impl StatusArgs {
    /// `status [tx_hash] [--wait]`, flag in any position.
    pub fn parse(args: &[String]) -> Result<Self> {
        let wait = args.iter().any(|a| a == "--wait");
        let hash = args
            .iter()
            .find(|a| !a.starts_with("--"))
            .map(String::as_str)
            .unwrap_or(SAMPLE_BRIDGE_TX);
        let tx_hash = hash
            .parse::<B256>()
            .with_context(|| format!("bad tx hash `{hash}`"))?;
        Ok(Self { tx_hash, wait })
    }
}

/// Print the explorer payload as is, or poll until the destination leg lands.
pub async fn run_status(cfg: &Config, args: &[String]) -> Result<()> {
    let status = StatusArgs::parse(args)?;
    let explorer = ExplorerClient::new(cfg.synapse_explorer_url.as_str());
    let mut out = Colors::new(std::io::stdout().lock());

    if !status.wait {
        let raw = explorer.bridge_status_raw(status.tx_hash).await?;
        out.print(&serde_json::to_string_pretty(&raw)?);
        return Ok(());
    }

    let every = Duration::from_secs(Config::get_var_t("STATUS_POLL_SECS", STATUS_POLL_SECS));
    let attempts = Config::get_var_t("STATUS_POLL_ATTEMPTS", STATUS_POLL_ATTEMPTS);
    log!(cc::CYAN, "Waiting on {:?}, every {:?}, {} attempts", status.tx_hash, every, attempts);

    match explorer.wait_for_completion(status.tx_hash, every, attempts).await? {
        Some(tx) if tx.is_complete() => {
            log!(cc::GREEN, "Bridge completed, kappa {:?}", tx.kappa);
            out.print(&serde_json::to_string_pretty(&tx)?);
        }
        Some(tx) => {
            log!(cc::YELLOW, "Still pending after {} attempts", attempts);
            out.print(&serde_json::to_string_pretty(&tx)?);
        }
        None => out.cprint("no bridge transaction found", cc::RED),
    }
    Ok(())
}
