use {
    crate::app::{
        bridge::run_bridge,
        price::run_price,
        status::run_status,
        swap::{run_balance, run_quote, run_swap, run_wrap},
    },
    crate::libs::config::{load_env, Config},
    crate::libs::lookup::save_log_to_file,
    crate::libs::writing::{cc, Colors},
    crate::log,
    anyhow::{bail, Result},
};

pub const USAGE: &str = "\
usage: dfkit <command> [args]

  swap    [from] [to] [amount] [receiver] [kind]   swap on the DFK router (default 4 JEWEL -> USDC)
  quote   [from] [to] [amount]                     router output and its 3% slippage floor
  price   [token] | <token> <quote>                USD price from DexScreener, or router spot price
  bridge  [amount] [recipient] [token]             Synapse bridge Klaytn -> DFK (default 2 WJEWEL)
  status  [tx_hash] [--wait]                       Synapse explorer status of a bridge tx
  balance [token] [owner]                          native or ERC-20 balance on DFK
  wrap    [amount]                                 JEWEL -> WJEWEL
  unwrap  [amount]                                 WJEWEL -> JEWEL";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Swap,
    Quote,
    Price,
    Bridge,
    Status,
    Balance,
    Wrap,
    Unwrap,
    Help,
}

impl Command {
    pub fn parse(name: Option<&str>) -> Result<Self> {
        Ok(match name.map(str::to_ascii_lowercase).as_deref() {
            Some("swap") => Command::Swap,
            Some("quote") => Command::Quote,
            Some("price") => Command::Price,
            Some("bridge") => Command::Bridge,
            Some("status") => Command::Status,
            Some("balance") => Command::Balance,
            Some("wrap") => Command::Wrap,
            Some("unwrap") => Command::Unwrap,
            None | Some("help") | Some("-h") | Some("--help") => Command::Help,
            Some(other) => bail!("unknown command `{other}`\n\n{USAGE}"),
        })
    }
}

pub async fn init() -> Result<()> {
    load_env();
    let cfg = Config::from_env();

    let argv: Vec<String> = std::env::args().skip(1).collect();
    let command = Command::parse(argv.first().map(String::as_str))?;
    let args = argv.get(1..).unwrap_or_default();
    save_log_to_file(&format!("[cmd] {command:?} {args:?}"));

    dispatch(&cfg, command, args).await
}

pub async fn dispatch(cfg: &Config, command: Command, args: &[String]) -> Result<()> {
    match command {
        Command::Swap => run_swap(cfg, args).await,
        Command::Quote => run_quote(cfg, args).await,
        Command::Price => run_price(cfg, args).await,
        Command::Bridge => run_bridge(cfg, args).await,
        Command::Status => run_status(cfg, args).await,
        Command::Balance => run_balance(cfg, args).await,
        Command::Wrap => run_wrap(cfg, args, false).await,
        Command::Unwrap => run_wrap(cfg, args, true).await,
        Command::Help => {
            let mut out = Colors::new(std::io::stdout().lock());
            out.cprint(USAGE, cc::CYAN);
            Ok(())
        }
    }
    .inspect_err(|e| log!(cc::RED, "{:?} failed: {:#}", command, e))
}
