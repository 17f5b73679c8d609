//! Defaults each command falls back to when run without arguments.
use alloy::primitives::{address, Address};

/// Wallet that receives swap output and bridged funds by default.
pub const DEFAULT_RECEIVER: Address = address!("0x23eD50dB3e7469695DD30FFD22a7B42716A338FC");

/// Human amount of WJEWEL/JEWEL the `swap` command spends.
pub const DEFAULT_SWAP_AMOUNT: &str = "4";

/// Human amount the `bridge` command moves.
pub const DEFAULT_BRIDGE_AMOUNT: &str = "2";

/// Minutes until an origin-side bridge quote expires.
pub const BRIDGE_DEADLINE_MINUTES: u64 = 20;

pub const BRIDGE_GAS_LIMIT: u64 = 600_000;

/// Bridge tx used by `status` when none is given.
pub const SAMPLE_BRIDGE_TX: &str = "0xcbfb18e58c23a2a0ced07f97b83c1179feceb29acf769d2092a59f229a899d13";

pub const STATUS_POLL_SECS: u64 = 15;
pub const STATUS_POLL_ATTEMPTS: u32 = 40;
