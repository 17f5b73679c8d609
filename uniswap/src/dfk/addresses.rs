use alloy::primitives::{Address, address};

/// DFK Chain mainnet.
pub const DFK_CHAIN_ID: u64 = 53935;

/// Wrapped JEWEL. The router treats it as the chain's WETH, so swaps to/from
/// WJEWEL through the *ETH* router functions settle in native JEWEL.
pub const WJEWEL: Address = address!("0xCCb93dABD71c8Dad03Fc4CE5559dC3D89F67a260");

pub const USDC: Address = address!("0x3AD9DFE640E1A9Cc1D9B0948620820D975c3803a");

pub const AVAX: Address = address!("0xB57B60DeBDB0b8172bb6316a9164bd3C695F133a");

pub const KLAY: Address = address!("0x97855Ba65aa7ed2F65Ed832a776537268158B78a");
