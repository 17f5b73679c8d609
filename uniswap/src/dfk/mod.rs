pub mod addresses;
pub mod uniswap_v2;
