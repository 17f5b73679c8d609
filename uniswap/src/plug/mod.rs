//! On-chain helpers shared by the router and the bridge flow:
//! ERC-20 metadata, allowance handling and one-unit spot prices.

pub mod erc20;
pub mod price;

pub use erc20::*;
pub use price::*;
