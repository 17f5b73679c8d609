use alloy::primitives::{Address, address};

pub use crate::dfk::addresses::*;

pub const DFK_UNISWAP_V2_ROUTER: Address = address!("0x3C351E1afdd1b1BC44e931E12D4E05D6125eaeCa");
