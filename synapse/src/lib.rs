pub mod addresses;
pub mod abi;
pub mod error;
pub mod quote;
pub mod status;
pub mod trade;
pub mod units;

#[cfg(test)]
mod testing;

pub use addresses::*;
pub use error::*;
pub use quote::*;
pub use status::*;
pub use trade::*;
