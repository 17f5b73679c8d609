//! Routy: thin, ergonomic wrappers over the DFK router flows.

pub mod swap;
pub mod wjewel;

pub use swap::*;
pub use wjewel::*;
