pub mod chain;
pub mod config;
pub mod lookup;
pub mod price;
pub mod writing;

#[cfg(test)]
pub(crate) mod testing;
