//! JSON-RPC access to the EVM chains dfkit talks to. [`client`] wraps the
//! raw calls the bridge flow needs (nonce, gas price, raw broadcast), while
//! [`spells`] holds small helpers built on top of it and the Alloy wallet
//! provider used for contract calls.
pub mod client;
pub mod spells;
