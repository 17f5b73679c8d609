use alloy::primitives::address;
use alloy::primitives::Address;

pub const KLAYTN_CHAIN_ID: u64 = 8217;
pub const DFK_CHAIN_ID: u64 = 53935;

/// SynapseRouter, deployed at the same address on Klaytn and DFK Chain.
pub const SYNAPSE_ROUTER: Address = address!("0x7E7A0e201FD38d3ADAA9523Da6C109a07118C96a");

/// Synapse's placeholder for a chain's native gas token.
pub const NATIVE_TOKEN: Address = address!("0xEeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE");

/// WJEWEL as bridged to Klaytn.
pub const WJEWEL_KLAYTN: Address = address!("0x30C103f8f5A3A732DFe2dCE1Cc9446f545527b43");

pub const SYNAPSE_API_URL: &str = "https://api.synapseprotocol.com";
pub const SYNAPSE_EXPLORER_URL: &str = "https://explorer.omnirpc.io/graphql";

/// Module name the REST API reports for Circle CCTP routes.
pub const CCTP_MODULE_NAME: &str = "SynapseCCTP";
