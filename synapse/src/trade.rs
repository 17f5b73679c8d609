use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::SolCall;

use crate::abi::ISynapseRouter;
use crate::addresses::NATIVE_TOKEN;
use crate::error::SynapseError;
use crate::quote::SwapQuery;

/// Unsigned call into the Synapse router.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BridgeTx {
    pub to: Address,
    pub data: Bytes,
    pub value: U256,
}

/// Encode `SynapseRouter.bridge` for a quoted route.
///
/// Value is `amount` when bridging the native gas token, zero for ERC-20s.
#[allow(clippy::too_many_arguments)]
pub fn bridge(
    to: Address,
    router_address: Address,
    origin_chain_id: u64,
    dest_chain_id: u64,
    token: Address,
    amount: U256,
    origin_query: &SwapQuery,
    dest_query: &SwapQuery,
) -> Result<BridgeTx, SynapseError> {
    if origin_chain_id == dest_chain_id {
        return Err(SynapseError::SameChain(origin_chain_id));
    }
    let call = ISynapseRouter::bridgeCall {
        to,
        chainId: U256::from(dest_chain_id),
        token,
        amount,
        originQuery: origin_query.into(),
        destQuery: dest_query.into(),
    };
    let value = if token == NATIVE_TOKEN { amount } else { U256::ZERO };
    Ok(BridgeTx {
        to: router_address,
        data: Bytes::from(call.abi_encode()),
        value,
    })
}
