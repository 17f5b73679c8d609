use anyhow::{Context, Result};

use alloy::consensus::TxEnvelope;
use alloy::eips::eip2718::Encodable2718;
use alloy::network::{Ethereum, EthereumWallet, TransactionBuilder};
use alloy::primitives::{Address, TxKind, B256, U256};
use alloy::providers::Provider;
use alloy::rpc::types::{TransactionInput, TransactionRequest};
use alloy::signers::local::PrivateKeySigner;

use synapse::addresses::{DFK_CHAIN_ID, KLAYTN_CHAIN_ID, NATIVE_TOKEN, WJEWEL_KLAYTN};
use synapse::{bridge, BridgeQuote, BridgeTx, QuoteRequest, SynapseApi};
use uniswap::dfk::uniswap_v2::deadline_in_minutes;
use uniswap::plug::erc20::{check_and_set_allowance, token_decimals};

use crate::constants::{BRIDGE_DEADLINE_MINUTES, BRIDGE_GAS_LIMIT, DEFAULT_BRIDGE_AMOUNT, DEFAULT_RECEIVER};
use crate::libs::chain::client::ChainClient;
use crate::libs::chain::spells::{bump_gas_price, wallet_provider};
use crate::libs::config::Config;
use crate::libs::lookup::resolve_token;
use crate::libs::writing::{cc, Colors};
use crate::log;

#[derive(Clone, Debug)]
pub struct BridgeParams {
    pub origin_chain_id: u64,
    pub dest_chain_id: u64,
    pub from_token: Address,
    pub to_token: Address,
    /// Human amount of `from_token`.
    pub amount: String,
    pub recipient: Address,
    pub exclude_cctp: bool,
    pub deadline_minutes: u64,
}

impl Default for BridgeParams {
    /// WJEWEL on Klaytn to DFK Chain.
    fn default() -> Self {
        Self {
            origin_chain_id: KLAYTN_CHAIN_ID,
            dest_chain_id: DFK_CHAIN_ID,
            from_token: WJEWEL_KLAYTN,
            to_token: Address::ZERO,
            amount: DEFAULT_BRIDGE_AMOUNT.to_string(),
            recipient: DEFAULT_RECEIVER,
            exclude_cctp: true,
            deadline_minutes: BRIDGE_DEADLINE_MINUTES,
        }
    }
}

impl BridgeParams {
    /// `bridge [amount] [recipient] [token]`, token on the origin chain.
    pub fn parse(args: &[String]) -> Result<Self> {
        let mut params = Self::default();
        if let Some(amount) = args.first() {
            params.amount = amount.clone();
        }
        if let Some(to) = args.get(1) {
            params.recipient = to
                .parse::<Address>()
                .with_context(|| format!("bad recipient address `{to}`"))?;
        }
        if let Some(token) = args.get(2) {
            params.from_token = resolve_token(token)?;
        }
        Ok(params)
    }
}

/// Legacy transaction for the router call: fixed gas limit, bumped gas price.
pub fn build_bridge_request(tx: &BridgeTx, nonce: u64, node_gas_price: u128, chain_id: u64) -> TransactionRequest {
    TransactionRequest {
        to: Some(TxKind::Call(tx.to)),
        value: Some(tx.value),
        input: TransactionInput::new(tx.data.clone()),
        gas: Some(BRIDGE_GAS_LIMIT),
        gas_price: Some(bump_gas_price(node_gas_price)),
        nonce: Some(nonce),
        chain_id: Some(chain_id),
        ..Default::default()
    }
}

/// Sign locally and return the EIP-2718 encoded bytes ready for broadcast.
pub async fn sign_bridge_request(signer: &PrivateKeySigner, mut request: TransactionRequest) -> Result<Vec<u8>> {
    request.from = Some(signer.address());
    let wallet = EthereumWallet::from(signer.clone());
    let envelope: TxEnvelope = <TransactionRequest as TransactionBuilder<Ethereum>>::build(request, &wallet)
        .await
        .context("failed to sign bridge tx")?;
    Ok(envelope.encoded_2718())
}

/// Quote, approve, encode, sign and broadcast a bridge transfer on the origin chain.
///
/// `provider` must be connected to the origin chain with `signer` as its wallet;
/// `client` must point at the same node.
pub async fn bridge_tokens<P: Provider + Clone>(
    provider: P,
    client: &ChainClient,
    signer: &PrivateKeySigner,
    api: &SynapseApi,
    params: &BridgeParams,
) -> Result<B256> {
    let sender = signer.address();

    let decimals = if params.from_token == NATIVE_TOKEN {
        18
    } else {
        token_decimals(provider.clone(), params.from_token).await?
    };
    let amount: U256 = synapse::units::parse_units(&params.amount, decimals)?;
    let deadline = deadline_in_minutes(params.deadline_minutes);

    let quote: BridgeQuote = api
        .bridge_quote(&QuoteRequest {
            origin_chain_id: params.origin_chain_id,
            dest_chain_id: params.dest_chain_id,
            token_in: params.from_token,
            token_out: params.to_token,
            amount_in: amount,
            token_in_decimals: decimals,
            deadline: Some(deadline),
            exclude_cctp: params.exclude_cctp,
        })
        .await?;
    log!(cc::CYAN, "Quote: {:#?}", quote);

    if params.from_token != NATIVE_TOKEN {
        check_and_set_allowance(provider.clone(), params.from_token, sender, quote.router_address, amount).await?;
        log!(cc::YELLOW, "Allowance set for router {:?}", quote.router_address);
    }

    let bridge_tx = bridge(
        params.recipient,
        quote.router_address,
        params.origin_chain_id,
        params.dest_chain_id,
        params.from_token,
        amount,
        &quote.origin_query,
        &quote.dest_query,
    )?;
    log!(cc::CYAN, "BridgeTx: to={:?} value={} data_len={}", bridge_tx.to, bridge_tx.value, bridge_tx.data.len());

    let nonce = client.transaction_count(sender, "latest").await?;
    let gas_price = client.gas_price().await?;
    let request = build_bridge_request(&bridge_tx, nonce, gas_price, params.origin_chain_id);
    let raw = sign_bridge_request(signer, request).await?;

    let hash = client.send_raw_transaction(&raw).await?;
    log!(cc::GREEN, "Bridge tx sent: {:?}", hash);
    Ok(hash)
}

pub async fn run_bridge(cfg: &Config, args: &[String]) -> Result<()> {
    let params = BridgeParams::parse(args)?;
    let rpc = cfg.klaytn_rpc()?;
    let pk = cfg.private_key()?;

    let signer: PrivateKeySigner = pk
        .parse()
        .context("DFK_PK did not contain a valid hex encoded secret")?;
    let (provider, _) = wallet_provider(rpc, pk, params.origin_chain_id)?;
    let client = ChainClient::new(rpc, pk)?;
    let api = SynapseApi::new(cfg.synapse_api_url.as_str());

    let hash = bridge_tokens(provider, &client, &signer, &api, &params).await?;
    let mut out = Colors::new(std::io::stdout().lock());
    out.cprint(&format!("{hash:?}"), cc::GREEN);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::consensus::Transaction;
    use alloy::eips::eip2718::Decodable2718;
    use alloy::primitives::Bytes;
    use alloy::providers::ProviderBuilder;
    use alloy::sol_types::SolCall;
    use alloy::transports::mock::Asserter;
    use serde_json::{json, Value};
    use synapse::abi::ISynapseRouter;
    use synapse::addresses::SYNAPSE_ROUTER;

    use crate::libs::testing::{serve_once, serve_seq};

    const PK: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn router_call() -> BridgeTx {
        BridgeTx {
            to: SYNAPSE_ROUTER,
            data: Bytes::from(vec![0xde, 0xad, 0xbe, 0xef]),
            value: U256::ZERO,
        }
    }

    #[test]
    fn defaults_bridge_wjewel_from_klaytn() {
        let p = BridgeParams::default();
        assert_eq!(p.origin_chain_id, 8217);
        assert_eq!(p.dest_chain_id, 53935);
        assert_eq!(p.from_token, WJEWEL_KLAYTN);
        assert_eq!(p.amount, "2");
        assert_eq!(p.deadline_minutes, 20);
        assert!(p.exclude_cctp);
    }

    #[test]
    fn args_override_amount_recipient_token() {
        let args: Vec<String> = ["0.5", "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266", "native"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let p = BridgeParams::parse(&args).unwrap();
        assert_eq!(p.amount, "0.5");
        assert_eq!(p.recipient, "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".parse::<Address>().unwrap());
        assert_eq!(p.from_token, NATIVE_TOKEN);
        assert_eq!(p.origin_chain_id, KLAYTN_CHAIN_ID);
        assert!(BridgeParams::parse(&["1".to_string(), "nope".to_string()]).is_err());
    }

    #[test]
    fn request_uses_fixed_gas_and_bumped_price() {
        let req = build_bridge_request(&router_call(), 7, 25_000_000_000, KLAYTN_CHAIN_ID);
        assert_eq!(req.gas, Some(600_000));
        assert_eq!(req.gas_price, Some(27_500_000_000));
        assert_eq!(req.nonce, Some(7));
        assert_eq!(req.chain_id, Some(8217));
        assert_eq!(req.value, Some(U256::ZERO));
        assert_eq!(req.to, Some(TxKind::Call(SYNAPSE_ROUTER)));
    }

    #[tokio::test]
    async fn signs_a_legacy_transaction() {
        let signer: PrivateKeySigner = PK.parse().unwrap();
        let req = build_bridge_request(&router_call(), 3, 100, KLAYTN_CHAIN_ID);
        let raw = sign_bridge_request(&signer, req).await.unwrap();

        let envelope = TxEnvelope::decode_2718(&mut raw.as_slice()).unwrap();
        assert!(envelope.is_legacy());
        assert_eq!(envelope.chain_id(), Some(8217));
        assert_eq!(envelope.nonce(), 3);
        assert_eq!(envelope.gas_limit(), 600_000);
        assert_eq!(envelope.gas_price(), Some(110));
        assert_eq!(envelope.to(), Some(SYNAPSE_ROUTER));
        assert_eq!(envelope.input().as_ref(), &[0xde, 0xad, 0xbe, 0xef]);
    }

    fn native_quote() -> Value {
        json!([{
            "id": "q",
            "routerAddress": "0x7E7A0e201FD38d3ADAA9523Da6C109a07118C96a",
            "maxAmountOut": { "type": "BigNumber", "hex": "0x0dbd2fc137a30000" },
            "originQuery": {
                "routerAdapter": "0x0000000000000000000000000000000000000000",
                "tokenOut": "0xEeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE",
                "minAmountOut": { "type": "BigNumber", "hex": "0x0de0b6b3a7640000" },
                "deadline": { "type": "BigNumber", "hex": "0x65f0a4c0" },
                "rawParams": "0x"
            },
            "destQuery": {
                "routerAdapter": "0x0000000000000000000000000000000000000000",
                "tokenOut": "0x0000000000000000000000000000000000000000",
                "minAmountOut": "990000000000000000",
                "deadline": "1710400000",
                "rawParams": "0x"
            },
            "bridgeModuleName": "SynapseBridge"
        }])
    }

    fn rpc_reply(result: &str) -> (u16, String) {
        (200, json!({ "jsonrpc": "2.0", "id": 1, "result": result }).to_string())
    }

    fn request_body(raw: &str) -> Value {
        let (_, body) = raw.split_once("\r\n\r\n").unwrap();
        serde_json::from_str(body).unwrap()
    }

    #[tokio::test]
    async fn native_bridge_is_signed_with_value_and_fresh_deadline() {
        let signer: PrivateKeySigner = PK.parse().unwrap();
        // Any ERC-20 read or approval would hit this empty queue and fail.
        let provider = ProviderBuilder::new().connect_mocked_client(Asserter::new());

        let (api_url, api_server) = serve_once(200, &native_quote().to_string()).await;
        let sent: B256 = B256::repeat_byte(0xab);
        let (rpc_url, rpc_server) =
            serve_seq(vec![rpc_reply("0x5"), rpc_reply("0x64"), rpc_reply(&format!("{sent:?}"))]).await;

        let client = ChainClient::new(&rpc_url, PK).unwrap();
        let api = SynapseApi::new(api_url);
        let params = BridgeParams {
            from_token: NATIVE_TOKEN,
            amount: "1".to_string(),
            ..Default::default()
        };

        let hash = bridge_tokens(provider, &client, &signer, &api, &params).await.unwrap();
        assert_eq!(hash, sent);

        let quote_request = api_server.await.unwrap();
        assert!(quote_request.starts_with("GET /bridge?"));
        assert!(quote_request.contains("fromChain=8217"));
        assert!(quote_request.contains("toChain=53935"));

        let rpc_requests = rpc_server.await.unwrap();
        assert_eq!(request_body(&rpc_requests[0])["method"], "eth_getTransactionCount");
        assert_eq!(request_body(&rpc_requests[1])["method"], "eth_gasPrice");
        let broadcast = request_body(&rpc_requests[2]);
        assert_eq!(broadcast["method"], "eth_sendRawTransaction");

        let raw = hex::decode(broadcast["params"][0].as_str().unwrap().trim_start_matches("0x")).unwrap();
        let envelope = TxEnvelope::decode_2718(&mut raw.as_slice()).unwrap();
        assert!(envelope.is_legacy());
        assert_eq!(envelope.chain_id(), Some(8217));
        assert_eq!(envelope.nonce(), 5);
        assert_eq!(envelope.gas_limit(), 600_000);
        assert_eq!(envelope.gas_price(), Some(110));
        assert_eq!(envelope.value(), U256::from(1_000_000_000_000_000_000u128));
        assert_eq!(envelope.to(), Some(SYNAPSE_ROUTER));

        let call = ISynapseRouter::bridgeCall::abi_decode(envelope.input()).unwrap();
        assert_eq!(call.to, DEFAULT_RECEIVER);
        assert_eq!(call.chainId, U256::from(53935u64));
        assert_eq!(call.token, NATIVE_TOKEN);
        assert_eq!(call.amount, U256::from(1_000_000_000_000_000_000u128));

        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs();
        let deadline: u64 = call.originQuery.deadline.to();
        assert_ne!(call.originQuery.deadline, U256::from(0x65f0a4c0u64));
        assert!(deadline >= now + 19 * 60 && deadline <= now + 21 * 60);
        assert_eq!(call.destQuery.deadline, U256::from(1_710_400_000u64));
    }
}
