//! Chain provider abstraction and its Alloy implementation
//!
//! Reads go through raw JSON requests and are parsed into our own records,
//! so that nodes with non-standard transaction types (Besu private
//! transactions, L2 deposit types) still decode.

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, B256, U256};
use alloy::providers::{DynProvider, Provider};
use alloy::rpc::types::TransactionRequest;
use anyhow::{anyhow, Context, Result};
use serde_json::Value;

use crate::domain::{RawBlock, RawReceipt, RawTransaction};

/// Chain access used by the inspector and the deployer
///
/// Every method is a single request/response; there are no retries.
/// Lookups that can legitimately miss return `Ok(None)`.
#[async_trait::async_trait]
pub trait ChainProvider: Send + Sync {
    /// `eth_chainId`
    async fn chain_id(&self) -> Result<u64>;

    /// `web3_clientVersion`
    async fn client_version(&self) -> Result<String>;

    /// `net_peerCount`, as the node returned it (usually a hex quantity)
    async fn peer_count(&self) -> Result<String>;

    /// Block by number, with transaction hashes only
    async fn get_block(&self, number: u64) -> Result<Option<RawBlock>>;

    /// The latest block
    async fn latest_block(&self) -> Result<RawBlock>;

    async fn get_transaction(&self, hash: B256) -> Result<Option<RawTransaction>>;

    async fn get_receipt(&self, hash: B256) -> Result<Option<RawReceipt>>;

    /// Pending-inclusive nonce of `address`
    async fn transaction_count(&self, address: Address) -> Result<u64>;

    /// Submit a contract-creation transaction signed by `from` and wait for
    /// one confirmation. Returns the transaction hash.
    async fn deploy(&self, from: Address, code: Bytes) -> Result<B256>;

    /// Get endpoint display name
    fn endpoint_name(&self) -> String;
}

/// Alloy-backed provider; transport (HTTP, WebSocket, IPC) is erased
pub struct AlloyProvider {
    provider: DynProvider,
    endpoint: String,
}

impl AlloyProvider {
    pub fn new(provider: DynProvider, endpoint: impl Into<String>) -> Self {
        Self {
            provider,
            endpoint: endpoint.into(),
        }
    }

    async fn request<P>(&self, method: &'static str, params: P) -> Result<Value>
    where
        P: serde::Serialize + Clone + std::fmt::Debug + Send + Sync + Unpin + 'static,
    {
        tracing::debug!("{} -> {}", method, self.endpoint);
        self.provider
            .raw_request::<_, Value>(method.into(), params)
            .await
            .with_context(|| format!("{} failed", method))
    }

    async fn fetch_block(&self, tag: String) -> Result<Option<RawBlock>> {
        let json = self.request("eth_getBlockByNumber", (tag, false)).await?;
        if json.is_null() {
            return Ok(None);
        }
        Ok(Some(parse_raw_block(&json)?))
    }
}

#[async_trait::async_trait]
impl ChainProvider for AlloyProvider {
    async fn chain_id(&self) -> Result<u64> {
        tracing::debug!("eth_chainId -> {}", self.endpoint);
        Ok(self.provider.get_chain_id().await?)
    }

    async fn client_version(&self) -> Result<String> {
        let json = self.request("web3_clientVersion", ()).await?;
        json.as_str()
            .map(str::to_string)
            .ok_or_else(|| anyhow!("web3_clientVersion returned {}", json))
    }

    async fn peer_count(&self) -> Result<String> {
        let json = self.request("net_peerCount", ()).await?;
        Ok(match json {
            Value::String(s) => s,
            other => other.to_string(),
        })
    }

    async fn get_block(&self, number: u64) -> Result<Option<RawBlock>> {
        self.fetch_block(format!("0x{:x}", number)).await
    }

    async fn latest_block(&self) -> Result<RawBlock> {
        self.fetch_block("latest".to_string())
            .await?
            .ok_or_else(|| anyhow!("node returned no latest block"))
    }

    async fn get_transaction(&self, hash: B256) -> Result<Option<RawTransaction>> {
        let json = self.request("eth_getTransactionByHash", (hash,)).await?;
        if json.is_null() {
            return Ok(None);
        }
        Ok(Some(parse_raw_transaction(&json)?))
    }

    async fn get_receipt(&self, hash: B256) -> Result<Option<RawReceipt>> {
        let json = self.request("eth_getTransactionReceipt", (hash,)).await?;
        if json.is_null() {
            return Ok(None);
        }
        Ok(Some(parse_raw_receipt(&json)?))
    }

    async fn transaction_count(&self, address: Address) -> Result<u64> {
        tracing::debug!("eth_getTransactionCount -> {}", self.endpoint);
        Ok(self.provider.get_transaction_count(address).pending().await?)
    }

    async fn deploy(&self, from: Address, code: Bytes) -> Result<B256> {
        let request = TransactionRequest::default()
            .with_from(from)
            .with_deploy_code(code);

        let pending = self
            .provider
            .send_transaction(request)
            .await
            .context("deployment transaction rejected")?;
        let tx_hash = *pending.tx_hash();
        tracing::info!("Deployment submitted: {}", tx_hash);

        let confirmed = pending
            .with_required_confirmations(1)
            .watch()
            .await
            .with_context(|| format!("waiting for deployment {} failed", tx_hash))?;
        tracing::info!("Deployment confirmed: {}", confirmed);

        Ok(confirmed)
    }

    fn endpoint_name(&self) -> String {
        self.endpoint.clone()
    }
}

/// Parse a raw `eth_getBlockByNumber` result.
///
/// Accepts both hash-only and full-object transaction lists.
pub fn parse_raw_block(json: &Value) -> Result<RawBlock> {
    let transactions = json
        .get("transactions")
        .and_then(|v| v.as_array())
        .map(|txs| {
            txs.iter()
                .map(|tx| {
                    let hash = tx.as_str().or_else(|| tx.get("hash").and_then(|h| h.as_str()));
                    hash.ok_or_else(|| anyhow!("transaction entry without hash"))
                        .and_then(parse_b256)
                })
                .collect::<Result<Vec<_>>>()
        })
        .transpose()?
        .unwrap_or_default();

    Ok(RawBlock {
        number: parse_hex_u64(required_str(json, "number")?)?,
        hash: parse_b256(required_str(json, "hash")?)?,
        parent_hash: optional_str(json, "parentHash")
            .map(parse_b256)
            .transpose()?
            .unwrap_or_default(),
        timestamp: parse_hex_u64(required_str(json, "timestamp")?)?,
        miner: optional_str(json, "miner")
            .map(parse_address)
            .transpose()?
            .unwrap_or_default(),
        gas_limit: parse_hex_u64(required_str(json, "gasLimit")?)?,
        gas_used: parse_hex_u64(required_str(json, "gasUsed")?)?,
        nonce: optional_str(json, "nonce").unwrap_or("0x0000000000000000").to_string(),
        base_fee_per_gas: optional_str(json, "baseFeePerGas").map(parse_hex_u256).transpose()?,
        difficulty: optional_str(json, "difficulty").map(parse_hex_u256).transpose()?,
        transactions,
    })
}

/// Parse a raw `eth_getTransactionByHash` result
pub fn parse_raw_transaction(json: &Value) -> Result<RawTransaction> {
    let input = optional_str(json, "input").unwrap_or("0x");
    let input = hex::decode(input.strip_prefix("0x").unwrap_or(input)).context("invalid input hex")?;

    Ok(RawTransaction {
        hash: parse_b256(required_str(json, "hash")?)?,
        from: parse_address(required_str(json, "from")?)?,
        to: optional_str(json, "to").map(parse_address).transpose()?,
        value: parse_hex_u256(optional_str(json, "value").unwrap_or("0x0"))?,
        gas: parse_hex_u64(optional_str(json, "gas").unwrap_or("0x0"))?,
        gas_price: optional_str(json, "gasPrice").map(parse_hex_u256).transpose()?,
        nonce: parse_hex_u64(optional_str(json, "nonce").unwrap_or("0x0"))?,
        input: Bytes::from(input),
        block_number: optional_str(json, "blockNumber").map(parse_hex_u64).transpose()?,
    })
}

/// Parse a raw `eth_getTransactionReceipt` result
pub fn parse_raw_receipt(json: &Value) -> Result<RawReceipt> {
    // Pre-Byzantium receipts carry a state root instead of a status
    let status = match optional_str(json, "status") {
        Some(s) => parse_hex_u64(s)? == 1,
        None => true,
    };

    Ok(RawReceipt {
        transaction_hash: parse_b256(required_str(json, "transactionHash")?)?,
        from: parse_address(required_str(json, "from")?)?,
        block_number: parse_hex_u64(required_str(json, "blockNumber")?)?,
        block_hash: parse_b256(required_str(json, "blockHash")?)?,
        gas_used: parse_hex_u64(required_str(json, "gasUsed")?)?,
        effective_gas_price: optional_str(json, "effectiveGasPrice").map(parse_hex_u256).transpose()?,
        status,
        contract_address: optional_str(json, "contractAddress").map(parse_address).transpose()?,
        logs: json
            .get("logs")
            .and_then(|v| v.as_array())
            .cloned()
            .unwrap_or_default(),
    })
}

fn optional_str<'a>(json: &'a Value, key: &str) -> Option<&'a str> {
    json.get(key).and_then(|v| v.as_str())
}

fn required_str<'a>(json: &'a Value, key: &str) -> Result<&'a str> {
    optional_str(json, key).ok_or_else(|| anyhow!("missing field '{}'", key))
}

/// Parse hex string to u64
pub fn parse_hex_u64(s: &str) -> Result<u64> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    if s.is_empty() {
        return Ok(0);
    }
    u64::from_str_radix(s, 16).with_context(|| format!("Failed to parse hex u64 '{}'", s))
}

/// Parse hex string to U256
pub fn parse_hex_u256(s: &str) -> Result<U256> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    if s.is_empty() || s == "0" {
        return Ok(U256::ZERO);
    }
    // Pad to 64 chars for proper parsing
    let padded = format!("{:0>64}", s);
    let bytes = hex::decode(&padded).context("Failed to decode hex")?;
    if bytes.len() > 32 {
        anyhow::bail!("hex quantity '{}' exceeds 256 bits", s);
    }
    Ok(U256::from_be_slice(&bytes))
}

fn parse_b256(s: &str) -> Result<B256> {
    s.parse().with_context(|| format!("invalid 32-byte hash '{}'", s))
}

fn parse_address(s: &str) -> Result<Address> {
    s.parse().with_context(|| format!("invalid address '{}'", s))
}
