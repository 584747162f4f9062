//! Chain records, normalized from the node's JSON-RPC responses
//!
//! These are read-only snapshots. Quantities that fit a u64 on every EVM
//! chain (gas, nonce, block number) are u64; fee and value fields are U256.

use alloy_primitives::{Address, Bytes, B256, U256};

/// A block with its ordered transaction hashes
#[derive(Debug, Clone, PartialEq)]
pub struct RawBlock {
    pub number: u64,
    pub hash: B256,
    pub parent_hash: B256,
    pub timestamp: u64,
    pub miner: Address,
    pub gas_limit: u64,
    pub gas_used: u64,
    /// 8-byte PoW nonce, kept as the node's hex string
    pub nonce: String,
    pub base_fee_per_gas: Option<U256>,
    pub difficulty: Option<U256>,
    pub transactions: Vec<B256>,
}

/// A transaction as returned by `eth_getTransactionByHash`
#[derive(Debug, Clone, PartialEq)]
pub struct RawTransaction {
    pub hash: B256,
    pub from: Address,
    /// `None` for contract creation
    pub to: Option<Address>,
    pub value: U256,
    pub gas: u64,
    pub gas_price: Option<U256>,
    pub nonce: u64,
    pub input: Bytes,
    /// `None` while pending
    pub block_number: Option<u64>,
}

impl RawTransaction {
    pub fn is_contract_creation(&self) -> bool {
        self.to.is_none()
    }
}

/// A transaction receipt. Logs are kept opaque.
#[derive(Debug, Clone, PartialEq)]
pub struct RawReceipt {
    pub transaction_hash: B256,
    pub from: Address,
    pub block_number: u64,
    pub block_hash: B256,
    pub gas_used: u64,
    pub effective_gas_price: Option<U256>,
    pub status: bool,
    /// Present only for contract creation
    pub contract_address: Option<Address>,
    pub logs: Vec<serde_json::Value>,
}

/// Outcome of a confirmed contract deployment
#[derive(Debug, Clone, PartialEq)]
pub struct DeploymentResult {
    pub transaction_hash: B256,
    pub block_number: u64,
    pub block_hash: B256,
    pub gas_used: u64,
    pub effective_gas_price: U256,
    pub contract_address: Address,
    pub deployer: Address,
}

/// Human name for well-known chain IDs
pub fn network_name(chain_id: u64) -> &'static str {
    match chain_id {
        1 => "homestead",
        5 => "goerli",
        17000 => "holesky",
        11155111 => "sepolia",
        31337 => "hardhat",
        _ => "unknown",
    }
}
