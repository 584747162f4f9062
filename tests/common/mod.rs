//! In-memory chain provider for exercising inspection and deployment
//! without a node. Every call is recorded by method name.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use alloy::primitives::{keccak256, Address, Bytes, B256, U256};
use alloy_json_abi::JsonAbi;
use anyhow::{anyhow, Result};
use async_trait::async_trait;

use blockprobe::domain::abi::{ArtifactRegistry, CalldataDecoder, ContractArtifact, DecodedCall};
use blockprobe::infrastructure::AlloyAbiDecoder;
use blockprobe::{ChainProvider, DecodeError, RawBlock, RawReceipt, RawTransaction};

pub const CLIENT_VERSION: &str = "besu/v24.1.0/linux-x86_64/openjdk-java-17";
pub const PEER_COUNT: &str = "0x19";

pub struct MockProvider {
    chain_id: u64,
    blocks: Mutex<HashMap<u64, RawBlock>>,
    transactions: Mutex<HashMap<B256, RawTransaction>>,
    receipts: Mutex<HashMap<B256, RawReceipt>>,
    nonces: Mutex<HashMap<Address, u64>>,
    deployed: Mutex<Vec<(Address, Bytes)>>,
    calls: Mutex<Vec<&'static str>>,
    /// Deployments land with a failed status
    pub revert_deploys: bool,
}

impl MockProvider {
    pub fn new(chain_id: u64) -> Self {
        Self {
            chain_id,
            blocks: Mutex::default(),
            transactions: Mutex::default(),
            receipts: Mutex::default(),
            nonces: Mutex::default(),
            deployed: Mutex::default(),
            calls: Mutex::default(),
            revert_deploys: false,
        }
    }

    pub fn with_block(self, block: RawBlock) -> Self {
        self.blocks.lock().unwrap().insert(block.number, block);
        self
    }

    pub fn with_transaction(self, tx: RawTransaction) -> Self {
        self.transactions.lock().unwrap().insert(tx.hash, tx);
        self
    }

    pub fn with_receipt(self, receipt: RawReceipt) -> Self {
        self.receipts
            .lock()
            .unwrap()
            .insert(receipt.transaction_hash, receipt);
        self
    }

    pub fn with_nonce(self, address: Address, nonce: u64) -> Self {
        self.nonces.lock().unwrap().insert(address, nonce);
        self
    }

    /// Method names in call order
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, method: &str) -> usize {
        self.calls().iter().filter(|c| **c == method).count()
    }

    pub fn deployed(&self) -> Vec<(Address, Bytes)> {
        self.deployed.lock().unwrap().clone()
    }

    fn record(&self, method: &'static str) {
        self.calls.lock().unwrap().push(method);
    }
}

#[async_trait]
impl ChainProvider for MockProvider {
    async fn chain_id(&self) -> Result<u64> {
        self.record("chain_id");
        Ok(self.chain_id)
    }

    async fn client_version(&self) -> Result<String> {
        self.record("client_version");
        Ok(CLIENT_VERSION.to_string())
    }

    async fn peer_count(&self) -> Result<String> {
        self.record("peer_count");
        Ok(PEER_COUNT.to_string())
    }

    async fn get_block(&self, number: u64) -> Result<Option<RawBlock>> {
        self.record("get_block");
        Ok(self.blocks.lock().unwrap().get(&number).cloned())
    }

    async fn latest_block(&self) -> Result<RawBlock> {
        self.record("latest_block");
        let blocks = self.blocks.lock().unwrap();
        blocks
            .keys()
            .max()
            .and_then(|n| blocks.get(n))
            .cloned()
            .ok_or_else(|| anyhow!("no blocks"))
    }

    async fn get_transaction(&self, hash: B256) -> Result<Option<RawTransaction>> {
        self.record("get_transaction");
        Ok(self.transactions.lock().unwrap().get(&hash).cloned())
    }

    async fn get_receipt(&self, hash: B256) -> Result<Option<RawReceipt>> {
        self.record("get_receipt");
        Ok(self.receipts.lock().unwrap().get(&hash).cloned())
    }

    async fn transaction_count(&self, address: Address) -> Result<u64> {
        self.record("transaction_count");
        Ok(self.nonces.lock().unwrap().get(&address).copied().unwrap_or(0))
    }

    async fn deploy(&self, from: Address, code: Bytes) -> Result<B256> {
        self.record("deploy");
        let nonce = {
            let mut nonces = self.nonces.lock().unwrap();
            let nonce = nonces.entry(from).or_insert(0);
            let current = *nonce;
            *nonce += 1;
            current
        };

        let mut preimage = from.to_vec();
        preimage.extend_from_slice(&nonce.to_be_bytes());
        let hash = keccak256(&preimage);

        self.receipts.lock().unwrap().insert(
            hash,
            RawReceipt {
                transaction_hash: hash,
                from,
                block_number: 1175,
                block_hash: B256::repeat_byte(0xbb),
                gas_used: 421_337,
                effective_gas_price: Some(U256::ZERO),
                status: !self.revert_deploys,
                contract_address: Some(from.create(nonce)),
                logs: vec![],
            },
        );
        self.deployed.lock().unwrap().push((from, code));
        Ok(hash)
    }

    fn endpoint_name(&self) -> String {
        "mock".to_string()
    }
}

/// `(address, uint256)` decoder that counts its attempts
pub struct CountingDecoder {
    inner: AlloyAbiDecoder,
    attempts: AtomicUsize,
}

impl CountingDecoder {
    pub fn new() -> Self {
        Self {
            inner: AlloyAbiDecoder::address_uint256(),
            attempts: AtomicUsize::new(0),
        }
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl CalldataDecoder for CountingDecoder {
    fn decode(&self, input: &[u8]) -> Result<DecodedCall, DecodeError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        self.inner.decode(input)
    }
}

pub fn block(number: u64, transactions: Vec<B256>) -> RawBlock {
    RawBlock {
        number,
        hash: B256::repeat_byte(0xaa),
        parent_hash: B256::repeat_byte(0xab),
        timestamp: 1_704_067_200,
        miner: Address::repeat_byte(0x01),
        gas_limit: 30_000_000,
        gas_used: 21_000 * transactions.len() as u64,
        nonce: "0x0000000000000000".to_string(),
        base_fee_per_gas: Some(U256::from(7u64)),
        difficulty: Some(U256::ZERO),
        transactions,
    }
}

pub fn transaction(hash: B256, to: Option<Address>, input: Bytes) -> RawTransaction {
    RawTransaction {
        hash,
        from: Address::repeat_byte(0x22),
        to,
        value: U256::from(1_000_000_000_000_000_000u64),
        gas: 90_000,
        gas_price: Some(U256::from(1_000_000_000u64)),
        nonce: 3,
        input,
        block_number: Some(1174),
    }
}

pub fn receipt(hash: B256, contract_address: Option<Address>) -> RawReceipt {
    RawReceipt {
        transaction_hash: hash,
        from: Address::repeat_byte(0x22),
        block_number: 1174,
        block_hash: B256::repeat_byte(0xaa),
        gas_used: 21_000,
        effective_gas_price: Some(U256::from(1_000_000_000u64)),
        status: true,
        contract_address,
        logs: vec![serde_json::json!({ "address": "0x0000000000000000000000000000000000000033" })],
    }
}

/// `MyContract(string _greeting, uint256 _version)`
pub fn greeter_registry() -> ArtifactRegistry {
    let abi: JsonAbi = serde_json::from_str(
        r#"[{
            "type": "constructor",
            "stateMutability": "nonpayable",
            "inputs": [
                {"name": "_greeting", "type": "string", "internalType": "string"},
                {"name": "_version", "type": "uint256", "internalType": "uint256"}
            ]
        }]"#,
    )
    .unwrap();

    let mut registry = ArtifactRegistry::new();
    registry.insert(ContractArtifact {
        name: "MyContract".to_string(),
        abi,
        bytecode: Bytes::from_static(&[0x60, 0x80, 0x60, 0x40, 0x52]),
        source: PathBuf::from("artifacts/contracts/MyContract.sol/MyContract.json"),
    });
    registry
}
