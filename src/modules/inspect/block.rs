//! Block inspection: header fields plus a per-transaction breakdown

use alloy::primitives::{Address, B256};
use anyhow::Result;

use super::Inspector;
use crate::domain::abi::DecodedCall;
use crate::domain::units::{format_ether, format_gwei, format_local_time};
use crate::domain::{RawBlock, RawTransaction, UnitFormat};
use crate::error::DecodeError;
use crate::modules::report::Report;

#[derive(Debug, Clone, PartialEq)]
pub enum BlockInspection {
    NotFound(u64),
    Found(BlockView),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockView {
    pub block: RawBlock,
    /// One entry per transaction hash, in block order
    pub transactions: Vec<TransactionEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionEntry {
    /// 1-based position in the block
    pub position: usize,
    pub hash: B256,
    /// `None` when the node could not find the transaction
    pub detail: Option<(RawTransaction, TransactionKind)>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TransactionKind {
    /// No recipient. The address comes from the receipt, if it has one.
    ContractCreation { contract_address: Option<Address> },
    /// Recipient and payload; the decode is best-effort
    Call {
        decoded: Result<DecodedCall, DecodeError>,
    },
    /// Recipient, empty payload
    Transfer,
}

impl Inspector<'_> {
    /// Fetch a block and every transaction it references.
    ///
    /// A missing block ends the inspection with no further calls. A missing
    /// transaction is recorded and the loop moves on.
    pub async fn inspect_block(&self, number: u64) -> Result<BlockInspection> {
        let Some(block) = self.provider.get_block(number).await? else {
            tracing::debug!("Block {} not found", number);
            return Ok(BlockInspection::NotFound(number));
        };

        let mut transactions = Vec::with_capacity(block.transactions.len());
        for (idx, hash) in block.transactions.iter().enumerate() {
            let detail = match self.provider.get_transaction(*hash).await? {
                Some(tx) => {
                    let kind = self.classify(&tx).await?;
                    Some((tx, kind))
                }
                None => {
                    tracing::debug!("Transaction {} not found", hash);
                    None
                }
            };
            transactions.push(TransactionEntry {
                position: idx + 1,
                hash: *hash,
                detail,
            });
        }

        Ok(BlockInspection::Found(BlockView {
            block,
            transactions,
        }))
    }

    async fn classify(&self, tx: &RawTransaction) -> Result<TransactionKind> {
        if tx.is_contract_creation() {
            let receipt = self.provider.get_receipt(tx.hash).await?;
            return Ok(TransactionKind::ContractCreation {
                contract_address: receipt.and_then(|r| r.contract_address),
            });
        }

        if tx.input.is_empty() {
            return Ok(TransactionKind::Transfer);
        }

        let decoded = self.decoder.decode(&tx.input);
        if let Err(err) = &decoded {
            tracing::debug!("Payload of {} not decodable: {}", tx.hash, err);
        }
        Ok(TransactionKind::Call { decoded })
    }
}

/// Render a block inspection
pub fn render_block(inspection: &BlockInspection, units: UnitFormat) -> Report {
    let view = match inspection {
        BlockInspection::NotFound(_) => return Report::new().text("Block not found"),
        BlockInspection::Found(view) => view,
    };
    let block = &view.block;

    let mut report = Report::new()
        .section(format!("Block Details (Block #{})", block.number))
        .add("Block Number", block.number)
        .add("Block Hash", block.hash)
        .add("Block Timestamp", format_local_time(block.timestamp))
        .add("Miner", block.miner)
        .add("Gas Limit", block.gas_limit)
        .add("Gas Used", block.gas_used)
        .add("Nonce", &block.nonce)
        .add("Base Fee", or_na(block.base_fee_per_gas))
        .add("Difficulty", or_na(block.difficulty));

    if view.transactions.is_empty() {
        return report.text("No transactions in this block.");
    }

    report = report.section("Transactions in this Block");
    for entry in &view.transactions {
        report = report.blank().text(format!(
            "Fetching details for transaction {} (hash: {})",
            entry.position, entry.hash
        ));
        report = match &entry.detail {
            Some((tx, kind)) => report.extend(render_entry(tx, kind, units)),
            None => report.text(format!("Transaction with hash {} not found.", entry.hash)),
        };
    }

    report
}

fn render_entry(tx: &RawTransaction, kind: &TransactionKind, units: UnitFormat) -> Report {
    let mut report = Report::new()
        .text(format!("Transaction Details (Hash: {}):", tx.hash))
        .add_at(1, "From", tx.from)
        .add_at(1, "To", recipient(tx));

    report = match units {
        UnitFormat::Human => report
            .add_at(1, "Value (in ether)", format_ether(tx.value))
            .add_at(1, "Gas Price (in Gwei)", or_na(tx.gas_price.map(format_gwei))),
        UnitFormat::Raw => report
            .add_at(1, "Value (in wei)", tx.value)
            .add_at(1, "Gas Price", or_na(tx.gas_price)),
    };

    report = report.add_at(1, "Gas Limit", tx.gas).add_at(1, "Nonce", tx.nonce);

    if units == UnitFormat::Raw {
        report = report.add_at(1, "Input Data", hex_payload(&tx.input));
    }

    match kind {
        TransactionKind::ContractCreation { contract_address } => {
            report = report.add_at(1, "Contract Creation", "Contract is being deployed.");
            match contract_address {
                Some(address) => report.add_at(1, "Contract Address", address),
                None => report.text_at(1, "No contract address found."),
            }
        }
        TransactionKind::Call { decoded: Ok(call) } => {
            report = report.text_at(1, "Input Data (Decoded):");
            for arg in &call.arguments {
                report = report.add_at(2, capitalize(&arg.name), &arg.value);
            }
            report
        }
        TransactionKind::Call { decoded: Err(err) } => report
            .text_at(1, "Input Data (Decoded):")
            .add_at(2, "Input Data cannot be decoded", err),
        TransactionKind::Transfer => report.add_at(1, "Input Data", "No contract data"),
    }
}

pub(crate) fn recipient(tx: &RawTransaction) -> String {
    match tx.to {
        Some(to) => to.to_string(),
        None => "None (contract creation)".to_string(),
    }
}

pub(crate) fn hex_payload(input: &[u8]) -> String {
    format!("0x{}", hex::encode(input))
}

pub(crate) fn or_na<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "N/A".to_string())
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
