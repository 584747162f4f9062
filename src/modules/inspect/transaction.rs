//! Transaction inspection: transaction, receipt and node context

use alloy::primitives::B256;
use anyhow::Result;

use super::block::{hex_payload, or_na, recipient};
use super::Inspector;
use crate::domain::units::format_iso_time;
use crate::domain::{network_name, RawBlock, RawReceipt, RawTransaction};
use crate::infrastructure::ethereum::parse_hex_u64;
use crate::modules::report::Report;

#[derive(Debug, Clone, PartialEq)]
pub enum TransactionInspection {
    NotFound(B256),
    ReceiptMissing(RawTransaction),
    Found(TransactionView),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionView {
    pub transaction: RawTransaction,
    pub receipt: RawReceipt,
    pub node: NodeContext,
}

/// Ambient node state read alongside a transaction
#[derive(Debug, Clone, PartialEq)]
pub struct NodeContext {
    pub chain_id: u64,
    pub network_name: String,
    pub client_version: String,
    pub latest_block: RawBlock,
    /// Raw `net_peerCount` result
    pub peer_count: String,
}

impl Inspector<'_> {
    /// Fetch a transaction, its receipt and the node context.
    ///
    /// Stops after the first lookup that comes back empty. The chain ID is
    /// only requested when the inspector was not given one.
    pub async fn inspect_transaction(&self, hash: B256) -> Result<TransactionInspection> {
        let Some(transaction) = self.provider.get_transaction(hash).await? else {
            return Ok(TransactionInspection::NotFound(hash));
        };
        let Some(receipt) = self.provider.get_receipt(hash).await? else {
            return Ok(TransactionInspection::ReceiptMissing(transaction));
        };

        let chain_id = match self.chain_id {
            Some(id) => id,
            None => self.provider.chain_id().await?,
        };
        let client_version = self.provider.client_version().await?;
        let latest_block = self.provider.latest_block().await?;
        let peer_count = self.provider.peer_count().await?;

        Ok(TransactionInspection::Found(TransactionView {
            transaction,
            receipt,
            node: NodeContext {
                chain_id,
                network_name: network_name(chain_id).to_string(),
                client_version,
                latest_block,
                peer_count,
            },
        }))
    }
}

/// Render a transaction inspection
pub fn render_transaction(inspection: &TransactionInspection) -> Report {
    let view = match inspection {
        TransactionInspection::NotFound(_) => return Report::new().text("Transaction not found"),
        TransactionInspection::ReceiptMissing(tx) => {
            return render_details(tx).text("Receipt not found");
        }
        TransactionInspection::Found(view) => view,
    };

    let receipt = &view.receipt;
    let node = &view.node;
    let latest = &node.latest_block;

    let mut report = render_details(&view.transaction)
        .section("Transaction Receipt Details")
        .add("Block Number", receipt.block_number)
        .add("Block Hash", receipt.block_hash)
        .add("Gas Used", receipt.gas_used)
        .add("Status", if receipt.status { "Success" } else { "Failed" })
        .add("Logs", receipt.logs.len());
    for log in &receipt.logs {
        report = report.text_at(1, log.to_string());
    }

    report
        .section("Network Information")
        .add("Network Name", &node.network_name)
        .add("Network Chain ID", node.chain_id)
        .section("Node Information")
        .add("Node Version", &node.client_version)
        .section("Latest Block Information")
        .add("Block Number", latest.number)
        .add("Block Hash", latest.hash)
        .add("Block Timestamp", format_iso_time(latest.timestamp))
        .add("Miner", latest.miner)
        .add("Transactions in Block", latest.transactions.len())
        .blank()
        .add("Node Peer Count", peer_count(&node.peer_count))
}

fn render_details(tx: &RawTransaction) -> Report {
    Report::new()
        .section("Transaction Details")
        .add("Transaction Hash", tx.hash)
        .add("From", tx.from)
        .add("To", recipient(tx))
        .add("Value (in wei)", tx.value)
        .add("Gas Limit", tx.gas)
        .add("Gas Price", or_na(tx.gas_price))
        .add("Nonce", tx.nonce)
        .add(
            "Block Number",
            tx.block_number
                .map(|n| n.to_string())
                .unwrap_or_else(|| "pending".to_string()),
        )
        .add("Data (Payload)", hex_payload(&tx.input))
}

/// Raw peer count, with its decimal value when it is a hex quantity
fn peer_count(raw: &str) -> String {
    match raw.strip_prefix("0x").and_then(|_| parse_hex_u64(raw).ok()) {
        Some(count) => format!("{} ({})", raw, count),
        None => raw.to_string(),
    }
}
