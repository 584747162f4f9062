//! Block and transaction inspection
//!
//! Inspection fetches into view values first and renders them separately.
//! Fetches are strictly sequential: each request is awaited before the
//! next is issued, so the transaction list keeps the block's order.

mod block;
mod transaction;

pub use block::{render_block, BlockInspection, BlockView, TransactionEntry, TransactionKind};
pub use transaction::{render_transaction, NodeContext, TransactionInspection, TransactionView};

use crate::domain::abi::CalldataDecoder;
use crate::infrastructure::ChainProvider;

/// Read-only façade over a chain provider
pub struct Inspector<'a> {
    provider: &'a dyn ChainProvider,
    decoder: &'a dyn CalldataDecoder,
    /// Chain ID already verified on connect; skips `eth_chainId` when set
    chain_id: Option<u64>,
}

impl<'a> Inspector<'a> {
    /// `decoder` is used for the best-effort decode of call payloads
    pub fn new(provider: &'a dyn ChainProvider, decoder: &'a dyn CalldataDecoder) -> Self {
        Self {
            provider,
            decoder,
            chain_id: None,
        }
    }

    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = Some(chain_id);
        self
    }
}
