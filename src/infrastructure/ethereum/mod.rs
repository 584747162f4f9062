//! Ethereum infrastructure - Alloy provider and connector

mod connector;
mod provider;

pub use connector::{connect, parse_signer, verify_chain_id, Account, Connection};
pub use provider::{
    parse_hex_u256, parse_hex_u64, parse_raw_block, parse_raw_receipt, parse_raw_transaction,
    AlloyProvider, ChainProvider,
};
