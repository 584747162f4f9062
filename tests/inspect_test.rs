//! Block and transaction inspection against an in-memory provider

mod common;

use alloy::primitives::{Address, Bytes, B256, U256};
use alloy_sol_types::SolValue;

use blockprobe::domain::UnitFormat;
use blockprobe::infrastructure::AlloyAbiDecoder;
use blockprobe::modules::inspect::{
    render_block, render_transaction, BlockInspection, TransactionInspection, TransactionKind,
};
use blockprobe::Inspector;

use common::{block, receipt, transaction, CountingDecoder, MockProvider};

/// A bare `(address, uint256)` tuple, the shape the inspector decodes
fn address_amount(to: Address, amount: u64) -> Bytes {
    (to, U256::from(amount)).abi_encode_params().into()
}

#[tokio::test]
async fn test_empty_block() {
    let provider = MockProvider::new(1337).with_block(block(1174, vec![]));
    let decoder = AlloyAbiDecoder::address_uint256();
    let inspector = Inspector::new(&provider, &decoder);

    let inspection = inspector.inspect_block(1174).await.unwrap();
    let rendered = render_block(&inspection, UnitFormat::Human).to_string();

    assert!(rendered.contains("Block Details (Block #1174):"));
    assert!(rendered.ends_with("No transactions in this block.\n"));
    assert_eq!(provider.calls(), vec!["get_block"]);
}

#[tokio::test]
async fn test_block_not_found_stops() {
    let provider = MockProvider::new(1337).with_block(block(1174, vec![]));
    let decoder = AlloyAbiDecoder::address_uint256();
    let inspector = Inspector::new(&provider, &decoder);

    let inspection = inspector.inspect_block(99_999).await.unwrap();
    assert_eq!(inspection, BlockInspection::NotFound(99_999));
    assert_eq!(
        render_block(&inspection, UnitFormat::Raw).to_string(),
        "Block not found\n"
    );
    assert_eq!(provider.calls(), vec!["get_block"]);
}

#[tokio::test]
async fn test_block_with_mixed_transactions() {
    let creation = B256::repeat_byte(0x01);
    let call = B256::repeat_byte(0x02);
    let garbled = B256::repeat_byte(0x03);
    let transfer = B256::repeat_byte(0x04);
    let missing = B256::repeat_byte(0x05);

    let deployed = Address::repeat_byte(0x44);
    let token = Address::repeat_byte(0x55);
    let beneficiary: Address = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8".parse().unwrap();

    let provider = MockProvider::new(1337)
        .with_block(block(
            1174,
            vec![creation, call, garbled, transfer, missing],
        ))
        .with_transaction(transaction(
            creation,
            None,
            Bytes::from_static(&[0x60, 0x80]),
        ))
        .with_receipt(receipt(creation, Some(deployed)))
        .with_transaction(transaction(
            call,
            Some(token),
            address_amount(beneficiary, 1000),
        ))
        .with_transaction(transaction(
            garbled,
            Some(token),
            Bytes::from_static(&[0x12, 0x34]),
        ))
        .with_transaction(transaction(transfer, Some(beneficiary), Bytes::new()));
    let decoder = CountingDecoder::new();
    let inspector = Inspector::new(&provider, &decoder);

    let inspection = inspector.inspect_block(1174).await.unwrap();

    // One decode per call with a payload; none for the creation or the transfer
    assert_eq!(decoder.attempts(), 2);

    // One receipt lookup, for the contract creation only
    assert_eq!(
        provider.calls(),
        vec![
            "get_block",
            "get_transaction",
            "get_receipt",
            "get_transaction",
            "get_transaction",
            "get_transaction",
            "get_transaction",
        ]
    );

    let BlockInspection::Found(view) = &inspection else {
        panic!("block should be found");
    };
    let hashes: Vec<B256> = view.transactions.iter().map(|e| e.hash).collect();
    assert_eq!(hashes, vec![creation, call, garbled, transfer, missing]);
    assert!(matches!(
        view.transactions[0].detail,
        Some((_, TransactionKind::ContractCreation { contract_address: Some(addr) })) if addr == deployed
    ));
    assert!(matches!(
        view.transactions[2].detail,
        Some((_, TransactionKind::Call { decoded: Err(_) }))
    ));
    assert!(matches!(
        view.transactions[3].detail,
        Some((_, TransactionKind::Transfer))
    ));
    assert!(view.transactions[4].detail.is_none());

    let rendered = render_block(&inspection, UnitFormat::Human).to_string();
    assert!(rendered.contains("Transactions in this Block:"));
    assert!(rendered.contains(&format!("  Contract Address: {}\n", deployed)));
    assert!(rendered.contains(&format!("    Address: {}\n", beneficiary)));
    assert!(rendered.contains("    Value: 1000\n"));
    assert!(rendered.contains("    Input Data cannot be decoded: "));
    assert!(rendered.contains("  Input Data: No contract data\n"));
    assert!(rendered.contains("  Value (in ether): 1.0\n"));
    assert!(rendered.contains(&format!("Transaction with hash {} not found.\n", missing)));

    // Decode failure does not cut the listing short
    let garbled_at = rendered
        .find(&format!("(hash: {})", garbled))
        .unwrap();
    let transfer_at = rendered
        .find(&format!("(hash: {})", transfer))
        .unwrap();
    assert!(garbled_at < transfer_at);
}

#[tokio::test]
async fn test_transaction_not_found_stops() {
    let provider = MockProvider::new(1337).with_block(block(1174, vec![]));
    let decoder = AlloyAbiDecoder::address_uint256();
    let inspector = Inspector::new(&provider, &decoder);

    let hash = B256::repeat_byte(0x09);
    let inspection = inspector.inspect_transaction(hash).await.unwrap();

    assert_eq!(inspection, TransactionInspection::NotFound(hash));
    assert_eq!(
        render_transaction(&inspection).to_string(),
        "Transaction not found\n"
    );
    assert_eq!(provider.calls(), vec!["get_transaction"]);
}

#[tokio::test]
async fn test_transaction_without_receipt() {
    let hash = B256::repeat_byte(0x09);
    let provider = MockProvider::new(1337)
        .with_block(block(1174, vec![hash]))
        .with_transaction(transaction(hash, Some(Address::repeat_byte(0x33)), Bytes::new()));
    let decoder = AlloyAbiDecoder::address_uint256();
    let inspector = Inspector::new(&provider, &decoder);

    let inspection = inspector.inspect_transaction(hash).await.unwrap();
    assert!(matches!(inspection, TransactionInspection::ReceiptMissing(_)));
    assert_eq!(provider.calls(), vec!["get_transaction", "get_receipt"]);

    let rendered = render_transaction(&inspection).to_string();
    assert!(rendered.contains("Transaction Details:"));
    assert!(rendered.ends_with("Receipt not found\n"));
}

#[tokio::test]
async fn test_transaction_with_node_context() {
    let hash = B256::repeat_byte(0x09);
    let provider = MockProvider::new(31337)
        .with_block(block(1174, vec![hash]))
        .with_block(block(1180, vec![]))
        .with_transaction(transaction(hash, Some(Address::repeat_byte(0x33)), Bytes::new()))
        .with_receipt(receipt(hash, None));
    let decoder = AlloyAbiDecoder::address_uint256();
    let inspector = Inspector::new(&provider, &decoder);

    let inspection = inspector.inspect_transaction(hash).await.unwrap();
    assert_eq!(
        provider.calls(),
        vec![
            "get_transaction",
            "get_receipt",
            "chain_id",
            "client_version",
            "latest_block",
            "peer_count",
        ]
    );

    let TransactionInspection::Found(view) = &inspection else {
        panic!("transaction should be found");
    };
    assert_eq!(view.node.chain_id, 31337);
    assert_eq!(view.node.network_name, "hardhat");
    assert_eq!(view.node.latest_block.number, 1180);

    let rendered = render_transaction(&inspection).to_string();
    assert!(rendered.contains("Value (in wei): 1000000000000000000\n"));
    assert!(rendered.contains("Data (Payload): 0x\n"));
    assert!(rendered.contains("Status: Success\n"));
    assert!(rendered.contains("Logs: 1\n"));
    assert!(rendered.contains("Network Name: hardhat\n"));
    assert!(rendered.contains("Network Chain ID: 31337\n"));
    assert!(rendered.contains(&format!("Node Version: {}\n", common::CLIENT_VERSION)));
    assert!(rendered.contains("Block Timestamp: 2024-01-01T00:00:00.000Z\n"));
    assert!(rendered.ends_with("Node Peer Count: 0x19 (25)\n"));
}

#[tokio::test]
async fn test_decode_only_for_calls_with_payload() {
    let creation = B256::repeat_byte(0x01);
    let transfer = B256::repeat_byte(0x02);
    let provider = MockProvider::new(1337)
        .with_block(block(1174, vec![creation, transfer]))
        .with_transaction(transaction(creation, None, Bytes::from_static(&[0x60, 0x80])))
        .with_receipt(receipt(creation, None))
        .with_transaction(transaction(transfer, Some(Address::repeat_byte(0x33)), Bytes::new()));
    let decoder = CountingDecoder::new();
    let inspector = Inspector::new(&provider, &decoder);

    let inspection = inspector.inspect_block(1174).await.unwrap();
    let rendered = render_block(&inspection, UnitFormat::Human).to_string();
    assert!(rendered.contains("  No contract address found.\n"));
    assert_eq!(decoder.attempts(), 0);
}

#[tokio::test]
async fn test_known_chain_id_skips_lookup() {
    let hash = B256::repeat_byte(0x09);
    let provider = MockProvider::new(1337)
        .with_block(block(1174, vec![hash]))
        .with_transaction(transaction(hash, Some(Address::repeat_byte(0x33)), Bytes::new()))
        .with_receipt(receipt(hash, None));
    let decoder = AlloyAbiDecoder::address_uint256();
    let inspector = Inspector::new(&provider, &decoder).with_chain_id(11155111);

    let inspection = inspector.inspect_transaction(hash).await.unwrap();
    assert_eq!(provider.call_count("chain_id"), 0);

    let TransactionInspection::Found(view) = &inspection else {
        panic!("transaction should be found");
    };
    assert_eq!(view.node.chain_id, 11155111);
    assert_eq!(view.node.network_name, "sepolia");
}
