//! Provider connector: one configured endpoint plus the signing account

use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::providers::{Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;

use super::provider::{AlloyProvider, ChainProvider};
use crate::config::NetworkProfile;
use crate::error::ConnectError;

/// The sending account exposed by a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Account {
    pub address: Address,
}

/// An open provider session on a verified chain
pub struct Connection {
    pub provider: AlloyProvider,
    pub account: Account,
    pub chain_id: u64,
}

/// Parse a hex private key into a local signer
pub fn parse_signer(key: &str) -> Result<PrivateKeySigner, ConnectError> {
    key.trim()
        .parse::<PrivateKeySigner>()
        .map_err(|e| ConnectError::InvalidSigningKey(e.to_string()))
}

/// Connect to the profile's endpoint and verify its chain ID.
///
/// The transport follows the URL (http(s), ws(s), IPC path). Failure is
/// returned as-is; nothing is retried.
pub async fn connect(profile: &NetworkProfile) -> Result<Connection, ConnectError> {
    let url = profile.url.trim();
    if url.is_empty() {
        return Err(ConnectError::InvalidEndpoint(profile.url.clone()));
    }

    let signer = parse_signer(profile.signing_key()?)?;
    let account = Account {
        address: signer.address(),
    };

    let provider = ProviderBuilder::new()
        .wallet(EthereumWallet::from(signer))
        .connect(url)
        .await
        .map_err(|e| ConnectError::Unreachable {
            endpoint: url.to_string(),
            message: e.to_string(),
        })?
        .erased();
    let provider = AlloyProvider::new(provider, url);

    let actual = provider
        .chain_id()
        .await
        .map_err(|e| ConnectError::Unreachable {
            endpoint: url.to_string(),
            message: format!("{:#}", e),
        })?;
    verify_chain_id(profile.chain_id, actual)?;

    tracing::info!(
        "Connected to {} ({}, chain {}) as {}",
        profile.name,
        provider.endpoint_name(),
        actual,
        account.address
    );

    Ok(Connection {
        provider,
        account,
        chain_id: actual,
    })
}

pub fn verify_chain_id(expected: u64, actual: u64) -> Result<(), ConnectError> {
    if expected != actual {
        return Err(ConnectError::ChainIdMismatch { expected, actual });
    }
    Ok(())
}
