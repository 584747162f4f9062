//! Infrastructure layer - External service integrations
//!
//! This layer contains:
//! - The Alloy-based chain provider and connector
//! - ABI decoding, constructor encoding and artifact scanning using alloy-dyn-abi
pub mod abi;
pub mod ethereum;

pub use abi::{AlloyAbiDecoder, ArtifactScanner};
pub use ethereum::{connect, AlloyProvider, ChainProvider, Connection};
