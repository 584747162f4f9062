//! ABI domain models and contracts
//!
//! This module defines the traits and types for calldata decoding and the
//! contract template registry, independent of alloy-dyn-abi.

mod decoder;
mod registry;

pub use decoder::{CalldataDecoder, DecodedArg, DecodedCall, ParamSpec};
pub use registry::{ArtifactRegistry, ContractArtifact};
