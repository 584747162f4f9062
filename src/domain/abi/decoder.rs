//! Calldata decoder trait and types

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

/// A function parameter specification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamSpec {
    /// Parameter name (may be empty)
    pub name: String,
    /// Solidity type (e.g., "address", "uint256", "(uint256,address)")
    pub kind: String,
}

impl ParamSpec {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
        }
    }
}

/// A decoded argument
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedArg {
    /// Parameter name (or "arg{n}" if unnamed)
    pub name: String,
    /// Solidity type
    pub kind: String,
    /// Decoded value as a formatted string
    pub value: String,
}

/// Result of decoding a payload against a fixed parameter list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedCall {
    pub arguments: Vec<DecodedArg>,
}

impl DecodedCall {
    /// Look up a decoded argument by name
    pub fn arg(&self, name: &str) -> Option<&DecodedArg> {
        self.arguments.iter().find(|arg| arg.name == name)
    }
}

/// Best-effort payload decoding.
///
/// Failure is a value, not a fatal error: callers branch on the result
/// and keep going.
pub trait CalldataDecoder: Send + Sync {
    /// Decode a whole transaction input payload as the parameter tuple
    fn decode(&self, input: &[u8]) -> Result<DecodedCall, DecodeError>;
}
