//! Error types for blockprobe
//!
//! Not-found outcomes are not errors: lookups return `Option` and the
//! inspector reports them. Everything here is fatal to the command except
//! [`DecodeError`], which the inspector reports and moves past.

use std::path::PathBuf;

use thiserror::Error;

/// Configuration loading and profile resolution errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("unknown network '{name}' (configured: {available})")]
    UnknownNetwork { name: String, available: String },

    #[error("no signing key configured for network '{0}'")]
    MissingSigningKey(String),
}

/// Provider connection errors
#[derive(Error, Debug)]
pub enum ConnectError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid endpoint URL '{0}'")]
    InvalidEndpoint(String),

    #[error("invalid signing key: {0}")]
    InvalidSigningKey(String),

    #[error("cannot reach {endpoint}: {message}")]
    Unreachable { endpoint: String, message: String },

    #[error("chain ID mismatch: profile expects {expected}, endpoint reports {actual}")]
    ChainIdMismatch { expected: u64, actual: u64 },
}

/// Calldata decode failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("invalid type '{kind}': {message}")]
    InvalidType { kind: String, message: String },

    #[error("{0}")]
    Abi(String),
}

/// Contract deployment errors
#[derive(Error, Debug)]
pub enum DeployError {
    #[error("unknown contract template '{name}' (available: {available})")]
    UnknownTemplate { name: String, available: String },

    #[error("contract template '{0}' has no deployable bytecode")]
    MissingBytecode(String),

    #[error("constructor of '{template}' takes {expected} argument(s), got {got}")]
    ConstructorArity {
        template: String,
        expected: usize,
        got: usize,
    },

    #[error("constructor argument {index} ('{value}') is not a valid {kind}: {message}")]
    ConstructorArg {
        index: usize,
        kind: String,
        value: String,
        message: String,
    },

    #[error("deployment transaction {0} reverted")]
    Reverted(String),

    #[error("receipt for deployment transaction {0} carries no contract address")]
    MissingContractAddress(String),

    #[error("receipt for deployment transaction {0} not available after confirmation")]
    MissingReceipt(String),
}
