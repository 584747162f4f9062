//! blockprobe - inspect blocks and transactions on an Ethereum-compatible
//! node over JSON-RPC, and deploy a compiled contract.
//!
//! The library is a thin façade: [`infrastructure::connect`] opens a
//! provider for a [`config::NetworkProfile`], [`modules::Inspector`] reads
//! and normalizes chain data, [`modules::Deployer`] submits one contract
//! creation and reports on its confirmation.

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod modules;

pub use config::{Config, NetworkProfile};
pub use domain::{DeploymentResult, RawBlock, RawReceipt, RawTransaction, UnitFormat};
pub use error::{ConfigError, ConnectError, DecodeError, DeployError};
pub use infrastructure::{connect, AlloyProvider, ChainProvider, Connection};
pub use modules::{Deployer, Inspector, Report};
