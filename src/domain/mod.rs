//! Domain layer - chain records, ABI models and formatting

pub mod abi;
pub mod chain;
pub mod units;

pub use chain::{network_name, DeploymentResult, RawBlock, RawReceipt, RawTransaction};
pub use units::UnitFormat;
