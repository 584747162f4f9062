//! Command modules: inspection, deployment and their console reports

pub mod deploy;
pub mod inspect;
pub mod report;

pub use deploy::{prepare_deployment, Deployer, DeploymentPlan};
pub use inspect::Inspector;
pub use report::Report;
