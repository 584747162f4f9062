//! Contract deployment from a compiled template

use alloy::primitives::{Address, Bytes, U256};
use alloy_dyn_abi::DynSolValue;
use anyhow::Result;

use crate::domain::abi::{ArtifactRegistry, ParamSpec};
use crate::domain::DeploymentResult;
use crate::error::DeployError;
use crate::infrastructure::abi::{deployment_code, format_dyn_sol_value};
use crate::infrastructure::ChainProvider;
use crate::modules::report::Report;

/// A validated deployment, ready to submit
#[derive(Debug, Clone, PartialEq)]
pub struct DeploymentPlan {
    pub template: String,
    pub params: Vec<ParamSpec>,
    pub args: Vec<DynSolValue>,
    /// Creation bytecode plus encoded constructor arguments
    pub code: Bytes,
}

pub struct Deployer<'a> {
    provider: &'a dyn ChainProvider,
    account: Address,
    registry: &'a ArtifactRegistry,
}

impl<'a> Deployer<'a> {
    pub fn new(
        provider: &'a dyn ChainProvider,
        account: Address,
        registry: &'a ArtifactRegistry,
    ) -> Self {
        Self {
            provider,
            account,
            registry,
        }
    }

    /// See [`prepare_deployment`]
    pub fn prepare(&self, template: &str, args: &[String]) -> Result<DeploymentPlan, DeployError> {
        prepare_deployment(self.registry, template, args)
    }

    /// Address the next creation from this account will land at
    pub async fn predicted_address(&self) -> Result<Address> {
        let nonce = self.provider.transaction_count(self.account).await?;
        Ok(self.account.create(nonce))
    }

    /// Submit the plan, wait for one confirmation and read back the receipt
    pub async fn submit(&self, plan: &DeploymentPlan) -> Result<DeploymentResult> {
        let tx_hash = self.provider.deploy(self.account, plan.code.clone()).await?;

        let receipt = self
            .provider
            .get_receipt(tx_hash)
            .await?
            .ok_or_else(|| DeployError::MissingReceipt(tx_hash.to_string()))?;
        if !receipt.status {
            return Err(DeployError::Reverted(tx_hash.to_string()).into());
        }
        let contract_address = receipt
            .contract_address
            .ok_or_else(|| DeployError::MissingContractAddress(tx_hash.to_string()))?;

        // Older nodes omit effectiveGasPrice; the legacy gas price is exact there
        let effective_gas_price = match receipt.effective_gas_price {
            Some(price) => price,
            None => self
                .provider
                .get_transaction(tx_hash)
                .await?
                .and_then(|tx| tx.gas_price)
                .unwrap_or(U256::ZERO),
        };

        Ok(DeploymentResult {
            transaction_hash: tx_hash,
            block_number: receipt.block_number,
            block_hash: receipt.block_hash,
            gas_used: receipt.gas_used,
            effective_gas_price,
            contract_address,
            deployer: self.account,
        })
    }

    /// Prepare and submit in one step
    pub async fn deploy(&self, template: &str, args: &[String]) -> Result<DeploymentResult> {
        let plan = self.prepare(template, args)?;
        self.submit(&plan).await
    }
}

/// Resolve the template and encode its constructor arguments.
///
/// No network access: a bad template or argument list fails here.
pub fn prepare_deployment(
    registry: &ArtifactRegistry,
    template: &str,
    args: &[String],
) -> Result<DeploymentPlan, DeployError> {
    let artifact = registry
        .lookup(template)
        .ok_or_else(|| DeployError::UnknownTemplate {
            name: template.to_string(),
            available: available(registry),
        })?;

    let (code, values) = deployment_code(artifact, args)?;
    tracing::debug!(
        "Prepared {} from {} ({} bytes of init code)",
        template,
        artifact.source.display(),
        code.len()
    );

    Ok(DeploymentPlan {
        template: template.to_string(),
        params: artifact.constructor_params(),
        args: values,
        code,
    })
}

fn available(registry: &ArtifactRegistry) -> String {
    if registry.is_empty() {
        "none; compile the contracts first".to_string()
    } else {
        registry.names().collect::<Vec<_>>().join(", ")
    }
}

/// Constructor arguments, one line each
pub fn render_plan(plan: &DeploymentPlan) -> Report {
    let mut report = Report::new().section("Contract Parameters");
    if plan.args.is_empty() {
        return report.text("No constructor arguments");
    }
    for (idx, (param, value)) in plan.params.iter().zip(plan.args.iter()).enumerate() {
        report = report.add(
            format!("Constructor Argument {} ({})", idx + 1, param.kind),
            format_dyn_sol_value(value),
        );
    }
    report
}

pub fn render_result(result: &DeploymentResult) -> Report {
    Report::new()
        .section("Deployment Transaction Details")
        .add("Transaction Hash", result.transaction_hash)
        .add("Block Number", result.block_number)
        .add("Gas Used", result.gas_used)
        .add("Gas Price", result.effective_gas_price)
        .add("Block Hash", result.block_hash)
        .add("Contract Address", result.contract_address)
        .add("Deployed By", result.deployer)
}
