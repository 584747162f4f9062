//! Constructor argument encoding for contract deployment

use alloy::primitives::Bytes;
use alloy_dyn_abi::{DynSolType, DynSolValue};

use crate::domain::abi::{ContractArtifact, ParamSpec};
use crate::error::DeployError;

/// Coerce positional string arguments to the constructor's parameter types.
///
/// `string` parameters take the argument verbatim; every other type goes
/// through alloy-dyn-abi's string coercion.
pub fn coerce_constructor_args(
    template: &str,
    params: &[ParamSpec],
    args: &[String],
) -> Result<Vec<DynSolValue>, DeployError> {
    if args.len() != params.len() {
        return Err(DeployError::ConstructorArity {
            template: template.to_string(),
            expected: params.len(),
            got: args.len(),
        });
    }

    params
        .iter()
        .zip(args.iter())
        .enumerate()
        .map(|(i, (param, arg))| {
            let arg_error = |message: String| DeployError::ConstructorArg {
                index: i + 1,
                kind: param.kind.clone(),
                value: arg.clone(),
                message,
            };

            let ty = DynSolType::parse(&param.kind).map_err(|e| arg_error(e.to_string()))?;
            match ty {
                DynSolType::String => Ok(DynSolValue::String(arg.clone())),
                ty => ty.coerce_str(arg).map_err(|e| arg_error(e.to_string())),
            }
        })
        .collect()
}

/// Creation bytecode followed by the ABI-encoded constructor parameters
pub fn deployment_code(
    artifact: &ContractArtifact,
    args: &[String],
) -> Result<(Bytes, Vec<DynSolValue>), DeployError> {
    if !artifact.is_deployable() {
        return Err(DeployError::MissingBytecode(artifact.name.clone()));
    }

    let params = artifact.constructor_params();
    let values = coerce_constructor_args(&artifact.name, &params, args)?;

    let mut code = artifact.bytecode.to_vec();
    if !values.is_empty() {
        code.extend_from_slice(&DynSolValue::Tuple(values.clone()).abi_encode_params());
    }

    Ok((Bytes::from(code), values))
}
