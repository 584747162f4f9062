//! Calldata decoder implementation using alloy-dyn-abi

use alloy_dyn_abi::{DynSolType, DynSolValue};

use crate::domain::abi::{CalldataDecoder, DecodedArg, DecodedCall, ParamSpec};
use crate::error::DecodeError;

/// Decodes a payload against a fixed, assumed parameter list.
///
/// There is no selector lookup: the whole payload is read as the
/// ABI-encoded parameter tuple, so ordinary calldata usually fails.
pub struct AlloyAbiDecoder {
    params: Vec<ParamSpec>,
}

impl AlloyAbiDecoder {
    pub fn new(params: Vec<ParamSpec>) -> Self {
        Self { params }
    }

    /// The `(address, uint256)` shape used for the inspector's best-effort decode
    pub fn address_uint256() -> Self {
        Self::new(vec![
            ParamSpec::new("address", "address"),
            ParamSpec::new("value", "uint256"),
        ])
    }

    fn types(&self) -> Result<Vec<DynSolType>, DecodeError> {
        self.params
            .iter()
            .map(|param| {
                param
                    .kind
                    .parse::<DynSolType>()
                    .map_err(|e| DecodeError::InvalidType {
                        kind: param.kind.clone(),
                        message: e.to_string(),
                    })
            })
            .collect()
    }
}

impl CalldataDecoder for AlloyAbiDecoder {
    fn decode(&self, input: &[u8]) -> Result<DecodedCall, DecodeError> {
        let types = self.types()?;
        let decoded_values = if types.is_empty() {
            Vec::new()
        } else {
            let decoded = DynSolType::Tuple(types)
                .abi_decode_params(input)
                .map_err(|e| DecodeError::Abi(e.to_string()))?;
            match decoded {
                DynSolValue::Tuple(values) => values,
                other => vec![other],
            }
        };

        let arguments = self
            .params
            .iter()
            .zip(decoded_values.iter())
            .enumerate()
            .map(|(idx, (param, value))| DecodedArg {
                name: if param.name.trim().is_empty() {
                    format!("arg{}", idx)
                } else {
                    param.name.clone()
                },
                kind: param.kind.clone(),
                value: format_dyn_sol_value(value),
            })
            .collect();

        Ok(DecodedCall { arguments })
    }
}

/// Format a DynSolValue for display
pub fn format_dyn_sol_value(value: &DynSolValue) -> String {
    match value {
        DynSolValue::Bool(b) => b.to_string(),
        DynSolValue::Int(i, _) => i.to_string(),
        DynSolValue::Uint(u, _) => u.to_string(),
        DynSolValue::FixedBytes(word, size) => {
            let bytes = &word.as_slice()[..(*size).min(32)];
            format!("0x{}", hex::encode(bytes))
        }
        DynSolValue::Address(addr) => addr.to_checksum(None),
        DynSolValue::Function(func) => format!("0x{}", hex::encode(func.as_slice())),
        DynSolValue::Bytes(bytes) => format!("0x{}", hex::encode(bytes)),
        DynSolValue::String(s) => s.clone(),
        DynSolValue::Array(arr) | DynSolValue::FixedArray(arr) => {
            let items: Vec<String> = arr.iter().map(format_dyn_sol_value).collect();
            format!("[{}]", items.join(", "))
        }
        DynSolValue::Tuple(fields) => {
            let items: Vec<String> = fields.iter().map(format_dyn_sol_value).collect();
            format!("({})", items.join(", "))
        }
    }
}
