//! Contract template registry - compiled artifacts indexed by contract name

use std::collections::BTreeMap;
use std::path::PathBuf;

use alloy_primitives::Bytes;
use alloy_json_abi::JsonAbi;

use super::ParamSpec;

/// A compiled contract: ABI plus creation bytecode
#[derive(Debug, Clone)]
pub struct ContractArtifact {
    /// Contract name (e.g., "MyContract")
    pub name: String,
    pub abi: JsonAbi,
    /// Creation bytecode; empty for interfaces and abstract contracts
    pub bytecode: Bytes,
    /// Artifact file this was loaded from
    pub source: PathBuf,
}

impl ContractArtifact {
    /// Constructor inputs, empty when the contract declares no constructor
    pub fn constructor_params(&self) -> Vec<ParamSpec> {
        self.abi
            .constructor()
            .map(|ctor| {
                ctor.inputs
                    .iter()
                    .map(|input| ParamSpec::new(input.name.clone(), input.selector_type()))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn is_deployable(&self) -> bool {
        !self.bytecode.is_empty()
    }
}

/// Registry of contract artifacts indexed by name
#[derive(Debug, Default, Clone)]
pub struct ArtifactRegistry {
    artifacts: BTreeMap<String, ContractArtifact>,
    /// Number of files scanned
    pub scanned_files: usize,
    /// Scan errors
    pub errors: Vec<String>,
    /// Scan duration in milliseconds
    pub scan_ms: u128,
}

impl ArtifactRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an artifact
    ///
    /// Note: First artifact for a given name wins (no overwrite)
    pub fn insert(&mut self, artifact: ContractArtifact) {
        self.artifacts.entry(artifact.name.clone()).or_insert(artifact);
    }

    pub fn lookup(&self, name: &str) -> Option<&ContractArtifact> {
        self.artifacts.get(name)
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    /// Merge another registry into this one (first wins)
    pub fn merge(&mut self, other: Self) {
        self.scanned_files = self.scanned_files.saturating_add(other.scanned_files);
        self.errors.extend(other.errors);
        for (name, artifact) in other.artifacts {
            self.artifacts.entry(name).or_insert(artifact);
        }
    }

    /// Registered contract names, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.artifacts.keys().map(String::as_str)
    }
}
