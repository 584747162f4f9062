//! Artifact scanner - discovers compiled contracts (Hardhat / Foundry) on disk

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use alloy::primitives::Bytes;
use alloy_json_abi::JsonAbi;
use anyhow::Context;
use walkdir::WalkDir;

use crate::domain::abi::{ArtifactRegistry, ContractArtifact};

const MAX_ARTIFACT_BYTES: u64 = 5 * 1024 * 1024;

/// Artifact file scanner
pub struct ArtifactScanner;

impl ArtifactScanner {
    /// Scan a single root directory for artifact files
    pub fn scan(root: impl AsRef<Path>) -> ArtifactRegistry {
        let started = Instant::now();
        let root = root.as_ref();
        let mut registry = ArtifactRegistry::new();
        let mut scanned_files = 0;
        let mut errors = Vec::new();

        for entry in WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !Self::is_ignored_dir(e.path()))
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    errors.push(err.to_string());
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if !Self::is_artifact_file(path) {
                continue;
            }

            let metadata = match entry.metadata() {
                Ok(meta) => meta,
                Err(err) => {
                    errors.push(format!("{}: {}", path.display(), err));
                    continue;
                }
            };
            if metadata.len() > MAX_ARTIFACT_BYTES {
                continue;
            }

            scanned_files += 1;

            match Self::load_artifact_file(path) {
                Ok(Some(artifact)) => registry.insert(artifact),
                Ok(None) => {}
                Err(err) => errors.push(format!("{}: {:#}", path.display(), err)),
            }
        }

        registry.scanned_files = scanned_files;
        registry.errors = errors;
        registry.scan_ms = started.elapsed().as_millis();

        registry
    }

    /// Scan multiple root directories; missing roots are skipped
    pub fn scan_roots(roots: &[PathBuf]) -> ArtifactRegistry {
        let started = Instant::now();
        let mut registry = ArtifactRegistry::new();

        for root in roots.iter().filter(|root| root.exists()) {
            registry.merge(Self::scan(root));
        }

        registry.scan_ms = started.elapsed().as_millis();
        for err in &registry.errors {
            tracing::warn!("Artifact scan: {}", err);
        }
        tracing::debug!(
            "Loaded {} contract templates from {} files in {}ms",
            registry.len(),
            registry.scanned_files,
            registry.scan_ms
        );

        registry
    }

    /// Load a single artifact file. Files without an ABI are skipped.
    fn load_artifact_file(path: &Path) -> anyhow::Result<Option<ContractArtifact>> {
        let content = fs::read_to_string(path)?;
        let value: serde_json::Value = serde_json::from_str(&content)?;

        let Some(abi_value) = value.get("abi") else {
            return Ok(None);
        };
        let abi: JsonAbi = serde_json::from_value(abi_value.clone()).context("invalid ABI")?;

        // Hardhat names the contract; Foundry only via the file name
        let name = match value.get("contractName").and_then(|v| v.as_str()) {
            Some(name) => name.to_string(),
            None => match path.file_stem().and_then(|s| s.to_str()) {
                Some(stem) => stem.to_string(),
                None => return Ok(None),
            },
        };

        let bytecode = Self::extract_bytecode(&value)?;

        Ok(Some(ContractArtifact {
            name,
            abi,
            bytecode,
            source: path.to_path_buf(),
        }))
    }

    /// Hardhat stores `"bytecode": "0x.."`, Foundry `"bytecode": {"object": "0x.."}`
    fn extract_bytecode(value: &serde_json::Value) -> anyhow::Result<Bytes> {
        let hex_str = match value.get("bytecode") {
            Some(serde_json::Value::String(s)) => s.as_str(),
            Some(obj) => obj.get("object").and_then(|v| v.as_str()).unwrap_or("0x"),
            None => "0x",
        };
        let payload = hex_str.strip_prefix("0x").unwrap_or(hex_str);
        let bytes = hex::decode(payload).context("bytecode is not valid hex (unlinked library?)")?;
        Ok(Bytes::from(bytes))
    }

    fn is_artifact_file(path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        name.ends_with(".json") && !name.ends_with(".dbg.json")
    }

    /// Check if a path should be ignored
    fn is_ignored_dir(path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .map(|name| {
                matches!(
                    name,
                    ".git" | "target" | "node_modules" | "cache" | "build-info"
                )
            })
            .unwrap_or(false)
    }
}
