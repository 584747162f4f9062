//! Network profiles and artifact search paths

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "BLOCKPROBE_CONFIG";

/// Environment variable holding a signing key that takes precedence over
/// the profile's `accounts`
pub const PRIVATE_KEY_ENV: &str = "BLOCKPROBE_PRIVATE_KEY";

const DEFAULT_NETWORK: &str = "besu";

/// A named network: one endpoint, its expected chain ID and signing keys
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct NetworkProfile {
    #[serde(skip)]
    pub name: String,
    pub url: String,
    pub chain_id: u64,
    #[serde(default)]
    pub accounts: Vec<String>,
}

impl NetworkProfile {
    /// The key the connector signs with: the first configured account
    pub fn signing_key(&self) -> Result<&str, ConfigError> {
        self.accounts
            .iter()
            .map(|key| key.trim())
            .find(|key| !key.is_empty())
            .ok_or_else(|| ConfigError::MissingSigningKey(self.name.clone()))
    }

    /// Put `key` ahead of the configured accounts
    pub fn with_signing_key(mut self, key: impl Into<String>) -> Self {
        self.accounts.insert(0, key.into());
        self
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_network")]
    pub default_network: String,

    #[serde(default)]
    pub networks: BTreeMap<String, NetworkProfile>,

    #[serde(default = "default_artifact_paths")]
    pub artifact_paths: Vec<PathBuf>,
}

fn default_network() -> String {
    DEFAULT_NETWORK.to_string()
}

fn default_artifact_paths() -> Vec<PathBuf> {
    vec![PathBuf::from("artifacts"), PathBuf::from("out")]
}

fn builtin_besu() -> NetworkProfile {
    NetworkProfile {
        name: DEFAULT_NETWORK.to_string(),
        url: "http://127.0.0.1:8546".to_string(),
        chain_id: 1337,
        accounts: Vec::new(),
    }
}

impl Default for Config {
    fn default() -> Self {
        let mut networks = BTreeMap::new();
        networks.insert(DEFAULT_NETWORK.to_string(), builtin_besu());
        Self {
            default_network: default_network(),
            networks,
            artifact_paths: default_artifact_paths(),
        }
    }
}

impl Config {
    /// Parse a config document. `path` is only used for error messages.
    pub fn from_toml_str(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let mut config: Config = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        for (name, profile) in config.networks.iter_mut() {
            profile.name = name.clone();
        }
        config
            .networks
            .entry(DEFAULT_NETWORK.to_string())
            .or_insert_with(builtin_besu);
        Ok(config)
    }

    /// Resolve a profile by name, falling back to `default_network`
    pub fn profile(&self, name: Option<&str>) -> Result<NetworkProfile, ConfigError> {
        let name = name.unwrap_or(&self.default_network);
        self.networks
            .get(name)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownNetwork {
                name: name.to_string(),
                available: self.networks.keys().cloned().collect::<Vec<_>>().join(", "),
            })
    }
}

/// Load configuration.
///
/// An explicit path (flag or env var) must exist and parse. The implicit
/// locations are optional and fall back to built-in defaults.
pub fn load(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    let explicit = explicit
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

    if let Some(path) = explicit {
        return read(&path);
    }

    match config_path() {
        Some(path) if path.is_file() => read(&path),
        _ => Ok(Config::default()),
    }
}

fn read(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("Loaded config from {}", path.display());
    Config::from_toml_str(&content, path)
}

/// First existing implicit config location
pub fn config_path() -> Option<PathBuf> {
    let local = PathBuf::from("blockprobe.toml");
    if local.is_file() {
        return Some(local);
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        let path = xdg.join("blockprobe").join("config.toml");
        if path.is_file() {
            return Some(path);
        }
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        let path = home.join(".config").join("blockprobe").join("config.toml");
        if path.is_file() {
            return Some(path);
        }
    }

    directories::ProjectDirs::from("io", "blockprobe", "blockprobe")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}
