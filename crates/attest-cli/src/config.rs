//! CLI configuration loading and management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use attest_issuer::IssuancePolicy;

/// Full configuration for the Attest CLI.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AttestConfig {
    /// Current identity settings.
    #[serde(default)]
    pub identity: IdentityConfig,

    /// Remote service endpoints.
    #[serde(default)]
    pub services: ServicesConfig,

    /// Local storage settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Policy constants carried by eligibility requests.
    #[serde(default)]
    pub policy: IssuancePolicy,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Identity the proof history is scoped to.
    #[serde(default = "default_identity")]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicesConfig {
    /// QR decode service endpoint.
    #[serde(default = "default_decode_endpoint")]
    pub decode_endpoint: String,
    /// Eligibility verification service base URL.
    #[serde(default = "default_verify_endpoint")]
    pub verify_endpoint: String,
    /// Shared document store base URL.
    #[serde(default = "default_document_store_endpoint")]
    pub document_store_endpoint: String,
    /// Per-call timeout for every remote service, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path to the local data directory.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_identity() -> String {
    "demo-subject".into()
}
fn default_decode_endpoint() -> String {
    "https://api.qrserver.com/v1/read-qr-code/".into()
}
fn default_verify_endpoint() -> String {
    "http://127.0.0.1:8000".into()
}
fn default_document_store_endpoint() -> String {
    "http://127.0.0.1:8090".into()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}
fn default_log_level() -> String {
    "info".into()
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            name: default_identity(),
        }
    }
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            decode_endpoint: default_decode_endpoint(),
            verify_endpoint: default_verify_endpoint(),
            document_store_endpoint: default_document_store_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl AttestConfig {
    /// Load config from a TOML file, falling back to defaults for missing
    /// fields (or entirely, when the file does not exist).
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            let config: AttestConfig = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Write the config as TOML.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.services.timeout_secs)
    }
}
