//! Object-storage namespace configuration.

use serde::{Deserialize, Serialize};

/// Top-level storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Namespace provider to use: `"remote"` or `"memory"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Remote asset-provider configuration.
    #[serde(default)]
    pub remote: RemoteStorageConfig,
    /// Maximum upload size in bytes (default 10 MB, the provider's free-tier
    /// per-asset limit).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
}

/// Remote object-storage provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteStorageConfig {
    /// Base URL of the provider's REST API.
    #[serde(default)]
    pub base_url: String,
    /// API key used for basic authentication.
    #[serde(default)]
    pub api_key: String,
    /// API secret used for basic authentication.
    #[serde(default)]
    pub api_secret: String,
    /// Per-call timeout in seconds. A call exceeding this budget is treated
    /// as failed; the engine never assumes it silently succeeded.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for RemoteStorageConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            api_secret: String::new(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            remote: RemoteStorageConfig::default(),
            max_upload_size_bytes: default_max_upload(),
        }
    }
}

fn default_provider() -> String {
    "remote".to_string()
}

fn default_max_upload() -> u64 {
    10 * 1024 * 1024
}

fn default_timeout() -> u64 {
    30
}
