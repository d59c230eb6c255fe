// SPDX-FileCopyrightText: 2026 pwvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the pwvault service.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Top-level pwvault configuration.
///
/// Loaded once at process start and never mutated afterwards.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PwvaultConfig {
    /// Process-level settings.
    #[serde(default)]
    pub service: ServiceConfig,

    /// Blob-store backend settings.
    #[serde(default)]
    pub store: StoreConfig,

    /// Vault settings (master-password object).
    #[serde(default)]
    pub vault: VaultConfig,

    /// HTTP gateway settings.
    #[serde(default)]
    pub gateway: GatewayConfig,
}

/// Process-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Which blob-store implementation backs the vault.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Deserialize, Serialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StoreBackend {
    /// One directory per bucket on the local filesystem.
    Fs,
    /// Process-local map; contents vanish on exit.
    Memory,
}

/// Blob-store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Backend implementation.
    #[serde(default = "default_backend")]
    pub backend: StoreBackend,

    /// Root directory holding bucket directories (`fs` backend only).
    #[serde(default = "default_store_root")]
    pub root: String,

    /// Bucket identifier. Every entry is an object inside this bucket.
    #[serde(default = "default_bucket")]
    pub bucket: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            root: default_store_root(),
            bucket: default_bucket(),
        }
    }
}

fn default_backend() -> StoreBackend {
    StoreBackend::Fs
}

fn default_store_root() -> String {
    dirs::data_dir()
        .map(|p| p.join("pwvault"))
        .unwrap_or_else(|| std::path::PathBuf::from("./data"))
        .display()
        .to_string()
}

fn default_bucket() -> String {
    "passwords".to_string()
}

/// Vault configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VaultConfig {
    /// Name of the distinguished object holding the master passphrase
    /// encrypted under itself.
    #[serde(default = "default_master_object")]
    pub master_object: String,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            master_object: default_master_object(),
        }
    }
}

fn default_master_object() -> String {
    "master_pw".to_string()
}

/// HTTP gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Maximum accepted request body size in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8750
}

fn default_max_body_bytes() -> usize {
    1024 * 1024
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = PwvaultConfig::default();
        assert_eq!(config.service.log_level, "info");
        assert_eq!(config.store.backend, StoreBackend::Fs);
        assert_eq!(config.store.bucket, "passwords");
        assert_eq!(config.vault.master_object, "master_pw");
        assert_eq!(config.gateway.port, 8750);
    }

    #[test]
    fn backend_parses_lowercase() {
        let config: PwvaultConfig = toml::from_str("[store]\nbackend = \"memory\"\n").unwrap();
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert_eq!(StoreBackend::Memory.to_string(), "memory");
    }

    #[test]
    fn unknown_backend_is_rejected() {
        let result = toml::from_str::<PwvaultConfig>("[store]\nbackend = \"s4\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn unknown_section_is_rejected() {
        let result = toml::from_str::<PwvaultConfig>("[telegram]\nbot_token = \"x\"\n");
        assert!(result.is_err());
    }
}
