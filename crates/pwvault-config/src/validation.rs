// SPDX-FileCopyrightText: 2026 pwvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::PwvaultConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &PwvaultConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let bucket = config.store.bucket.trim();
    if bucket.is_empty() {
        errors.push(ConfigError::Validation {
            message: "store.bucket must not be empty".to_string(),
        });
    } else if bucket != config.store.bucket {
        errors.push(ConfigError::Validation {
            message: format!(
                "store.bucket `{}` must not have leading or trailing whitespace",
                config.store.bucket
            ),
        });
    } else if bucket.contains('/') || bucket.contains('\\') || bucket == "." || bucket == ".." {
        errors.push(ConfigError::Validation {
            message: format!("store.bucket `{bucket}` must be a single path segment"),
        });
    }

    if config.store.root.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "store.root must not be empty".to_string(),
        });
    }

    if config.vault.master_object.is_empty() {
        errors.push(ConfigError::Validation {
            message: "vault.master_object must not be empty".to_string(),
        });
    }

    let host = config.gateway.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "gateway.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("gateway.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    if config.gateway.port == 0 {
        errors.push(ConfigError::Validation {
            message: "gateway.port must not be 0".to_string(),
        });
    }

    if config.gateway.max_body_bytes == 0 {
        errors.push(ConfigError::Validation {
            message: "gateway.max_body_bytes must be greater than 0".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
