// SPDX-FileCopyrightText: 2026 pwvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the pwvault service.
//!
//! Provides TOML configuration parsing with strict validation
//! (`deny_unknown_fields`), XDG file hierarchy lookup, environment variable
//! overrides, and miette diagnostic rendering with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use pwvault_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("bucket: {}", config.store.bucket);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

pub use diagnostic::{render_errors, ConfigError};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::PwvaultConfig;

/// Load configuration from the XDG hierarchy and validate it.
pub fn load_and_validate() -> Result<PwvaultConfig, Vec<ConfigError>> {
    finish(loader::load_config())
}

/// Load configuration from an explicit file (plus env overrides) and validate it.
pub fn load_and_validate_path(path: &Path) -> Result<PwvaultConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_path(path))
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<PwvaultConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_str(toml_content))
}

#[allow(clippy::result_large_err)]
fn finish(
    loaded: Result<PwvaultConfig, figment::Error>,
) -> Result<PwvaultConfig, Vec<ConfigError>> {
    let config = loaded.map_err(diagnostic::figment_to_config_errors)?;
    validation::validate_config(&config)?;
    tracing::debug!(
        backend = %config.store.backend,
        bucket = %config.store.bucket,
        "configuration loaded"
    );
    Ok(config)
}
