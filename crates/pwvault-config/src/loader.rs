// SPDX-FileCopyrightText: 2026 pwvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./pwvault.toml` > `~/.config/pwvault/pwvault.toml` >
//! `/etc/pwvault/pwvault.toml`, with `PWVAULT_` environment overrides and the
//! legacy deployment variables `PW_BUCKET` and `MASTER_PW_OBJECT`.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::PwvaultConfig;

/// Environment variables read for the passphrase, never as config keys.
const IGNORED_ENV_KEYS: &[&str] = &["master_key"];

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/pwvault/pwvault.toml`
/// 3. `~/.config/pwvault/pwvault.toml`
/// 4. `./pwvault.toml`
/// 5. `PWVAULT_*` environment variables
/// 6. `PW_BUCKET` / `MASTER_PW_OBJECT`
pub fn load_config() -> Result<PwvaultConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<PwvaultConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PwvaultConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<PwvaultConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PwvaultConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .merge(legacy_env_provider())
        .extract()
}

/// Build the Figment used for config loading, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(PwvaultConfig::default()))
        .merge(Toml::file("/etc/pwvault/pwvault.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("pwvault/pwvault.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("pwvault.toml"))
        .merge(env_provider())
        .merge(legacy_env_provider())
}

/// `PWVAULT_<SECTION>_<KEY>` provider with explicit section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because keys themselves
/// contain underscores: `PWVAULT_VAULT_MASTER_OBJECT` must map to
/// `vault.master_object`.
fn env_provider() -> Env {
    Env::prefixed("PWVAULT_")
        .ignore(IGNORED_ENV_KEYS)
        .map(|key| {
            let mapped = key
                .as_str()
                .to_ascii_lowercase()
                .replacen("service_", "service.", 1)
                .replacen("store_", "store.", 1)
                .replacen("vault_", "vault.", 1)
                .replacen("gateway_", "gateway.", 1);
            mapped.into()
        })
}

/// The unprefixed variables used by existing deployments.
fn legacy_env_provider() -> Env {
    Env::raw()
        .only(&["pw_bucket", "master_pw_object"])
        .map(|key| {
            let key = key.as_str().to_ascii_lowercase();
            let mapped = match key.as_str() {
                "pw_bucket" => "store.bucket",
                "master_pw_object" => "vault.master_object",
                other => other,
            };
            mapped.to_string().into()
        })
}
