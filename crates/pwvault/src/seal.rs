// SPDX-FileCopyrightText: 2026 pwvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `pwvault seal-master`: provision the master object.
//!
//! The master object is the master passphrase encrypted under itself. The
//! gate admits a passphrase exactly when it decodes this object back to the
//! same passphrase.

use std::path::Path;

use pwvault_config::PwvaultConfig;
use pwvault_core::{BlobStore, VaultError};
use pwvault_vault::{codec, prompt};
use secrecy::{ExposeSecret, SecretString};
use tracing::info;

/// Seal the master passphrase into `output`, or into the configured store.
pub async fn run_seal_master(
    config: &PwvaultConfig,
    output: Option<&Path>,
    force: bool,
) -> Result<(), VaultError> {
    let passphrase = prompt::get_master_passphrase_with_confirm()?;

    match output {
        Some(path) => {
            seal_to_file(path, &passphrase, force).await?;
            println!("sealed master object written to {}", path.display());
        }
        None => {
            let store = pwvault_storage::open_store(&config.store).await?;
            seal_into_store(store.as_ref(), &config.vault.master_object, &passphrase, force)
                .await?;
            println!(
                "sealed master object stored as '{}' in bucket '{}'",
                config.vault.master_object, config.store.bucket
            );
        }
    }
    Ok(())
}

fn seal(passphrase: &SecretString) -> Result<Vec<u8>, VaultError> {
    let secret = passphrase.expose_secret();
    codec::encode(secret.as_bytes(), secret)
}

pub async fn seal_into_store(
    store: &dyn BlobStore,
    master_object: &str,
    passphrase: &SecretString,
    force: bool,
) -> Result<(), VaultError> {
    if !force && store.exists(master_object).await? {
        return Err(VaultError::Conflict(format!(
            "master object '{master_object}' already exists (use --force to replace it)"
        )));
    }
    store.put(master_object, seal(passphrase)?).await?;
    info!(object = %master_object, store = store.name(), "master object sealed");
    Ok(())
}

pub async fn seal_to_file(
    path: &Path,
    passphrase: &SecretString,
    force: bool,
) -> Result<(), VaultError> {
    let present = tokio::fs::try_exists(path)
        .await
        .map_err(|e| VaultError::store(format!("failed to stat {}", path.display()), e))?;
    if present && !force {
        return Err(VaultError::Conflict(format!(
            "{} already exists (use --force to replace it)",
            path.display()
        )));
    }

    tokio::fs::write(path, seal(passphrase)?)
        .await
        .map_err(|e| VaultError::store(format!("failed to write {}", path.display()), e))?;
    info!(path = %path.display(), "master object sealed");
    Ok(())
}
