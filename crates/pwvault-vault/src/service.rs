// SPDX-FileCopyrightText: 2026 pwvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Entry handlers built on the codec and the fan-out aggregator.
//!
//! These assume the caller has already admitted the passphrase through the
//! [`crate::MasterKeyGate`]. Existence checks and the writes that follow are
//! separate store calls and are not atomic against concurrent writers.

use std::collections::HashMap;
use std::sync::Arc;

use pwvault_core::{BlobStore, VaultError};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info};

use crate::codec;
use crate::fanout::fan_out;

/// Operations over the named entries of one bucket.
pub struct VaultService {
    store: Arc<dyn BlobStore>,
    master_object: String,
}

impl VaultService {
    pub fn new(store: Arc<dyn BlobStore>, master_object: impl Into<String>) -> Self {
        Self {
            store,
            master_object: master_object.into(),
        }
    }

    pub fn store(&self) -> &Arc<dyn BlobStore> {
        &self.store
    }

    /// Names of every stored object, master object included.
    pub async fn list(&self) -> Result<Vec<String>, VaultError> {
        self.store.list().await
    }

    /// Decrypt the entry `name`.
    pub async fn get(&self, name: &str, passphrase: &str) -> Result<String, VaultError> {
        require_name(name)?;
        let blob = self.store.get(name).await?;
        debug!(name = %name, "entry read");
        codec::decode_text(&blob, passphrase)
    }

    /// Store a new entry. Fails if `name` already exists.
    pub async fn add(&self, name: &str, val: &str, passphrase: &str) -> Result<(), VaultError> {
        require_name(name)?;
        if self.store.exists(name).await? {
            return Err(VaultError::Conflict("object already exists".to_string()));
        }
        let blob = codec::encode(val.as_bytes(), passphrase)?;
        self.store.put(name, blob).await?;
        info!(name = %name, "entry added");
        Ok(())
    }

    /// Replace an existing entry. The master object cannot be updated.
    pub async fn update(&self, name: &str, val: &str, passphrase: &str) -> Result<(), VaultError> {
        require_name(name)?;
        if name == self.master_object {
            return Err(VaultError::Conflict("cannot update master password".to_string()));
        }
        if !self.store.exists(name).await? {
            return Err(VaultError::Conflict("object does not exist".to_string()));
        }
        let blob = codec::encode(val.as_bytes(), passphrase)?;
        self.store.put(name, blob).await?;
        info!(name = %name, "entry updated");
        Ok(())
    }

    /// Remove an existing entry. The master object cannot be deleted.
    pub async fn delete(&self, name: &str) -> Result<(), VaultError> {
        require_name(name)?;
        if name == self.master_object {
            return Err(VaultError::Conflict("cannot delete master password".to_string()));
        }
        if !self.store.exists(name).await? {
            return Err(VaultError::Conflict("object does not exist".to_string()));
        }
        self.store.delete(name).await?;
        info!(name = %name, "entry deleted");
        Ok(())
    }

    /// Every stored blob, still encrypted.
    pub async fn export(&self) -> Result<HashMap<String, Vec<u8>>, VaultError> {
        let names = self.store.list().await?;
        let count = names.len();

        let store = Arc::clone(&self.store);
        let blobs = fan_out(names, move |name| {
            let store = Arc::clone(&store);
            async move { store.get(&name).await }
        })
        .await?;

        info!(entries = count, "encrypted export");
        Ok(blobs)
    }

    /// Every stored entry, decrypted under `passphrase`.
    pub async fn export_plain(
        &self,
        passphrase: &str,
    ) -> Result<HashMap<String, String>, VaultError> {
        let names = self.store.list().await?;
        let count = names.len();

        let store = Arc::clone(&self.store);
        let passphrase = Arc::new(SecretString::from(passphrase.to_string()));
        let secrets = fan_out(names, move |name| {
            let store = Arc::clone(&store);
            let passphrase = Arc::clone(&passphrase);
            async move {
                let blob = store.get(&name).await?;
                codec::decode_text(&blob, passphrase.expose_secret())
            }
        })
        .await?;

        info!(entries = count, "plaintext export");
        Ok(secrets)
    }
}

fn require_name(name: &str) -> Result<(), VaultError> {
    if name.is_empty() {
        return Err(VaultError::MalformedRequest("name cannot be empty".to_string()));
    }
    Ok(())
}

impl std::fmt::Debug for VaultService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultService")
            .field("store", &self.store.name())
            .field("master_object", &self.master_object)
            .finish()
    }
}
