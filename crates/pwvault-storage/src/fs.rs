// SPDX-FileCopyrightText: 2026 pwvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Directory-backed blob store.
//!
//! Each bucket is a directory under the configured root. Object names are
//! hex-encoded into file names, so any name (including `/` or `..`) maps to
//! a single flat file. Files whose names are not valid hex are ignored.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use pwvault_core::{BlobStore, HealthStatus, VaultError};
use tracing::{debug, warn};

#[derive(Debug)]
pub struct FsBlobStore {
    dir: PathBuf,
    tmp_counter: AtomicU64,
}

impl FsBlobStore {
    /// Open (creating if needed) the bucket directory `root/bucket`.
    pub async fn open(root: impl AsRef<Path>, bucket: &str) -> Result<Self, VaultError> {
        let dir = root.as_ref().join(bucket);
        tokio::fs::create_dir_all(&dir).await.map_err(|e| {
            VaultError::store(format!("failed to create bucket directory {}", dir.display()), e)
        })?;
        debug!(dir = %dir.display(), "fs blob store ready");
        Ok(Self {
            dir,
            tmp_counter: AtomicU64::new(0),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(hex::encode(name.as_bytes()))
    }

    fn tmp_path_for(&self, name: &str) -> PathBuf {
        let n = self.tmp_counter.fetch_add(1, Ordering::Relaxed);
        self.dir
            .join(format!(".{}.{}-{n}.tmp", hex::encode(name.as_bytes()), std::process::id()))
    }
}

fn decode_file_name(file_name: &str) -> Option<String> {
    let bytes = hex::decode(file_name).ok()?;
    String::from_utf8(bytes).ok()
}

#[async_trait]
impl BlobStore for FsBlobStore {
    fn name(&self) -> &str {
        "fs"
    }

    async fn list(&self) -> Result<Vec<String>, VaultError> {
        let mut entries = tokio::fs::read_dir(&self.dir)
            .await
            .map_err(|e| VaultError::store("failed to list bucket", e))?;

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| VaultError::store("failed to list bucket", e))?
        {
            let file_name = entry.file_name();
            match file_name.to_str().and_then(decode_file_name) {
                Some(name) => names.push(name),
                None => debug!(file = ?file_name, "skipping foreign file in bucket"),
            }
        }
        names.sort();
        Ok(names)
    }

    async fn get(&self, name: &str) -> Result<Vec<u8>, VaultError> {
        match tokio::fs::read(self.path_for(name)).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(VaultError::NotFound { name: name.to_string() })
            }
            Err(e) => Err(VaultError::store(format!("failed to read object {name}"), e)),
        }
    }

    async fn put(&self, name: &str, bytes: Vec<u8>) -> Result<(), VaultError> {
        let tmp = self.tmp_path_for(name);
        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(|e| VaultError::store(format!("failed to write object {name}"), e))?;

        if let Err(e) = tokio::fs::rename(&tmp, self.path_for(name)).await {
            if let Err(cleanup) = tokio::fs::remove_file(&tmp).await {
                warn!(error = %cleanup, "failed to remove temp file");
            }
            return Err(VaultError::store(format!("failed to write object {name}"), e));
        }
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<(), VaultError> {
        match tokio::fs::remove_file(self.path_for(name)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(VaultError::NotFound { name: name.to_string() })
            }
            Err(e) => Err(VaultError::store(format!("failed to delete object {name}"), e)),
        }
    }

    async fn exists(&self, name: &str) -> Result<bool, VaultError> {
        match tokio::fs::metadata(self.path_for(name)).await {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(VaultError::store(format!("failed to stat object {name}"), e)),
        }
    }

    async fn health_check(&self) -> Result<HealthStatus, VaultError> {
        Ok(match tokio::fs::metadata(&self.dir).await {
            Ok(meta) if meta.is_dir() => HealthStatus::Healthy,
            Ok(_) => HealthStatus::Unhealthy(format!("{} is not a directory", self.dir.display())),
            Err(e) => HealthStatus::Unhealthy(format!("bucket unavailable: {e}")),
        })
    }
}
