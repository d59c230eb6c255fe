// SPDX-FileCopyrightText: 2026 pwvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-process blob store backed by a concurrent map.

use async_trait::async_trait;
use dashmap::DashMap;
use pwvault_core::{BlobStore, HealthStatus, VaultError};

/// Objects live only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    objects: DashMap<String, Vec<u8>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn list(&self) -> Result<Vec<String>, VaultError> {
        let mut names: Vec<String> = self.objects.iter().map(|e| e.key().clone()).collect();
        names.sort();
        Ok(names)
    }

    async fn get(&self, name: &str) -> Result<Vec<u8>, VaultError> {
        self.objects
            .get(name)
            .map(|blob| blob.value().clone())
            .ok_or_else(|| VaultError::NotFound { name: name.to_string() })
    }

    async fn put(&self, name: &str, bytes: Vec<u8>) -> Result<(), VaultError> {
        self.objects.insert(name.to_string(), bytes);
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<(), VaultError> {
        self.objects
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| VaultError::NotFound { name: name.to_string() })
    }

    async fn exists(&self, name: &str) -> Result<bool, VaultError> {
        Ok(self.objects.contains_key(name))
    }

    async fn health_check(&self) -> Result<HealthStatus, VaultError> {
        Ok(HealthStatus::Healthy)
    }
}
