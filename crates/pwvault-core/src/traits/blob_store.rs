// SPDX-FileCopyrightText: 2026 pwvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Blob-store trait: the key-value object interface the vault persists to.

use async_trait::async_trait;

use crate::error::VaultError;
use crate::types::HealthStatus;

/// A flat key-value object store holding one encrypted blob per entry name.
///
/// Implementations are long-lived, shared handles (`Arc<dyn BlobStore>`).
/// No operation is transactional with respect to any other.
#[async_trait]
pub trait BlobStore: Send + Sync + 'static {
    /// Returns the human-readable name of this store backend.
    fn name(&self) -> &str;

    /// Lists every object name in the store, sorted ascending.
    async fn list(&self) -> Result<Vec<String>, VaultError>;

    /// Fetches the raw bytes stored under `name`.
    ///
    /// Returns [`VaultError::NotFound`] when no such object exists.
    async fn get(&self, name: &str) -> Result<Vec<u8>, VaultError>;

    /// Stores `bytes` under `name`, replacing any previous object.
    async fn put(&self, name: &str, bytes: Vec<u8>) -> Result<(), VaultError>;

    /// Removes the object stored under `name`.
    async fn delete(&self, name: &str) -> Result<(), VaultError>;

    /// Reports whether an object exists under `name`.
    ///
    /// A missing object is `Ok(false)`, never an error.
    async fn exists(&self, name: &str) -> Result<bool, VaultError>;

    /// Performs a health check and returns the store's current status.
    async fn health_check(&self) -> Result<HealthStatus, VaultError>;
}
