// SPDX-FileCopyrightText: 2026 pwvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Blob store with scripted faults for deterministic tests.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use pwvault_core::{BlobStore, HealthStatus, VaultError};
use pwvault_storage::MemoryBlobStore;

/// A [`MemoryBlobStore`] wrapper whose `get` calls can be made to fail or
/// stall per object name, and which counts every `get`.
pub struct ScriptedBlobStore {
    inner: MemoryBlobStore,
    get_failures: Mutex<HashMap<String, String>>,
    get_delays: Mutex<HashMap<String, Duration>>,
    get_counts: Mutex<HashMap<String, usize>>,
    list_failure: Mutex<Option<String>>,
    health: Mutex<HealthStatus>,
}

impl ScriptedBlobStore {
    pub fn new() -> Self {
        Self {
            inner: MemoryBlobStore::new(),
            get_failures: Mutex::new(HashMap::new()),
            get_delays: Mutex::new(HashMap::new()),
            get_counts: Mutex::new(HashMap::new()),
            list_failure: Mutex::new(None),
            health: Mutex::new(HealthStatus::Healthy),
        }
    }

    /// Make every `get(name)` fail with an internal error carrying `message`.
    pub async fn fail_get(&self, name: &str, message: &str) {
        self.get_failures
            .lock()
            .await
            .insert(name.to_string(), message.to_string());
    }

    /// Stop failing `get(name)`.
    pub async fn heal_get(&self, name: &str) {
        self.get_failures.lock().await.remove(name);
    }

    /// Sleep for `delay` before answering `get(name)`.
    pub async fn delay_get(&self, name: &str, delay: Duration) {
        self.get_delays.lock().await.insert(name.to_string(), delay);
    }

    pub async fn fail_list(&self, message: &str) {
        *self.list_failure.lock().await = Some(message.to_string());
    }

    pub async fn set_health(&self, status: HealthStatus) {
        *self.health.lock().await = status;
    }

    /// Number of `get` calls made for `name`, failed ones included.
    pub async fn get_count(&self, name: &str) -> usize {
        self.get_counts.lock().await.get(name).copied().unwrap_or(0)
    }
}

impl Default for ScriptedBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlobStore for ScriptedBlobStore {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn list(&self) -> Result<Vec<String>, VaultError> {
        if let Some(message) = self.list_failure.lock().await.clone() {
            return Err(VaultError::Internal(message));
        }
        self.inner.list().await
    }

    async fn get(&self, name: &str) -> Result<Vec<u8>, VaultError> {
        *self.get_counts.lock().await.entry(name.to_string()).or_insert(0) += 1;

        let delay = self.get_delays.lock().await.get(name).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let failure = self.get_failures.lock().await.get(name).cloned();
        if let Some(message) = failure {
            return Err(VaultError::Internal(message));
        }
        self.inner.get(name).await
    }

    async fn put(&self, name: &str, bytes: Vec<u8>) -> Result<(), VaultError> {
        self.inner.put(name, bytes).await
    }

    async fn delete(&self, name: &str) -> Result<(), VaultError> {
        self.inner.delete(name).await
    }

    async fn exists(&self, name: &str) -> Result<bool, VaultError> {
        self.inner.exists(name).await
    }

    async fn health_check(&self) -> Result<HealthStatus, VaultError> {
        Ok(self.health.lock().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn counts_and_fails_gets() {
        let store = ScriptedBlobStore::new();
        store.put("a", vec![1]).await.unwrap();
        store.fail_get("a", "boom").await;

        assert!(matches!(store.get("a").await, Err(VaultError::Internal(m)) if m == "boom"));
        store.heal_get("a").await;
        assert_eq!(store.get("a").await.unwrap(), vec![1]);
        assert_eq!(store.get_count("a").await, 2);
        assert_eq!(store.get_count("b").await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn delays_gets() {
        let store = ScriptedBlobStore::new();
        store.put("a", vec![1]).await.unwrap();
        store.delay_get("a", Duration::from_secs(5)).await;

        let start = tokio::time::Instant::now();
        store.get("a").await.unwrap();
        assert!(start.elapsed() >= Duration::from_secs(5));
    }

    #[tokio::test]
    async fn scripted_health() {
        let store = ScriptedBlobStore::new();
        assert!(store.health_check().await.unwrap().is_healthy());
        store.set_health(HealthStatus::Unhealthy("gone".into())).await;
        assert!(!store.health_check().await.unwrap().is_healthy());
    }
}
