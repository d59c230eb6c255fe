// SPDX-FileCopyrightText: 2026 pwvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Master-passphrase establishment and verification.
//!
//! The gate starts unestablished. The first request whose passphrase decodes
//! the master object back to itself establishes it for the lifetime of the
//! gate; every later request must present the identical passphrase.

use std::sync::Arc;

use pwvault_core::{BlobStore, VaultError};
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::codec;

/// Single-assignment holder of the verified master passphrase.
///
/// Shared by reference (usually inside [`crate::VaultRouter`]) rather than
/// kept in a global. First-time establishment is serialized by the cell, so
/// two racing requests can never both establish different passphrases.
pub struct MasterKeyGate {
    store: Arc<dyn BlobStore>,
    master_object: String,
    verified: OnceCell<SecretString>,
}

impl MasterKeyGate {
    pub fn new(store: Arc<dyn BlobStore>, master_object: impl Into<String>) -> Self {
        Self {
            store,
            master_object: master_object.into(),
            verified: OnceCell::new(),
        }
    }

    /// Name of the object holding the self-encrypted master passphrase.
    pub fn master_object(&self) -> &str {
        &self.master_object
    }

    pub fn is_established(&self) -> bool {
        self.verified.initialized()
    }

    /// Admit `candidate` or fail.
    ///
    /// Once established, this is a comparison only: the master object is not
    /// fetched again and a mismatch is an [`VaultError::Auth`] failure. While
    /// unestablished, store failures propagate unchanged and a failed attempt
    /// leaves the gate unestablished so the next call retries.
    pub async fn ensure(&self, candidate: &str) -> Result<(), VaultError> {
        let verified = self
            .verified
            .get_or_try_init(|| self.establish(candidate))
            .await?;

        if verified.expose_secret() != candidate {
            debug!("passphrase does not match the established master passphrase");
            return Err(VaultError::Auth);
        }
        Ok(())
    }

    async fn establish(&self, candidate: &str) -> Result<SecretString, VaultError> {
        let blob = self.store.get(&self.master_object).await?;

        let recovered = match codec::decode(&blob, candidate) {
            Ok(secret) => secret,
            Err(e) => {
                warn!(object = %self.master_object, "master passphrase rejected");
                return Err(e);
            }
        };
        if recovered.as_slice() != candidate.as_bytes() {
            warn!(object = %self.master_object, "master passphrase rejected");
            return Err(VaultError::Auth);
        }

        info!(object = %self.master_object, "master passphrase established");
        Ok(SecretString::from(candidate.to_string()))
    }
}

impl std::fmt::Debug for MasterKeyGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MasterKeyGate")
            .field("store", &self.store.name())
            .field("master_object", &self.master_object)
            .field("established", &self.is_established())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use pwvault_core::HealthStatus;
    use pwvault_storage::MemoryBlobStore;

    use super::*;

    /// Memory store that counts `get` calls and can be told to fail them.
    #[derive(Default)]
    struct CountingStore {
        inner: MemoryBlobStore,
        gets: AtomicUsize,
        fail_gets: AtomicUsize,
    }

    #[async_trait]
    impl BlobStore for CountingStore {
        fn name(&self) -> &str {
            "counting"
        }
        async fn list(&self) -> Result<Vec<String>, VaultError> {
            self.inner.list().await
        }
        async fn get(&self, name: &str) -> Result<Vec<u8>, VaultError> {
            self.gets.fetch_add(1, Ordering::SeqCst);
            if self.fail_gets.load(Ordering::SeqCst) > 0 {
                self.fail_gets.fetch_sub(1, Ordering::SeqCst);
                return Err(VaultError::Internal("store unavailable".into()));
            }
            tokio::task::yield_now().await;
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
            Ok(HealthStatus::Healthy)
        }
    }

    async fn seeded(passphrase: &str) -> Arc<CountingStore> {
        let store = Arc::new(CountingStore::default());
        let blob = codec::encode(passphrase.as_bytes(), passphrase).unwrap();
        store.inner.put("master_pw", blob).await.unwrap();
        store
    }

    #[tokio::test]
    async fn correct_passphrase_establishes() {
        let store = seeded("correct-pw").await;
        let gate = MasterKeyGate::new(store.clone(), "master_pw");
        assert!(!gate.is_established());

        gate.ensure("correct-pw").await.unwrap();
        assert!(gate.is_established());
        assert_eq!(store.gets.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn mismatch_after_establishment_fails_without_refetch() {
        let store = seeded("correct-pw").await;
        let gate = MasterKeyGate::new(store.clone(), "master_pw");
        gate.ensure("correct-pw").await.unwrap();

        let err = gate.ensure("wrong-pw").await.unwrap_err();
        assert!(matches!(err, VaultError::Auth));
        gate.ensure("correct-pw").await.unwrap();
        assert_eq!(store.gets.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn wrong_first_passphrase_stays_unestablished() {
        let store = seeded("correct-pw").await;
        let gate = MasterKeyGate::new(store.clone(), "master_pw");

        assert!(matches!(gate.ensure("wrong-pw").await, Err(VaultError::Auth)));
        assert!(!gate.is_established());

        gate.ensure("correct-pw").await.unwrap();
        assert_eq!(store.gets.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn shared_key_prefix_is_still_rejected() {
        // Same 32-byte key, different passphrase: decode succeeds, comparison must not.
        let base = "0123456789abcdef0123456789abcdef";
        let store = seeded(&format!("{base}-real")).await;
        let gate = MasterKeyGate::new(store, "master_pw");

        let err = gate.ensure(&format!("{base}-fake")).await.unwrap_err();
        assert!(matches!(err, VaultError::Auth));
    }

    #[tokio::test]
    async fn store_failure_propagates_and_is_retried() {
        let store = seeded("correct-pw").await;
        store.fail_gets.store(1, Ordering::SeqCst);
        let gate = MasterKeyGate::new(store.clone(), "master_pw");

        let err = gate.ensure("correct-pw").await.unwrap_err();
        assert!(matches!(err, VaultError::Internal(_)));
        assert!(!gate.is_established());

        gate.ensure("correct-pw").await.unwrap();
        assert!(gate.is_established());
    }

    #[tokio::test]
    async fn missing_master_object_is_not_found() {
        let gate = MasterKeyGate::new(Arc::new(CountingStore::default()), "master_pw");
        let err = gate.ensure("anything").await.unwrap_err();
        assert!(matches!(err, VaultError::NotFound { .. }));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn racing_first_calls_admit_only_one_passphrase() {
        let store = seeded("correct-pw").await;
        let gate = Arc::new(MasterKeyGate::new(store.clone(), "master_pw"));

        let mut handles = Vec::new();
        for i in 0..16 {
            let gate = Arc::clone(&gate);
            let candidate = if i % 2 == 0 { "correct-pw" } else { "wrong-pw" };
            handles.push(tokio::spawn(async move {
                (candidate, gate.ensure(candidate).await.is_ok())
            }));
        }

        for handle in handles {
            let (candidate, admitted) = handle.await.unwrap();
            assert_eq!(admitted, candidate == "correct-pw");
        }
        assert!(gate.is_established());
    }

    #[test]
    fn debug_output_hides_passphrase() {
        let gate = MasterKeyGate::new(Arc::new(CountingStore::default()), "master_pw");
        let debug = format!("{gate:?}");
        assert!(debug.contains("master_pw"));
        assert!(debug.contains("established: false"));
    }
}
