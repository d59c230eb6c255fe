// SPDX-FileCopyrightText: 2026 pwvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Blob-store backends for pwvault.
//!
//! Both backends implement [`pwvault_core::BlobStore`]; [`open_store`] picks
//! one from the `[store]` configuration section.

pub mod fs;
pub mod memory;

use std::sync::Arc;

use pwvault_config::model::{StoreBackend, StoreConfig};
use pwvault_core::{BlobStore, VaultError};
use tracing::info;

pub use fs::FsBlobStore;
pub use memory::MemoryBlobStore;

/// Build the configured blob store.
pub async fn open_store(config: &StoreConfig) -> Result<Arc<dyn BlobStore>, VaultError> {
    let store: Arc<dyn BlobStore> = match config.backend {
        StoreBackend::Fs => Arc::new(FsBlobStore::open(&config.root, &config.bucket).await?),
        StoreBackend::Memory => Arc::new(MemoryBlobStore::new()),
    };
    info!(backend = store.name(), bucket = %config.bucket, "blob store opened");
    Ok(store)
}
