// SPDX-FileCopyrightText: 2026 pwvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator trait definitions.
//!
//! Collaborators use `#[async_trait]` so they can be shared as trait objects.

pub mod blob_store;

pub use blob_store::BlobStore;
